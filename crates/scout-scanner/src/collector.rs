//! Result collection and catalog-order restoration.
//!
//! Workers finish in arbitrary order; the collector slots each outcome back
//! into its catalog position so the final snapshot reads in catalog order.

use scout_core::{AppStatus, FxHashMap, ProbeOutcome, ScanSnapshot};

use crate::error::ScanError;

/// Accumulates probe outcomes into a catalog-ordered snapshot.
///
/// One collector serves exactly one scan attempt. Each catalog application
/// has a pre-allocated slot; [`ingest`](Self::ingest) fills the slot for
/// the outcome's application and rejects duplicates or unknown names, both
/// of which indicate an engine bug.
#[derive(Debug)]
pub(crate) struct ResultCollector {
    slots: Vec<Option<AppStatus>>,
    index: FxHashMap<String, usize>,
    errors: Vec<(String, scout_core::ProbeError)>,
    filled: usize,
}

impl ResultCollector {
    /// Creates a collector with one empty slot per catalog application.
    pub(crate) fn new(catalog: &[scout_core::AppDefinition]) -> Self {
        let index = catalog
            .iter()
            .enumerate()
            .map(|(i, app)| (app.name.clone(), i))
            .collect();

        Self {
            slots: vec![None; catalog.len()],
            index,
            errors: Vec::new(),
            filled: 0,
        }
    }

    /// Records one outcome in its catalog slot.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Inconsistent`] if the application is not in the
    /// catalog or its slot is already filled.
    pub(crate) fn ingest(&mut self, outcome: ProbeOutcome) -> Result<(), ScanError> {
        let name = outcome.app.name.clone();
        let Some(&slot) = self.index.get(&name) else {
            return Err(ScanError::inconsistent(format!(
                "outcome for unknown application '{name}'"
            )));
        };

        if self.slots[slot].is_some() {
            return Err(ScanError::inconsistent(format!(
                "duplicate outcome for application '{name}'"
            )));
        }

        if let Some(error) = &outcome.error {
            self.errors.push((name, error.clone()));
        }

        self.slots[slot] = Some(AppStatus::from(outcome));
        self.filled += 1;
        Ok(())
    }

    /// Returns the number of outcomes ingested so far.
    pub(crate) const fn filled(&self) -> usize {
        self.filled
    }

    /// Returns `true` once every catalog slot is filled.
    pub(crate) fn is_complete(&self) -> bool {
        self.filled == self.slots.len()
    }

    /// Consumes the collector and produces the final snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Inconsistent`] if any slot is still empty;
    /// callers are expected to check completeness (or cancellation) first.
    pub(crate) fn finish(self) -> Result<ScanSnapshot, ScanError> {
        let mut results = Vec::with_capacity(self.slots.len());
        for (i, slot) in self.slots.into_iter().enumerate() {
            let status = slot.ok_or_else(|| {
                ScanError::inconsistent(format!("missing outcome for catalog slot {i}"))
            })?;
            results.push(status);
        }

        Ok(ScanSnapshot {
            results,
            errors: self.errors,
        })
    }
}
