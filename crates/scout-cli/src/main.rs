//! CLI entry point for appscout.
//!
//! This binary discovers which known applications have a config file on
//! the current machine, by probing each application's candidate paths
//! concurrently.
//!
//! # Usage
//!
//! ```bash
//! appscout [OPTIONS] <COMMAND>
//!
//! # Scan and show a grouped summary
//! appscout scan
//!
//! # Scan with per-application detail
//! appscout scan --detailed
//!
//! # List the catalog without probing
//! appscout apps
//!
//! # Generate a JSON report
//! appscout report --format json --output report.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use scout_core::{AppStatus, CatalogConfig, ConfigStatus, ScanConfig, ScanSnapshot};
use scout_scanner::{AppCatalog, ScanState, Scanner};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Discovers which known applications are configured on this machine.
///
/// Probes every application in the catalog concurrently and reports which
/// of them have a config file present.
#[derive(Parser)]
#[command(name = "appscout", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to a user catalog file extending the embedded catalog.
    ///
    /// Defaults to `~/.config/appscout/apps.json` if present.
    #[arg(short, long, global = true, env = "APPSCOUT_CATALOG")]
    catalog: Option<Utf8PathBuf>,

    /// Ignore any user catalog and use only the embedded one.
    #[arg(long, global = true)]
    no_user_catalog: bool,

    /// Number of concurrent probe workers.
    #[arg(long, global = true, env = "APPSCOUT_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Overall scan deadline in milliseconds.
    #[arg(long, global = true, env = "APPSCOUT_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Probe every application and display a status summary.
    Scan {
        /// Show the winning config path per application.
        #[arg(short, long)]
        detailed: bool,
    },

    /// List the catalog without probing the filesystem.
    Apps,

    /// Generate a discovery report.
    Report {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

/// Report output format.
#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// JSON format.
    Json,
    /// CSV format.
    Csv,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so the
/// summary output stays clean.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `no_color` - Disable ANSI colors in output
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Builds the scan configuration from CLI arguments.
fn build_scan_config(cli: &Cli) -> ScanConfig {
    let mut config = ScanConfig::default();
    if let Some(concurrency) = cli.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    config
}

/// Loads the catalog per CLI arguments.
///
/// # Errors
///
/// Returns an error if the embedded catalog is unusable or an explicitly
/// given user catalog cannot be loaded.
fn load_catalog(cli: &Cli) -> color_eyre::Result<AppCatalog> {
    // An explicit --catalog must load; the default location is best-effort.
    if let Some(path) = &cli.catalog {
        let mut catalog = AppCatalog::embedded()?;
        let merged = catalog.merge_file(path)?;
        info!(path = %path, apps = merged, "merged user catalog");
        return Ok(catalog);
    }

    let config = CatalogConfig {
        user_catalog: None,
        use_user_catalog: !cli.no_user_catalog,
    };
    Ok(AppCatalog::load(&config)?)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs a scan and prints the grouped summary.
///
/// # Errors
///
/// Returns an error if the scan is cancelled, times out, or the catalog
/// cannot be loaded.
async fn run_scan(cli: &Cli, detailed: bool) -> color_eyre::Result<()> {
    let snapshot = scan(cli).await?;
    print_summary(&snapshot, detailed);
    Ok(())
}

/// Lists the catalog without touching the filesystem.
fn run_apps(cli: &Cli) -> color_eyre::Result<()> {
    let catalog = load_catalog(cli)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(handle, "Known applications ({}):", catalog.len());

    // Group by category, preserving first-seen category order.
    let mut categories: Vec<&str> = Vec::new();
    for app in catalog.apps() {
        if !categories.contains(&app.category.as_str()) {
            categories.push(&app.category);
        }
    }

    for category in categories {
        let label = if category.is_empty() { "other" } else { category };
        let _ = writeln!(handle);
        let _ = writeln!(handle, "{label}:");
        for app in catalog.apps().iter().filter(|a| a.category == category) {
            let _ = writeln!(handle, "  {} {}", app.icon, app.display_name());
            for path in &app.config_paths {
                let _ = writeln!(handle, "      {path}");
            }
        }
    }

    Ok(())
}

/// Generates a discovery report in the specified format.
///
/// # Errors
///
/// Returns an error if the scan fails or the output file cannot be written.
async fn run_report(
    cli: &Cli,
    format: ReportFormat,
    output: Option<Utf8PathBuf>,
) -> color_eyre::Result<()> {
    let snapshot = scan(cli).await?;

    let content = match format {
        ReportFormat::Json => generate_json_report(&snapshot)?,
        ReportFormat::Csv => generate_csv_report(&snapshot.results),
    };

    if let Some(output_path) = output {
        std::fs::write(output_path.as_std_path(), &content)?;
        info!(path = %output_path, "report written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
    }

    Ok(())
}

/// Runs one scan attempt to completion and returns its snapshot.
async fn scan(cli: &Cli) -> color_eyre::Result<ScanSnapshot> {
    let catalog = load_catalog(cli)?;
    let scanner = Scanner::new(build_scan_config(cli))?;

    info!(apps = catalog.len(), "starting scan");
    let mut handle = scanner.spawn(catalog.expanded());

    match handle.wait().await {
        ScanState::Complete(snapshot) => Ok(snapshot),
        ScanState::Failed(err) => Err(err.into()),
        state => Err(color_eyre::eyre::eyre!(
            "scan ended in unexpected state '{}'",
            state.name()
        )),
    }
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints the grouped status summary.
fn print_summary(snapshot: &ScanSnapshot, detailed: bool) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(handle);
    let _ = writeln!(handle, "Application Discovery Summary");
    let _ = writeln!(handle, "=============================");

    for status in [
        ConfigStatus::Ready,
        ConfigStatus::NotConfigured,
        ConfigStatus::Error,
    ] {
        let group: Vec<&AppStatus> = snapshot.with_status(status).collect();
        if group.is_empty() {
            continue;
        }

        let _ = writeln!(handle);
        let _ = writeln!(handle, "{} {} ({}):", status.marker(), status.label(), group.len());
        for app in group {
            let _ = write!(handle, "  {} {}", app.icon, app.display_name());
            if detailed {
                if let Some(path) = &app.config_path {
                    let _ = write!(handle, "  {path}");
                }
            }
            let _ = writeln!(handle);
        }
    }

    let _ = writeln!(handle);
    let _ = writeln!(
        handle,
        "{} of {} applications configured",
        snapshot.ready_count(),
        snapshot.len()
    );

    if !snapshot.errors.is_empty() {
        let stderr = std::io::stderr();
        let mut err_handle = stderr.lock();
        let _ = writeln!(err_handle);
        let _ = writeln!(err_handle, "Probe errors ({}):", snapshot.errors.len());
        for (name, error) in &snapshot.errors {
            let _ = writeln!(err_handle, "  {name} - {error}");
        }
    }
}

/// Generates a JSON report.
fn generate_json_report(snapshot: &ScanSnapshot) -> color_eyre::Result<String> {
    #[derive(serde::Serialize)]
    struct Report<'a> {
        configured: usize,
        total: usize,
        results: &'a [AppStatus],
    }

    let report = Report {
        configured: snapshot.ready_count(),
        total: snapshot.len(),
        results: &snapshot.results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Generates a CSV report.
fn generate_csv_report(results: &[AppStatus]) -> String {
    use std::fmt::Write;

    let mut output = String::from("name,category,status,config_path\n");

    for app in results {
        let path = app.config_path.as_ref().map_or("", |p| p.as_str());
        let _ = writeln!(
            output,
            "{},{},{},{}",
            escape_csv(&app.name),
            escape_csv(&app.category),
            app.status.label(),
            escape_csv(path)
        );
    }

    output
}

/// Escapes a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // Install color-eyre first, before anything can panic.
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    match &cli.command {
        Commands::Scan { detailed } => run_scan(&cli, *detailed).await,
        Commands::Apps => run_apps(&cli),
        Commands::Report { format, output } => run_report(&cli, *format, output.clone()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{AppDefinition, ProbeOutcome};

    fn sample_snapshot() -> ScanSnapshot {
        let ready = ProbeOutcome::found(
            AppDefinition::new("git", "🌳", &["~/.gitconfig"]),
            Utf8PathBuf::from("/home/me/.gitconfig"),
        );
        let absent = ProbeOutcome::absent(AppDefinition::new("zed", "⚡", &[]));
        ScanSnapshot {
            results: vec![ready.into(), absent.into()],
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_csv_report_shape() {
        let snapshot = sample_snapshot();
        let csv = generate_csv_report(&snapshot.results);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,category,status,config_path");
        assert!(lines[1].starts_with("git,"));
        assert!(lines[1].contains("/home/me/.gitconfig"));
        assert!(lines[2].ends_with("Not Configured,"));
    }

    #[test]
    fn test_json_report_counts() {
        let snapshot = sample_snapshot();
        let json = generate_json_report(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["configured"], 1);
        assert_eq!(value["total"], 2);
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
