//! Home-relative path expansion.
//!
//! Catalog entries describe candidate config locations as `~/`-relative
//! paths (`~/.config/ghostty/config`). This module expands them against the
//! current user's home directory before any filesystem check runs.

use camino::{Utf8Path, Utf8PathBuf};

/// Expands a leading `~` or `~/` to the current user's home directory.
///
/// Paths without a leading tilde are returned unchanged. If the home
/// directory cannot be determined (or is not valid UTF-8), the path is also
/// returned unchanged; the subsequent existence check will simply fail to
/// match, which is the behavior we want for an unknown home.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use scout_core::expand_tilde;
///
/// let expanded = expand_tilde(Utf8Path::new("/etc/app/config"));
/// assert_eq!(expanded.as_str(), "/etc/app/config");
/// ```
#[must_use]
pub fn expand_tilde(path: &Utf8Path) -> Utf8PathBuf {
    let Some(home) = home_dir() else {
        return path.to_owned();
    };

    if path.as_str() == "~" {
        return home;
    }

    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_owned(),
    }
}

/// Returns the current user's home directory as a UTF-8 path, if known.
#[must_use]
pub fn home_dir() -> Option<Utf8PathBuf> {
    home::home_dir().and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let path = Utf8Path::new("/etc/app/config");
        assert_eq!(expand_tilde(path), path);
    }

    #[test]
    fn test_expand_tilde_relative_path_unchanged() {
        let path = Utf8Path::new("config/app.toml");
        assert_eq!(expand_tilde(path), path);
    }

    #[test]
    fn test_expand_tilde_leading_tilde() {
        let expanded = expand_tilde(Utf8Path::new("~/.config/app/config"));
        if let Some(home) = home_dir() {
            assert_eq!(expanded, home.join(".config/app/config"));
            assert!(!expanded.as_str().contains('~'));
        } else {
            // No home directory in this environment; path passes through.
            assert_eq!(expanded.as_str(), "~/.config/app/config");
        }
    }

    #[test]
    fn test_expand_tilde_bare_tilde() {
        let expanded = expand_tilde(Utf8Path::new("~"));
        if let Some(home) = home_dir() {
            assert_eq!(expanded, home);
        }
    }

    #[test]
    fn test_expand_tilde_mid_path_tilde_unchanged() {
        let path = Utf8Path::new("/data/~backup/config");
        assert_eq!(expand_tilde(path), path);
    }
}
