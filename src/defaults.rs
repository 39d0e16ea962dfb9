//! Default values for stencil configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Environment variable overriding the local template root.
pub const TEMPLATES_ENV: &str = "STENCIL_TEMPLATES";

/// Environment variable holding the GitHub access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Returns the default local template root.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/stencil/templates` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/stencil/templates`
/// - Windows: `{FOLDERID_RoamingAppData}\stencil\templates`
///
/// Falls back to `.stencil/templates` in the current directory if the
/// platform config directory cannot be determined.
///
/// This can be overridden by the `--templates-dir` CLI flag or the
/// `STENCIL_TEMPLATES` environment variable.
pub fn default_templates_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("stencil"))
        .unwrap_or_else(|| PathBuf::from(".stencil"))
        .join("templates")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates_dir_returns_path() {
        let dir = default_templates_dir();
        assert!(dir.ends_with("stencil/templates") || dir.ends_with(".stencil/templates"));
    }

    #[test]
    fn test_default_templates_dir_is_absolute_or_fallback() {
        let dir = default_templates_dir();
        // Either absolute (normal case) or relative fallback
        assert!(
            dir.is_absolute() || dir.starts_with(".stencil"),
            "Expected absolute path or fallback, got: {:?}",
            dir
        );
    }
}
