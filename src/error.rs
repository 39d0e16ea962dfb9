//! # Error Handling
//!
//! This module defines the centralized error type for `stencil`. It uses the
//! `thiserror` library to describe every anticipated failure mode with a
//! clear, descriptive message.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering configuration problems, GitHub API
//!   failures, post-scaffold command failures and wrapped library errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Filesystem errors are not specially handled: they are wrapped in
//! `Error::Io` and propagate up the call chain, aborting the current
//! operation. Files already written by an aborted pass stay on disk.

use thiserror::Error;

/// Main error type for stencil operations
#[derive(Error, Debug)]
pub enum Error {
    /// The scaffold configuration or a template manifest is invalid.
    ///
    /// This error includes the specific issue and optionally a hint about how
    /// to fix it.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The GitHub contents API answered with a non-success status.
    #[error("Error calling GitHub API - {status} | {url}")]
    Api { status: String, url: String },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// A named local template could not be found under the template root.
    #[error("Unknown template '{name}'{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    UnknownTemplate { name: String, hint: Option<String> },

    /// `git init` could not be run or reported failure.
    #[error("Failed to initialize git")]
    GitInit,

    /// `<manager> install` could not be run or reported failure.
    #[error("Failed to install packages")]
    PackageInstall,

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON decoding error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Shorthand for a configuration error without a hint.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            hint: None,
        }
    }

    /// Shorthand for a configuration error carrying a hint.
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let error = Error::config("Repository name must not be empty");
        let display = format!("{}", error);
        assert!(display.contains("Configuration error"));
        assert!(display.contains("Repository name must not be empty"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_config_with_hint() {
        let error = Error::config_with_hint(
            "Custom slot '[REPO_NAME]' collides with a built-in slot",
            "Rename the custom slot",
        );
        let display = format!("{}", error);
        assert!(display.contains("[REPO_NAME]"));
        assert!(display.contains("hint:"));
        assert!(display.contains("Rename the custom slot"));
    }

    #[test]
    fn test_error_display_api() {
        let error = Error::Api {
            status: "404 Not Found".to_string(),
            url: "https://api.github.com/repos/acme/widgets/contents/app".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Error calling GitHub API"));
        assert!(display.contains("404 Not Found"));
        assert!(display.contains("https://api.github.com/repos/acme/widgets/contents/app"));
    }

    #[test]
    fn test_error_display_network() {
        let error = Error::Network {
            url: "https://example.com".to_string(),
            message: "Connection timeout".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Network operation error"));
        assert!(display.contains("https://example.com"));
        assert!(display.contains("Connection timeout"));
    }

    #[test]
    fn test_error_display_fixed_messages() {
        assert_eq!(Error::GitInit.to_string(), "Failed to initialize git");
        assert_eq!(Error::PackageInstall.to_string(), "Failed to install packages");
    }

    #[test]
    fn test_error_display_unknown_template() {
        let error = Error::UnknownTemplate {
            name: "react-app".to_string(),
            hint: Some("Run `stencil list` to see available templates".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown template 'react-app'"));
        assert!(display.contains("stencil list"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_glob_error() {
        let glob_error = glob::Pattern::new("[").unwrap_err();
        let error: Error = glob_error.into();
        assert!(format!("{}", error).contains("Glob pattern error"));
    }
}
