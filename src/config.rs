//! # Scaffold Configuration and Manifest Parsing
//!
//! This module defines the statically typed configuration consumed by the
//! materializer, and the optional per-template manifest (`stencil.yaml`)
//! that lets a template declare its own slots and slot paths.
//!
//! ## Key Components
//!
//! - **`ScaffoldConfig`**: Repository name, author name, custom slots, slot
//!   path globs and the optional GitHub access token. It is validated once,
//!   at the materializer entry point, before any traversal begins.
//!
//! - **`Manifest`**: The YAML manifest a template may ship at its root:
//!
//! ```yaml
//! slots:
//!   "[LICENSE]": MIT
//! slot-paths:
//!   - "**/*.md"
//!   - "**/package.json"
//! ```
//!
//! ## Slot Precedence
//!
//! The built-in slots `[REPO_NAME]` and `[AUTHOR_NAME]` cannot be redefined.
//! A custom slot using either key is rejected by `ScaffoldConfig::validate`
//! instead of silently picking a winner.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Slot replaced with the configured repository name.
pub const REPO_NAME_SLOT: &str = "[REPO_NAME]";

/// Slot replaced with the configured author name.
pub const AUTHOR_NAME_SLOT: &str = "[AUTHOR_NAME]";

/// File name of the optional manifest at a template's root.
pub const MANIFEST_FILE: &str = "stencil.yaml";

/// Everything the materializer needs to know about the project being created.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldConfig {
    /// Name of the new project, substituted for `[REPO_NAME]`.
    pub repo_name: String,
    /// Author of the new project, substituted for `[AUTHOR_NAME]`.
    pub author_name: String,
    /// Additional literal tokens and their replacements.
    pub custom_slots: HashMap<String, String>,
    /// Glob patterns selecting which destination files receive substitution.
    pub slot_paths: Vec<String>,
    /// GitHub token sent as `Authorization: token <...>` for remote templates.
    pub access_token: Option<String>,
}

impl ScaffoldConfig {
    pub fn new(repo_name: impl Into<String>, author_name: impl Into<String>) -> Self {
        Self {
            repo_name: repo_name.into(),
            author_name: author_name.into(),
            ..Self::default()
        }
    }

    pub fn with_slot(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_slots.insert(token.into(), value.into());
        self
    }

    pub fn with_slot_path(mut self, pattern: impl Into<String>) -> Self {
        self.slot_paths.push(pattern.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Check the configuration before a materialization pass.
    ///
    /// Rejects blank names, empty or built-in custom slot keys, and slot
    /// paths that are not valid glob patterns.
    pub fn validate(&self) -> Result<()> {
        if self.repo_name.trim().is_empty() {
            return Err(Error::config("Repository name must not be empty"));
        }
        if self.author_name.trim().is_empty() {
            return Err(Error::config_with_hint(
                "Author name must not be empty",
                "Pass --author or set `git config user.name`",
            ));
        }

        for token in self.custom_slots.keys() {
            if token.is_empty() {
                return Err(Error::config("Custom slot tokens must not be empty"));
            }
            if token == REPO_NAME_SLOT || token == AUTHOR_NAME_SLOT {
                return Err(Error::config_with_hint(
                    format!("Custom slot '{}' collides with a built-in slot", token),
                    "Built-in slots are filled from the repository and author names; use a different token",
                ));
            }
        }

        for pattern in &self.slot_paths {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::config_with_hint(
                    format!("Invalid slot path '{}': {}", pattern, e),
                    "Slot paths are glob patterns such as \"**/*.md\"",
                )
            })?;
        }

        Ok(())
    }

    /// The full token-to-value mapping: built-in slots plus custom slots.
    ///
    /// Built-in values are trimmed.
    pub fn slot_map(&self) -> HashMap<String, String> {
        let mut slots = HashMap::with_capacity(self.custom_slots.len() + 2);
        slots.insert(REPO_NAME_SLOT.to_string(), self.repo_name.trim().to_string());
        slots.insert(
            AUTHOR_NAME_SLOT.to_string(),
            self.author_name.trim().to_string(),
        );
        for (token, value) in &self.custom_slots {
            slots.entry(token.clone()).or_insert_with(|| value.clone());
        }
        slots
    }
}

/// Template-provided defaults, read from `stencil.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Custom slots declared by the template.
    #[serde(default)]
    pub slots: HashMap<String, String>,
    /// Glob patterns for files that contain slots.
    #[serde(default, rename = "slot-paths")]
    pub slot_paths: Vec<String>,
}

impl Manifest {
    /// Merge the manifest into a configuration.
    ///
    /// Slots already present in the configuration keep their value, so
    /// explicit command-line slots win over template defaults. Slot paths
    /// are appended, skipping duplicates.
    pub fn apply_to(&self, config: &mut ScaffoldConfig) {
        for (token, value) in &self.slots {
            config
                .custom_slots
                .entry(token.clone())
                .or_insert_with(|| value.clone());
        }
        for pattern in &self.slot_paths {
            if !config.slot_paths.contains(pattern) {
                config.slot_paths.push(pattern.clone());
            }
        }
    }
}

/// Parse a manifest from YAML text.
///
/// An empty document is an empty manifest.
pub fn parse(yaml_content: &str) -> Result<Manifest> {
    if yaml_content.trim().is_empty() {
        return Ok(Manifest::default());
    }
    serde_yaml::from_str::<Manifest>(yaml_content).map_err(|e| {
        Error::config_with_hint(
            format!("Invalid manifest: {}", e),
            "Expected `slots:` (a mapping) and `slot-paths:` (a list of globs)",
        )
    })
}

/// Parse a manifest file from disk.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse(&content)
}

/// Load `stencil.yaml` from a template root, if the template ships one.
pub fn find_manifest(template_root: &Path) -> Result<Option<Manifest>> {
    let path = template_root.join(MANIFEST_FILE);
    if path.is_file() {
        from_file(&path).map(Some)
    } else {
        Ok(None)
    }
}
