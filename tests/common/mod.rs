//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_template_file("web", "README.md", "# [REPO_NAME]");
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Common `stencil.yaml` manifests for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Substitute slots in text files only.
    pub const TEXT_FILES: &str = r#"
slot-paths:
  - "**/*.txt"
  - "**/*.md"
"#;

    /// Declares a custom slot alongside the slot paths.
    pub const WITH_LICENSE: &str = r#"
slots:
  "[LICENSE]": MIT
slot-paths:
  - "**/*.md"
"#;

    /// Not a mapping at all.
    pub const INVALID: &str = "- just\n- a list\n";
}

/// A temporary workspace holding a templates directory and an output area.
///
/// ```text
/// <tmp>/templates/<name>/...   local templates
/// <tmp>/work/                  current directory for the CLI
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new fixture with empty `templates/` and `work/` directories.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("templates")
            .create_dir_all()
            .expect("Failed to create templates directory");
        temp_dir
            .child("work")
            .create_dir_all()
            .expect("Failed to create work directory");
        Self { temp_dir }
    }

    /// Add a file to the named template.
    pub fn with_template_file(self, template: &str, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("templates")
            .child(template)
            .child(path)
            .write_str(content)
            .expect("Failed to write template file");
        self
    }

    /// Add a `stencil.yaml` manifest to the named template.
    #[allow(dead_code)]
    pub fn with_manifest(self, template: &str, content: &str) -> Self {
        self.with_template_file(template, "stencil.yaml", content)
    }

    /// The templates directory.
    pub fn templates_dir(&self) -> PathBuf {
        self.temp_dir.path().join("templates")
    }

    /// Root of a single template.
    #[allow(dead_code)]
    pub fn template_path(&self, template: &str) -> PathBuf {
        self.templates_dir().join(template)
    }

    /// The working directory the CLI runs in.
    pub fn work_dir(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    /// A path inside the working directory.
    pub fn output(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("work").child(path)
    }

    /// Root of the fixture.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A `stencil` command running in `work/`, isolated from the user's
    /// environment: no token, no global git identity, fixed templates dir.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stencil");
        cmd.current_dir(self.work_dir())
            .env_remove("GITHUB_TOKEN")
            .env_remove("RUST_LOG")
            .env("STENCIL_TEMPLATES", self.templates_dir())
            .env("GIT_CONFIG_GLOBAL", self.temp_dir.path().join("no-gitconfig"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
