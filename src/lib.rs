//! # Stencil Library
//!
//! This library provides the core of the `stencil` project scaffolder: given
//! a template (a local directory or a directory in a GitHub repository), it
//! materializes a new project, substituting placeholder slots with
//! user-supplied values, and can then initialize git and install packages.
//!
//! ## Quick Example
//!
//! ```no_run
//! use stencil::config::ScaffoldConfig;
//! use stencil::materialize::copy_directory;
//! use std::path::Path;
//!
//! let config = ScaffoldConfig::new("widget", "Ada").with_slot_path("**/*.md");
//! let report = copy_directory(
//!     Path::new("templates/rust-cli"),
//!     Path::new("widget"),
//!     &config,
//! )
//! .unwrap();
//!
//! for record in &report.package_map {
//!     stencil::actions::install_packages(record.manager, &record.path).unwrap();
//! }
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The validated `ScaffoldConfig` and the
//!   optional `stencil.yaml` manifest a template can ship.
//! - **Slots (`slots`)**: Literal placeholder tokens replaced in one pass,
//!   only in files selected by the slot path globs.
//! - **Sources (`source`)**: Local and GitHub template trees behind the
//!   `TemplateSource` trait, plus discovery of local templates.
//! - **Materializer (`materialize`)**: The recursive copy-and-substitute walk,
//!   which also records package-manager lock files.
//! - **Actions (`actions`)**: `git init` and `<manager> install` on the result.

pub mod actions;
pub mod config;
pub mod defaults;
pub mod error;
pub mod materialize;
pub mod output;
pub mod slots;
pub mod source;

#[cfg(test)]
mod slots_proptest;
