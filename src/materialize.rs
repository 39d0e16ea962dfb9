//! # Tree Materializer
//!
//! Mirrors a template tree into a destination directory. Every file is read
//! from the source, passed through slot substitution and written under the
//! same relative path; every directory is recreated and descended into.
//!
//! While walking, the materializer records the package-manager lock files it
//! sees (`package-lock.json`, `yarn.lock`, `pnpm-lock.yaml`) together with
//! the destination directory that contains them. The resulting `PackageMap`
//! tells the caller where to run `<manager> install` afterwards.
//!
//! The walk is sequential and depth-first. Children are visited in the order
//! the source lists them, and each file is fully written before the next
//! sibling is processed. The first error aborts the walk; files already
//! written are left in place.

use crate::config::{ScaffoldConfig, MANIFEST_FILE};
use crate::error::Result;
use crate::slots::SlotReplacer;
use crate::source::{EntryKind, GitHubSource, LocalSource, TemplateSource};
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Package managers recognised from their lock files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Checked in this order by `detect`.
    const ALL: [PackageManager; 3] = [PackageManager::Npm, PackageManager::Yarn, PackageManager::Pnpm];

    /// The package manager whose lock-file name occurs in `path`, if any.
    ///
    /// This is a substring match over the whole path.
    pub fn detect(path: &Path) -> Option<Self> {
        let path = path.to_string_lossy();
        Self::ALL
            .into_iter()
            .find(|manager| path.contains(manager.lock_file()))
    }

    /// Executable invoked for `install`.
    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Name of the lock file that identifies this manager.
    pub fn lock_file(self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Pnpm => "pnpm-lock.yaml",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// A lock-file sighting: `manager` should install in `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub manager: PackageManager,
    /// Destination directory containing the lock file.
    pub path: PathBuf,
}

/// Lock-file sightings in the order they were encountered.
///
/// Only grows during a materialization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMap {
    records: Vec<PackageRecord>,
}

impl PackageMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, manager: PackageManager, path: PathBuf) {
        self.records.push(PackageRecord { manager, path });
    }

    pub fn records(&self) -> &[PackageRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackageRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a PackageMap {
    type Item = &'a PackageRecord;
    type IntoIter = std::slice::Iter<'a, PackageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Outcome of a completed materialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Number of files written.
    pub files_written: usize,
    /// Lock files seen during the walk.
    pub package_map: PackageMap,
}

/// Recursive copy-and-substitute over any `TemplateSource`.
#[derive(Debug)]
pub struct Materializer {
    replacer: SlotReplacer,
    package_map: PackageMap,
    files_written: usize,
    skip_manifest: bool,
}

impl Materializer {
    /// Validate `config` and prepare its slot substitution.
    ///
    /// Nothing touches the filesystem or the network before this succeeds.
    pub fn new(config: &ScaffoldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            replacer: SlotReplacer::new(config)?,
            package_map: PackageMap::new(),
            files_written: 0,
            skip_manifest: false,
        })
    }

    /// Leave the template's root `stencil.yaml` out of the output.
    ///
    /// Used once the manifest has been applied to the configuration.
    pub fn skip_template_manifest(mut self) -> Self {
        self.skip_manifest = true;
        self
    }

    /// Mirror the tree below `node` into `dest`.
    ///
    /// `dest` is created if missing. Slot paths are matched against each
    /// file's absolute destination path and against its path relative to
    /// `dest`.
    pub fn materialize<S: TemplateSource>(
        &mut self,
        source: &S,
        node: &S::Node,
        dest: &Path,
    ) -> Result<()> {
        let root = std::path::absolute(dest)?;
        info!("Materializing {:?} into {}", node, root.display());
        self.walk(source, node, &root, &root)
    }

    fn walk<S: TemplateSource>(
        &mut self,
        source: &S,
        node: &S::Node,
        dest: &Path,
        root: &Path,
    ) -> Result<()> {
        fs::create_dir_all(dest)?;
        let dest = std::path::absolute(dest)?;

        for entry in source.list(node)? {
            match entry.kind {
                EntryKind::File => {
                    if self.skip_manifest
                        && dest.as_path() == root
                        && entry.name == MANIFEST_FILE
                    {
                        debug!("Skipping template manifest {}", entry.name);
                        continue;
                    }

                    let content = source.read_file(&entry.node)?;
                    let file_path = dest.join(&entry.name);

                    if let Some(manager) = PackageManager::detect(&file_path) {
                        debug!("Found {} lock file in {}", manager, dest.display());
                        self.package_map.record(manager, dest.clone());
                    }

                    if !self.replacer.applies_to(&file_path, Some(root)) {
                        fs::write(&file_path, &content)?;
                    } else if let Ok(text) = std::str::from_utf8(&content) {
                        fs::write(&file_path, self.replacer.replace_all(text).as_bytes())?;
                    } else {
                        debug!("{} is not UTF-8, copying unchanged", file_path.display());
                        fs::write(&file_path, &content)?;
                    }
                    self.files_written += 1;
                    debug!("Wrote {}", file_path.display());
                }
                EntryKind::Directory => {
                    self.walk(source, &entry.node, &dest.join(&entry.name), root)?;
                }
                EntryKind::Other(kind) => {
                    warn!("Unknown type for {} ({}), skipping", entry.name, kind);
                }
            }
        }

        Ok(())
    }

    /// Lock files seen so far.
    pub fn package_map(&self) -> &PackageMap {
        &self.package_map
    }

    /// Consume the materializer and return what it did.
    pub fn finish(self) -> ScaffoldReport {
        ScaffoldReport {
            files_written: self.files_written,
            package_map: self.package_map,
        }
    }
}

/// Materialize a local template directory into `dest`.
pub fn copy_directory(src: &Path, dest: &Path, config: &ScaffoldConfig) -> Result<ScaffoldReport> {
    let mut materializer = Materializer::new(config)?;
    materializer.materialize(&LocalSource, &src.to_path_buf(), dest)?;
    Ok(materializer.finish())
}

/// Materialize a GitHub contents API directory into `dest`.
///
/// Authenticates with `config.access_token` when set.
pub fn download_directory(url: &str, dest: &Path, config: &ScaffoldConfig) -> Result<ScaffoldReport> {
    let mut materializer = Materializer::new(config)?;
    let source = GitHubSource::with_token(config.access_token.clone())?;
    materializer.materialize(&source, &url.to_string(), dest)?;
    Ok(materializer.finish())
}
