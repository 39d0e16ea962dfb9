//! # Template Sources
//!
//! This module lists and reads the nodes of a template tree. The materializer
//! is written against the `TemplateSource` trait and does not care whether
//! the tree lives on the local disk or in a GitHub repository.
//!
//! ## Design
//!
//! - **`LocalSource`**: Reads a directory with `std::fs`. Children come back
//!   in the order the platform returns them; they are not sorted.
//!
//! - **`GitHubSource`**: Walks the GitHub contents API. The HTTP layer sits
//!   behind the `ContentApi` trait so tests can serve canned listings
//!   without touching the network; `HttpContentApi` is the real
//!   implementation built on a blocking `reqwest` client.
//!
//! Local templates are also discoverable by name: every sub-directory of a
//! template root is a template (`list_local_templates`).

use crate::config::{self, Manifest, MANIFEST_FILE};
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// How a child of a template tree node should be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Anything else (symlinks, submodules, sockets, ...), with a short
    /// description for diagnostics.
    Other(String),
}

/// One child of a template tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry<N> {
    /// File or directory name, without any parent path.
    pub name: String,
    pub kind: EntryKind,
    /// Handle used to list or read this entry.
    pub node: N,
}

/// A tree of template files that can be listed and read node by node.
pub trait TemplateSource {
    /// Identity of a node in the tree (a path, a URL, ...).
    type Node: Clone + fmt::Debug;

    /// List the immediate children of a directory node.
    fn list(&self, node: &Self::Node) -> Result<Vec<SourceEntry<Self::Node>>>;

    /// Read the raw bytes of a file node.
    fn read_file(&self, node: &Self::Node) -> Result<Vec<u8>>;
}

/// Template tree on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSource;

impl TemplateSource for LocalSource {
    type Node = PathBuf;

    fn list(&self, node: &PathBuf) -> Result<Vec<SourceEntry<PathBuf>>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(node)? {
            let entry = entry?;
            let path = entry.path();
            // lstat: a symlink is reported as such, not followed
            let file_type = fs::symlink_metadata(&path)?.file_type();
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_symlink() {
                EntryKind::Other("symlink".to_string())
            } else {
                EntryKind::Other("special file".to_string())
            };
            entries.push(SourceEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
                node: path,
            });
        }
        Ok(entries)
    }

    fn read_file(&self, node: &PathBuf) -> Result<Vec<u8>> {
        Ok(fs::read(node)?)
    }
}

/// A discoverable local template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Directory name of the template.
    pub name: String,
    /// Template root, `<templates root>/<name>`.
    pub path: PathBuf,
}

/// List the templates under `root`: every sub-directory is one template.
///
/// Plain files under the root are ignored.
pub fn list_local_templates(root: &Path) -> Result<Vec<TemplateDescriptor>> {
    Ok(LocalSource
        .list(&root.to_path_buf())?
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::Directory)
        .map(|entry| TemplateDescriptor {
            path: root.join(&entry.name),
            name: entry.name,
        })
        .collect())
}

/// Find a local template by name under `root`.
pub fn find_local_template(root: &Path, name: &str) -> Result<TemplateDescriptor> {
    let templates = if root.is_dir() {
        list_local_templates(root)?
    } else {
        Vec::new()
    };
    templates
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| Error::UnknownTemplate {
            name: name.to_string(),
            hint: Some(format!(
                "No directory named '{}' in {}; run `stencil list` to see available templates",
                name,
                root.display()
            )),
        })
}

/// Load the manifest at the root of any template tree, if it ships one.
///
/// Looks for a `stencil.yaml` file among the children of `root`, so a
/// missing manifest costs no extra request on remote sources.
pub fn read_manifest<S: TemplateSource>(source: &S, root: &S::Node) -> Result<Option<Manifest>> {
    let entry = match source
        .list(root)?
        .into_iter()
        .find(|entry| entry.kind == EntryKind::File && entry.name == MANIFEST_FILE)
    {
        Some(entry) => entry,
        None => return Ok(None),
    };

    let bytes = source.read_file(&entry.node)?;
    let text = String::from_utf8(bytes).map_err(|_| {
        Error::config_with_hint(
            format!("Invalid manifest: {} is not UTF-8", MANIFEST_FILE),
            "Save the manifest as UTF-8 text",
        )
    })?;
    config::parse(&text).map(Some)
}

/// Representation requested from the GitHub contents API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Directory listing as a JSON array.
    Json,
    /// The file's bytes.
    Raw,
}

impl ContentMode {
    /// Media type sent in the `Accept` header.
    pub fn accept_header(self) -> &'static str {
        match self {
            ContentMode::Json => "application/vnd.github.json",
            ContentMode::Raw => "application/vnd.github.raw",
        }
    }
}

/// Transport for the GitHub contents API - allows mocking in tests
pub trait ContentApi {
    /// GET `url` and return the response body.
    ///
    /// A non-success status must be reported as `Error::Api`.
    fn get(&self, url: &str, mode: ContentMode) -> Result<Vec<u8>>;
}

/// `ContentApi` backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    client: Client,
    token: Option<String>,
}

impl HttpContentApi {
    /// Create a client, optionally authenticating with a GitHub token.
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("stencil/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network {
                url: "https://api.github.com".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { client, token })
    }
}

impl ContentApi for HttpContentApi {
    fn get(&self, url: &str, mode: ContentMode) -> Result<Vec<u8>> {
        log::debug!("GET {} ({})", url, mode.accept_header());
        let mut request = self.client.get(url).header(ACCEPT, mode.accept_header());
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().map_err(|e| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.to_string(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().map_err(|e| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(body.to_vec())
    }
}

/// One item of a contents API directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl RemoteEntry {
    fn entry_kind(&self) -> EntryKind {
        match self.kind.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Directory,
            other => EntryKind::Other(other.to_string()),
        }
    }
}

/// Template tree in a GitHub repository, addressed by contents API URLs.
pub struct GitHubSource<A: ContentApi> {
    api: A,
}

impl GitHubSource<HttpContentApi> {
    /// Source talking to api.github.com over HTTPS.
    pub fn with_token(token: Option<String>) -> Result<Self> {
        Ok(Self::new(HttpContentApi::new(token)?))
    }
}

impl<A: ContentApi> GitHubSource<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

impl<A: ContentApi> TemplateSource for GitHubSource<A> {
    type Node = String;

    fn list(&self, node: &String) -> Result<Vec<SourceEntry<String>>> {
        let body = self.api.get(node, ContentMode::Json)?;
        let listing: Vec<RemoteEntry> = serde_json::from_slice(&body)?;
        Ok(listing
            .into_iter()
            .map(|entry| SourceEntry {
                kind: entry.entry_kind(),
                name: entry.name,
                node: entry.url,
            })
            .collect())
    }

    fn read_file(&self, node: &String) -> Result<Vec<u8>> {
        self.api.get(node, ContentMode::Raw)
    }
}

const GITHUB_API: &str = "https://api.github.com";

/// A directory inside a GitHub repository, optionally pinned to a ref.
///
/// Written `owner/repo[/path][@ref]`, e.g. `acme/templates/react@v2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub git_ref: Option<String>,
}

impl RemoteLocation {
    /// Parse the `owner/repo[/path][@ref]` shorthand.
    pub fn parse(input: &str) -> Result<Self> {
        let (location, git_ref) = match input.rsplit_once('@') {
            Some((location, r)) if !r.is_empty() => (location, Some(r.to_string())),
            Some(_) => return Err(invalid_location(input)),
            None => (input, None),
        };

        let mut parts = location.trim_matches('/').splitn(3, '/');
        let owner = parts.next().unwrap_or_default();
        let repo = parts.next().unwrap_or_default();
        if owner.is_empty() || repo.is_empty() {
            return Err(invalid_location(input));
        }
        let path = parts.next().unwrap_or_default().trim_matches('/');

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            path: path.to_string(),
            git_ref,
        })
    }

    /// Contents API URL listing this directory.
    pub fn contents_url(&self) -> Result<String> {
        let mut url = Url::parse(GITHUB_API)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::config(format!("Cannot build a URL from {}", GITHUB_API)))?;
            segments.extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"]);
            segments.extend(self.path.split('/').filter(|s| !s.is_empty()));
        }
        if let Some(git_ref) = &self.git_ref {
            url.query_pairs_mut().append_pair("ref", git_ref);
        }
        Ok(url.into())
    }
}

impl fmt::Display for RemoteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)?;
        if !self.path.is_empty() {
            write!(f, "/{}", self.path)?;
        }
        if let Some(git_ref) = &self.git_ref {
            write!(f, "@{}", git_ref)?;
        }
        Ok(())
    }
}

fn invalid_location(input: &str) -> Error {
    Error::config_with_hint(
        format!("Invalid GitHub template location '{}'", input),
        "Use owner/repo[/path][@ref] or a full contents API URL",
    )
}
