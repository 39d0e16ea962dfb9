//! Slot substitution for template file contents
//!
//! Slots are literal tokens such as `[REPO_NAME]`. Substitution is opt-in per
//! file: only files whose destination path matches one of the configured
//! slot path globs are rewritten, everything else is written byte-for-byte.
//!
//! All tokens are replaced in a single pass over the content using one
//! combined alternation of escaped tokens, so a replacement value that
//! happens to contain another token is never substituted again.

use crate::config::ScaffoldConfig;
use crate::error::Result;
use glob::{MatchOptions, Pattern};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// `*` and `?` stop at path separators, as in shell globbing. `**/` still
/// matches any number of directories.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Precompiled slot substitution for one scaffold configuration.
#[derive(Debug, Clone)]
pub struct SlotReplacer {
    patterns: Vec<Pattern>,
    slots: HashMap<String, String>,
    regex: Regex,
}

impl SlotReplacer {
    /// Compile the slot path globs and the token alternation.
    pub fn new(config: &ScaffoldConfig) -> Result<Self> {
        let patterns = config
            .slot_paths
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let slots = config.slot_map();
        let regex = Regex::new(&alternation(slots.keys().map(String::as_str)))?;

        Ok(Self {
            patterns,
            slots,
            regex,
        })
    }

    /// Whether the file at `path` receives substitution.
    ///
    /// A pattern matches if it matches `path` itself, or `path` relative to
    /// `root` when a root is given.
    pub fn applies_to(&self, path: &Path, root: Option<&Path>) -> bool {
        let relative = root.and_then(|r| path.strip_prefix(r).ok());
        self.patterns.iter().any(|pattern| {
            pattern.matches_path_with(path, MATCH_OPTIONS)
                || relative.is_some_and(|rel| pattern.matches_path_with(rel, MATCH_OPTIONS))
        })
    }

    /// Replace every slot occurrence in `content` if `path` is selected.
    ///
    /// Returns the content unchanged (borrowed) otherwise.
    pub fn replace<'a>(&self, path: &Path, root: Option<&Path>, content: &'a str) -> Cow<'a, str> {
        if !self.applies_to(path, root) {
            return Cow::Borrowed(content);
        }
        self.replace_all(content)
    }

    /// Replace every slot occurrence regardless of the slot paths.
    pub fn replace_all<'a>(&self, content: &'a str) -> Cow<'a, str> {
        self.regex.replace_all(content, |caps: &Captures<'_>| {
            self.slots.get(&caps[0]).map_or("", String::as_str)
        })
    }
}

/// Build one alternation pattern from literal tokens.
///
/// Longer tokens come first so a token that is a prefix of another never
/// shadows it; ties are ordered lexicographically so the pattern does not
/// depend on map iteration order.
fn alternation<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    let mut tokens: Vec<&str> = tokens.collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    tokens
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

/// One-shot substitution of `content` destined for `path`.
///
/// Builds a `SlotReplacer` for a single call; the materializer keeps one
/// replacer for the whole walk instead.
pub fn replace_slots(path: &Path, content: &str, config: &ScaffoldConfig) -> Result<String> {
    let replacer = SlotReplacer::new(config)?;
    Ok(replacer.replace(path, None, content).into_owned())
}
