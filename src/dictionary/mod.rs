//! Locale-scoped emoji description dictionaries.
//!
//! A dictionary maps an emoji key to its word entry; the first shortcut target of
//! an entry is the emoji's description. Dictionaries are produced by a
//! [`DictionaryStore`] and published to readers by [`DictionaryLifecycle`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod download;
mod format;
mod lifecycle;
mod store;

pub use download::{DownloadOutcome, DownloadRequest, dictionary_url, download_in_background};
pub use lifecycle::{DictionaryLifecycle, DictionaryReader, DictionaryState, InstallOutcome};
pub use store::{DictionaryStore, FsDictionaryStore, dictionary_file_name};

/// One dictionary entry: an emoji and its shortcut targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordProperty {
    /// The emoji key.
    pub word: String,
    /// Shortcut targets in file order; the first is the description.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shortcuts: Vec<String>,
}

impl WordProperty {
    /// Whether the entry carries any shortcut target.
    #[must_use]
    pub const fn has_shortcuts(&self) -> bool {
        !self.shortcuts.is_empty()
    }
}

/// What: An opened emoji dictionary for one locale.
///
/// Details:
/// - Lookups return nothing once [`EmojiDictionary::close`] was called, so a reader still holding
///   the handle after a swap cannot observe a closed dictionary's entries.
#[derive(Debug)]
pub struct EmojiDictionary {
    /// Normalized locale the dictionary was opened for.
    locale: String,
    /// File the entries were read from.
    source: PathBuf,
    /// Entries keyed by emoji.
    entries: HashMap<String, WordProperty>,
    /// Cleared by `close`.
    open: AtomicBool,
}

impl EmojiDictionary {
    /// Build an open dictionary from already-parsed entries; later duplicates win.
    #[must_use]
    pub fn new(locale: &str, source: PathBuf, entries: Vec<WordProperty>) -> Self {
        let entries = entries.into_iter().map(|e| (e.word.clone(), e)).collect();
        Self {
            locale: normalize_locale(locale),
            source,
            entries,
            open: AtomicBool::new(true),
        }
    }

    /// What: Parse dictionary bytes in either supported format.
    ///
    /// Inputs:
    /// - `path`: Source file, used for error messages and [`Self::source`].
    /// - `locale`: Locale the caller opens the dictionary for.
    /// - `bytes`: File content; JSON when it starts with `{`, else AOSP combined word list.
    ///
    /// # Errors
    /// - `PaletteError::DictionaryFormat` when the content is not valid UTF-8 or fails to parse.
    pub fn parse(path: &Path, locale: &str, bytes: &[u8]) -> Result<Self> {
        let parsed = format::parse(path, bytes)?;
        if let Some(declared) = parsed.locale.as_deref()
            && !locales_match(declared, locale)
        {
            tracing::debug!(
                path = %path.display(),
                declared,
                requested = locale,
                "dictionary header locale differs from requested locale"
            );
        }
        Ok(Self::new(locale, path.to_path_buf(), parsed.entries))
    }

    /// Normalized locale of this dictionary.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether the dictionary serves `locale` (after normalization).
    #[must_use]
    pub fn is_for_locale(&self, locale: &str) -> bool {
        locales_match(&self.locale, locale)
    }

    /// File the dictionary was read from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Entry for `word`, or `None` when absent or the dictionary is closed.
    #[must_use]
    pub fn word_property(&self, word: &str) -> Option<&WordProperty> {
        if !self.is_open() {
            return None;
        }
        self.entries.get(word)
    }

    /// First shortcut target of `word`'s entry.
    #[must_use]
    pub fn description(&self, word: &str) -> Option<&str> {
        self.word_property(word)
            .filter(|wp| wp.has_shortcuts())
            .and_then(|wp| wp.shortcuts.first())
            .map(String::as_str)
    }

    /// Release the dictionary; further lookups return `None`.
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    /// Whether [`Self::close`] has not been called yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What: Normalize a locale tag for comparisons and directory names.
///
/// Inputs:
/// - `locale`: Tag such as `en-US`, `en_us` or ` DE `.
///
/// Output:
/// - Lowercase, trimmed, `_`-separated form (`en_us`, `de`).
#[must_use]
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().to_lowercase().replace('-', "_")
}

/// Language part of a locale (`en_us` → `en`).
#[must_use]
pub fn language_of(locale: &str) -> String {
    let normalized = normalize_locale(locale);
    normalized
        .split('_')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Compare locales after normalization.
#[must_use]
pub fn locales_match(a: &str, b: &str) -> bool {
    normalize_locale(a) == normalize_locale(b)
}
