//! Emoji search index.
//!
//! Flat list of every non-recents emoji key plus description lookup through the
//! currently published dictionary.

use std::sync::OnceLock;

use crate::dictionary::{DictionaryReader, EmojiDictionary};
use crate::state::CategoryModel;

/// Maximum number of search results returned for one query.
pub const MAX_SEARCH_RESULTS: usize = 50;

/// What: Lazily built key list with dictionary-backed search.
///
/// Details:
/// - The key list is built on first use from [`CategoryModel::all_emoji_keys`] and kept until
///   [`EmojiIndex::invalidate`].
/// - Descriptions come from whatever dictionary the lifecycle has published at call time.
#[derive(Debug)]
pub struct EmojiIndex {
    /// Cached concatenation of all category keys.
    keys: OnceLock<Vec<String>>,
    /// Read side of the dictionary lifecycle.
    reader: DictionaryReader,
}

impl EmojiIndex {
    /// Create an index reading descriptions through `reader`.
    #[must_use]
    pub const fn new(reader: DictionaryReader) -> Self {
        Self {
            keys: OnceLock::new(),
            reader,
        }
    }

    /// Every known emoji key in display order, built on first call.
    pub fn all_keys(&self, model: &CategoryModel) -> &[String] {
        self.keys.get_or_init(|| {
            let keys = model.all_emoji_keys();
            tracing::debug!(count = keys.len(), "built emoji key index");
            keys
        })
    }

    /// Drop the cached key list; the next access rebuilds it.
    pub fn invalidate(&mut self) {
        self.keys.take();
    }

    /// Description of `key` in the ready dictionary, if any.
    #[must_use]
    pub fn describe(&self, key: &str) -> Option<String> {
        self.reader
            .current()
            .and_then(|d| d.description(key).map(str::to_string))
    }

    /// Whether a dictionary answers lookups right now.
    #[must_use]
    pub fn has_dictionary(&self) -> bool {
        self.reader.is_ready()
    }

    /// What: Find emoji whose description contains `query`.
    ///
    /// Inputs:
    /// - `model`: Source of the key list.
    /// - `query`: Raw query; compared case-insensitively and not trimmed.
    ///
    /// Output:
    /// - Up to [`MAX_SEARCH_RESULTS`] keys in index order; empty for an empty query or when no
    ///   dictionary is ready.
    ///
    /// Details:
    /// - One dictionary snapshot serves the whole scan, so a concurrent swap cannot mix
    ///   descriptions of two locales in one result list.
    pub fn search(&self, model: &CategoryModel, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        let Some(dict) = self.reader.current() else {
            return Vec::new();
        };
        let needle = query.to_lowercase();
        let results = Self::scan(self.all_keys(model), &dict, &needle);
        tracing::debug!(query, results = results.len(), "emoji search");
        results
    }

    /// Substring scan over `keys` against one dictionary.
    fn scan(keys: &[String], dict: &EmojiDictionary, needle: &str) -> Vec<String> {
        keys.iter()
            .filter(|key| {
                dict.description(key)
                    .is_some_and(|d| d.to_lowercase().contains(needle))
            })
            .take(MAX_SEARCH_RESULTS)
            .cloned()
            .collect()
    }
}
