//! On-disk dictionary formats.
//!
//! Two formats are accepted:
//!
//! - JSON: `{"locale": "en", "entries": [{"word": "😀", "shortcuts": ["grinning face"]}]}`
//! - AOSP combined word list, one attribute list per line:
//!
//! ```text
//! dictionary=emoji_en,locale=en,description=Emoji,version=1
//!  word=😀,f=200
//!   shortcut=grinning face,f=whitelist
//! ```
//!
//! Attribute values may contain `\,` for a literal comma.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PaletteError, Result};

use super::WordProperty;

/// Parsed content before it becomes an `EmojiDictionary`.
pub(super) struct ParsedDictionary {
    /// Locale declared by the file header, if any.
    pub locale: Option<String>,
    /// Entries in file order.
    pub entries: Vec<WordProperty>,
}

/// JSON document layout.
#[derive(Deserialize)]
struct JsonDictionary {
    /// Optional declared locale.
    #[serde(default)]
    locale: Option<String>,
    /// Word entries.
    #[serde(default)]
    entries: Vec<WordProperty>,
}

/// Detect the format from the first non-blank byte and parse.
pub(super) fn parse(path: &Path, bytes: &[u8]) -> Result<ParsedDictionary> {
    let text = std::str::from_utf8(bytes).map_err(|e| PaletteError::DictionaryFormat {
        path: path.to_path_buf(),
        reason: format!("not UTF-8: {e}"),
    })?;
    let text = text.trim_start_matches('\u{feff}');
    if text.trim_start().starts_with('{') {
        parse_json(path, text)
    } else {
        parse_combined(path, text)
    }
}

/// Parse the JSON layout.
fn parse_json(path: &Path, text: &str) -> Result<ParsedDictionary> {
    let doc: JsonDictionary =
        serde_json::from_str(text).map_err(|e| PaletteError::DictionaryFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(ParsedDictionary {
        locale: doc.locale,
        entries: doc.entries,
    })
}

/// What: Parse the AOSP combined word-list layout.
///
/// Details:
/// - Blank lines and `#` comments are skipped.
/// - A `shortcut=` line attaches to the most recent `word=` line; one before any word is an error.
/// - Unknown attributes (`f`, `flags`, `possibly_offensive`, ...) are ignored.
/// - A file with neither a header nor any word is rejected, so arbitrary binary-ish text
///   does not silently open as an empty dictionary.
fn parse_combined(path: &Path, text: &str) -> Result<ParsedDictionary> {
    let fail = |line_no: usize, reason: &str| PaletteError::DictionaryFormat {
        path: path.to_path_buf(),
        reason: format!("line {line_no}: {reason}"),
    };
    let mut locale = None;
    let mut saw_header = false;
    let mut entries: Vec<WordProperty> = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let attrs = split_attributes(trimmed);
        let Some((key, value)) = attrs.first() else {
            continue;
        };
        match key.as_str() {
            "dictionary" => {
                saw_header = true;
                locale = attrs
                    .iter()
                    .find(|(k, _)| k == "locale")
                    .map(|(_, v)| v.clone());
            }
            "word" => {
                if value.is_empty() {
                    return Err(fail(line_no, "empty word"));
                }
                entries.push(WordProperty {
                    word: value.clone(),
                    shortcuts: Vec::new(),
                });
            }
            "shortcut" => {
                let Some(entry) = entries.last_mut() else {
                    return Err(fail(line_no, "shortcut before any word"));
                };
                if !value.is_empty() {
                    entry.shortcuts.push(value.clone());
                }
            }
            // Bigrams and other per-word attributes carry nothing searchable.
            _ => {}
        }
    }
    if !saw_header && entries.is_empty() {
        return Err(fail(0, "no dictionary header and no words"));
    }
    Ok(ParsedDictionary { locale, entries })
}

/// Split `a=1,b=x\,y` into `[("a","1"), ("b","x,y")]`.
fn split_attributes(line: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ',' => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
        .into_iter()
        .filter_map(|field| {
            let (k, v) = field.split_once('=')?;
            Some((k.trim().to_string(), v.trim().to_string()))
        })
        .collect()
}
