//! Dictionary cache: resolve, open and install dictionary files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PaletteError, Result};

use super::{EmojiDictionary, language_of, normalize_locale};

/// What: Collaborator interface for locating and opening dictionaries.
///
/// Details:
/// - `resolve_cached` and `open` back `DictionaryLifecycle::ensure_for_locale`.
/// - `move_to_cache` backs `DictionaryLifecycle::install_from_download`.
/// - Implementations must be callable from any thread; the lifecycle serializes writers itself.
pub trait DictionaryStore: Send + Sync {
    /// Cached dictionary file for `locale`, if one exists.
    fn resolve_cached(&self, locale: &str) -> Option<PathBuf>;

    /// What: Open and fully load the dictionary at `path`.
    ///
    /// # Errors
    /// - Any I/O or format failure; the lifecycle treats it as "no dictionary".
    fn open(&self, path: &Path, locale: &str) -> Result<EmojiDictionary>;

    /// What: Store downloaded bytes as the cached dictionary for `locale`.
    ///
    /// Output:
    /// - Path of the installed file.
    ///
    /// # Errors
    /// - I/O failures while creating the directory or writing the file.
    fn move_to_cache(&self, bytes: &[u8], locale: &str) -> Result<PathBuf>;
}

/// File name used for a locale's emoji dictionary: `emoji_<lang>.dict`.
#[must_use]
pub fn dictionary_file_name(locale: &str) -> String {
    format!("emoji_{}.dict", language_of(locale))
}

/// What: Filesystem-backed store rooted at a dictionaries directory.
///
/// Details:
/// - Layout: `<root>/<normalized locale>/emoji_<lang>.dict`.
/// - Lookup for `en_us` tries `<root>/en_us/` first, then `<root>/en/`.
/// - Any file in the locale directory whose name starts with `emoji` counts as the emoji
///   dictionary; the lexicographically first one wins so the choice is deterministic.
#[derive(Clone, Debug)]
pub struct FsDictionaryStore {
    /// Root directory holding one subdirectory per locale.
    root: PathBuf,
}

impl FsDictionaryStore {
    /// Create a store rooted at `root` (created lazily on first install).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the dictionaries of `locale`.
    #[must_use]
    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        self.root.join(normalize_locale(locale))
    }

    /// First `emoji*` file (excluding partial downloads) in `dir`.
    fn find_emoji_file(dir: &Path) -> Option<PathBuf> {
        let entries = fs::read_dir(dir).ok()?;
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("emoji") && !n.ends_with(".part"))
            })
            .collect();
        candidates.sort();
        candidates.into_iter().next()
    }
}

impl DictionaryStore for FsDictionaryStore {
    fn resolve_cached(&self, locale: &str) -> Option<PathBuf> {
        let normalized = normalize_locale(locale);
        let lang = language_of(&normalized);
        let mut dirs = vec![self.root.join(&normalized)];
        if lang != normalized {
            dirs.push(self.root.join(&lang));
        }
        dirs.iter().find_map(|d| Self::find_emoji_file(d))
    }

    fn open(&self, path: &Path, locale: &str) -> Result<EmojiDictionary> {
        let bytes = fs::read(path)
            .map_err(|e| PaletteError::io(format!("read dictionary {}", path.display()), e))?;
        let dict = EmojiDictionary::parse(path, locale, &bytes)?;
        tracing::debug!(
            path = %path.display(),
            locale,
            entries = dict.len(),
            "opened emoji dictionary"
        );
        Ok(dict)
    }

    fn move_to_cache(&self, bytes: &[u8], locale: &str) -> Result<PathBuf> {
        let dir = self.locale_dir(locale);
        fs::create_dir_all(&dir)
            .map_err(|e| PaletteError::io(format!("create {}", dir.display()), e))?;
        let target = dir.join(dictionary_file_name(locale));
        let partial = dir.join(format!("{}.part", dictionary_file_name(locale)));
        fs::write(&partial, bytes)
            .map_err(|e| PaletteError::io(format!("write {}", partial.display()), e))?;
        if let Err(e) = fs::rename(&partial, &target) {
            let _ = fs::remove_file(&partial);
            return Err(PaletteError::io(format!("install {}", target.display()), e));
        }
        tracing::info!(
            path = %target.display(),
            bytes = bytes.len(),
            "installed emoji dictionary into cache"
        );
        Ok(target)
    }
}
