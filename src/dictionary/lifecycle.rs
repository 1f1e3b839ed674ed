//! Single-writer lifecycle of the published emoji dictionary.
//!
//! Readers hold a [`DictionaryReader`] and only ever clone the published
//! pointer under a short read lock. All loading and closing happens on the
//! writer side, serialized by a mutex, and a new dictionary is published only
//! once it is fully loaded. The old one is closed in the same critical section,
//! so readers never see two ready dictionaries.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::{PaletteError, Result};

use super::{DictionaryStore, EmojiDictionary, dictionary_file_name, normalize_locale};

/// Observable lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DictionaryState {
    /// No dictionary; lookups answer "no description".
    Absent,
    /// A dictionary is being opened; lookups answer "no description".
    Loading,
    /// A dictionary is published and answers lookups.
    Ready,
}

/// Result of [`DictionaryLifecycle::install_from_download`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The file was cached and the dictionary swapped in.
    Installed {
        /// Installed file.
        path: PathBuf,
    },
    /// The download targeted a locale that is no longer active; nothing changed.
    Discarded {
        /// Locale that is active now.
        active: Option<String>,
    },
}

/// Published slot shared with readers.
#[derive(Debug)]
struct Slot {
    /// Current state.
    state: DictionaryState,
    /// Ready dictionary, present only in `Ready`.
    handle: Option<Arc<EmojiDictionary>>,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            state: DictionaryState::Absent,
            handle: None,
        }
    }
}

/// Cheap, cloneable read access to the published dictionary.
#[derive(Clone, Debug, Default)]
pub struct DictionaryReader {
    /// Slot written by the lifecycle.
    slot: Arc<RwLock<Slot>>,
}

impl DictionaryReader {
    /// What: Snapshot of the ready dictionary.
    ///
    /// Output:
    /// - `Some` only while a dictionary is published and open.
    ///
    /// Details:
    /// - Never performs I/O; the read lock is held only to clone the pointer.
    #[must_use]
    pub fn current(&self) -> Option<Arc<EmojiDictionary>> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.handle.as_ref().filter(|d| d.is_open()).cloned()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DictionaryState {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
    }

    /// Whether a dictionary is ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.current().is_some()
    }
}

/// Writer-side bookkeeping.
#[derive(Debug, Default)]
struct Writer {
    /// Locale most recently requested through `ensure_for_locale`.
    active_locale: Option<String>,
}

/// What: Owner of the process-wide dictionary handle.
///
/// Details:
/// - Only this type mutates the published slot.
/// - All methods take `&self`; share it behind an `Arc` when a download callback runs elsewhere.
pub struct DictionaryLifecycle {
    /// Resolve/open/install collaborator.
    store: Arc<dyn DictionaryStore>,
    /// Published slot, also handed to readers.
    reader: DictionaryReader,
    /// Serializes writers.
    writer: Mutex<Writer>,
}

impl DictionaryLifecycle {
    /// Create an `Absent` lifecycle over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DictionaryStore>) -> Self {
        Self {
            store,
            reader: DictionaryReader::default(),
            writer: Mutex::new(Writer::default()),
        }
    }

    /// A reader sharing this lifecycle's published slot.
    #[must_use]
    pub fn reader(&self) -> DictionaryReader {
        self.reader.clone()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DictionaryState {
        self.reader.state()
    }

    /// Locale most recently requested through [`Self::ensure_for_locale`].
    #[must_use]
    pub fn active_locale(&self) -> Option<String> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active_locale
            .clone()
    }

    /// What: The ready dictionary, or an error naming the active locale.
    ///
    /// # Errors
    /// - `PaletteError::DictionaryUnavailable` while `Absent` or `Loading`.
    pub fn require_ready(&self) -> Result<Arc<EmojiDictionary>> {
        self.reader
            .current()
            .ok_or_else(|| PaletteError::DictionaryUnavailable {
                locale: self.active_locale().unwrap_or_default(),
            })
    }

    /// Replace the published slot, closing whatever was there.
    fn publish(&self, state: DictionaryState, handle: Option<Arc<EmojiDictionary>>) {
        let mut slot = self
            .reader
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = slot.handle.take() {
            old.close();
            tracing::debug!(locale = old.locale(), "closed emoji dictionary");
        }
        slot.handle = handle;
        slot.state = state;
    }

    /// What: Make the dictionary for `locale` the published one.
    ///
    /// Inputs:
    /// - `locale`: Active input locale; recorded as the active locale for later installs.
    ///
    /// Output:
    /// - Resulting state: `Ready` when a cached dictionary opened, `Absent` otherwise.
    ///
    /// Details:
    /// - No-op when the published dictionary already serves `locale`.
    /// - Otherwise the current dictionary is closed first, then the cached file is resolved and
    ///   opened. A missing file or an open failure leaves the lifecycle `Absent`.
    pub fn ensure_for_locale(&self, locale: &str) -> DictionaryState {
        let locale = normalize_locale(locale);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.active_locale = Some(locale.clone());
        if self
            .reader
            .current()
            .is_some_and(|d| d.is_for_locale(&locale))
        {
            return DictionaryState::Ready;
        }
        self.publish(DictionaryState::Loading, None);
        let Some(path) = self.store.resolve_cached(&locale) else {
            tracing::info!(locale, "no cached emoji dictionary; search has no descriptions");
            self.publish(DictionaryState::Absent, None);
            return DictionaryState::Absent;
        };
        match self.store.open(&path, &locale) {
            Ok(dict) => {
                tracing::info!(
                    locale,
                    path = %path.display(),
                    entries = dict.len(),
                    "emoji dictionary ready"
                );
                self.publish(DictionaryState::Ready, Some(Arc::new(dict)));
                DictionaryState::Ready
            }
            Err(e) => {
                tracing::warn!(
                    locale,
                    path = %path.display(),
                    error = %e,
                    "failed to open cached emoji dictionary"
                );
                self.publish(DictionaryState::Absent, None);
                DictionaryState::Absent
            }
        }
    }

    /// Close and unpublish the current dictionary; safe when already `Absent`.
    pub fn close(&self) {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.publish(DictionaryState::Absent, None);
    }

    /// What: Install downloaded dictionary bytes and hot-swap them in.
    ///
    /// Inputs:
    /// - `bytes`: Complete downloaded file.
    /// - `locale`: Locale the download was started for.
    ///
    /// Output:
    /// - `InstallOutcome::Discarded` when `locale` is no longer the active locale.
    /// - `InstallOutcome::Installed` after the file is cached and the new dictionary published.
    ///
    /// # Errors
    /// - `PaletteError::DownloadInstallFailed` when the bytes do not parse, cannot be written to
    ///   the cache, or the cached file cannot be opened. The previously published dictionary, if
    ///   any, stays in place.
    ///
    /// Details:
    /// - The bytes are validated before anything on disk is replaced.
    /// - Installing twice for the same locale reloads and is otherwise harmless.
    pub fn install_from_download(&self, bytes: &[u8], locale: &str) -> Result<InstallOutcome> {
        let locale = normalize_locale(locale);
        let writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if writer.active_locale.as_deref() != Some(locale.as_str()) {
            tracing::debug!(
                target_locale = locale,
                active = ?writer.active_locale,
                "discarding dictionary download for inactive locale"
            );
            return Ok(InstallOutcome::Discarded {
                active: writer.active_locale.clone(),
            });
        }
        let failed = |e: PaletteError| PaletteError::DownloadInstallFailed {
            locale: locale.clone(),
            reason: e.to_string(),
        };
        EmojiDictionary::parse(
            std::path::Path::new(&dictionary_file_name(&locale)),
            &locale,
            bytes,
        )
        .map_err(failed)?;
        let path = self.store.move_to_cache(bytes, &locale).map_err(failed)?;
        let dict = self.store.open(&path, &locale).map_err(failed)?;
        tracing::info!(
            locale,
            path = %path.display(),
            entries = dict.len(),
            "installed downloaded emoji dictionary"
        );
        self.publish(DictionaryState::Ready, Some(Arc::new(dict)));
        Ok(InstallOutcome::Installed { path })
    }
}
