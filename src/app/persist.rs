use std::fs;
use std::path::Path;

use crate::palette::{EmojiPalette, PaletteView};

/// What: Read the persisted recents list.
///
/// Inputs:
/// - `path`: JSON file holding a most-recent-first array of emoji keys.
///
/// Output:
/// - The stored keys; empty when the file is missing or unreadable.
pub fn load_recents(path: &Path) -> Vec<String> {
    let Ok(s) = fs::read_to_string(path) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(&s) {
        Ok(keys) => {
            tracing::debug!(path = %path.display(), count = keys.len(), "[Persist] Loaded recent emoji");
            keys
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "[Persist] Ignoring unreadable recent emoji file"
            );
            Vec::new()
        }
    }
}

/// What: Persist the visible recents list to disk if it changed.
///
/// Inputs:
/// - `palette`: Controller whose dirty flag and recents store are used.
/// - `path`: Destination JSON file.
///
/// Output:
/// - Writes the visible keys most-recent-first; the dirty flag is cleared either way so a
///   failing disk does not cause a write on every event.
pub fn maybe_flush_recents<V: PaletteView>(palette: &mut EmojiPalette<V>, path: &Path) {
    if !palette.take_recents_dirty() {
        return;
    }
    let keys = palette.model().recents().keys();
    if let Ok(s) = serde_json::to_string(&keys) {
        tracing::debug!(
            path = %path.display(),
            bytes = s.len(),
            "[Persist] Writing recent emoji to disk"
        );
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, &s) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "[Persist] Recent emoji persisted");
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "[Persist] Failed to write recent emoji"
                );
            }
        }
    }
}
