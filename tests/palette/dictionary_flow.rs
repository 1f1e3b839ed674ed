//! Integration tests for the dictionary lifecycle over the filesystem store.
//!
//! Tests cover:
//! - Locale swaps changing search results
//! - Language fallback for region locales
//! - Stale and failing installs
//! - Readers racing installs

#![cfg(test)]

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use emoji_palette::PaletteError;
use emoji_palette::catalog::Catalog;
use emoji_palette::dictionary::{
    DictionaryLifecycle, DictionaryState, FsDictionaryStore, InstallOutcome,
};
use emoji_palette::index::EmojiIndex;
use emoji_palette::state::{CategoryModel, CategoryOptions, RecentsStore};

/// What: Write a combined-format dictionary for `lang` under `root`.
///
/// Inputs:
/// - `root`: Store root.
/// - `lang`: Locale directory and file suffix.
/// - `entries`: `(emoji, description)` pairs.
fn write_dict(root: &Path, lang: &str, entries: &[(&str, &str)]) {
    let dir = root.join(lang);
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join(format!("emoji_{lang}.dict")), words(lang, entries)).expect("write");
}

/// Combined word-list text for `entries`.
fn words(lang: &str, entries: &[(&str, &str)]) -> String {
    let mut text = format!("dictionary=emoji_{lang},locale={lang}\n");
    for (word, description) in entries {
        text.push_str(&format!(" word={word},f=100\n  shortcut={description}\n"));
    }
    text
}

/// Model over the built-in catalog.
fn model() -> CategoryModel {
    CategoryModel::new(
        Catalog::builtin(),
        RecentsStore::default(),
        CategoryOptions::default(),
    )
}

#[test]
/// What: Switching locale swaps the dictionary behind search.
///
/// Inputs:
/// - `en` and `de` dictionaries describing 🐶 differently.
///
/// Output:
/// - "dog" matches only under `en`, "hund" only under `de`; the old handle is closed.
fn integration_locale_swap_changes_results() {
    let root = tempfile::tempdir().expect("tempdir");
    write_dict(root.path(), "en", &[("🐶", "dog face")]);
    write_dict(root.path(), "de", &[("🐶", "Hundegesicht")]);
    let lc = DictionaryLifecycle::new(Arc::new(FsDictionaryStore::new(root.path())));
    let index = EmojiIndex::new(lc.reader());
    let m = model();

    assert_eq!(lc.ensure_for_locale("en_GB"), DictionaryState::Ready);
    let en = lc.reader().current().expect("en ready");
    assert_eq!(index.search(&m, "dog"), vec!["🐶"]);

    assert_eq!(lc.ensure_for_locale("de"), DictionaryState::Ready);
    assert!(!en.is_open());
    assert!(index.search(&m, "dog").is_empty());
    assert_eq!(index.search(&m, "HUND"), vec!["🐶"]);
    assert_eq!(index.describe("🐶").as_deref(), Some("Hundegesicht"));
}

#[test]
/// What: Installs for a locale the user already left change nothing.
///
/// Inputs:
/// - Download started for `de`, user switches to `fr` (which has a cached dictionary).
///
/// Output:
/// - `Discarded`; nothing written for `de`; `fr` still serves lookups.
fn integration_stale_install_is_ignored() {
    let root = tempfile::tempdir().expect("tempdir");
    write_dict(root.path(), "fr", &[("🐶", "tête de chien")]);
    let lc = DictionaryLifecycle::new(Arc::new(FsDictionaryStore::new(root.path())));
    assert_eq!(lc.ensure_for_locale("de"), DictionaryState::Absent);
    assert_eq!(lc.ensure_for_locale("fr"), DictionaryState::Ready);

    let outcome = lc
        .install_from_download(words("de", &[("🐶", "Hund")]).as_bytes(), "de")
        .expect("discard is not an error");
    assert!(matches!(outcome, InstallOutcome::Discarded { .. }));
    assert!(!root.path().join("de").exists());
    assert!(
        lc.reader()
            .current()
            .is_some_and(|d| d.is_for_locale("fr") && d.is_open())
    );
}

#[test]
/// What: A corrupt download keeps both the cached file and the published dictionary.
fn integration_failed_install_keeps_previous() {
    let root = tempfile::tempdir().expect("tempdir");
    write_dict(root.path(), "en", &[("😀", "grinning face")]);
    let lc = DictionaryLifecycle::new(Arc::new(FsDictionaryStore::new(root.path())));
    lc.ensure_for_locale("en");

    let err = lc
        .install_from_download(b"\xff\xfe garbage", "en")
        .expect_err("corrupt bytes");
    assert!(matches!(err, PaletteError::DownloadInstallFailed { .. }));
    assert_eq!(
        fs::read_to_string(root.path().join("en").join("emoji_en.dict")).expect("still cached"),
        words("en", &[("😀", "grinning face")])
    );
    assert_eq!(
        lc.reader()
            .current()
            .and_then(|d| d.description("😀").map(str::to_string))
            .as_deref(),
        Some("grinning face")
    );
}

#[test]
/// What: Readers searching while installs swap dictionaries see complete results.
///
/// Inputs:
/// - Four reader threads searching "face" while the main thread installs 50 times.
///
/// Output:
/// - Every observed result list is either empty or exactly `[😀]`; nothing panics.
fn integration_readers_race_installs() {
    let root = tempfile::tempdir().expect("tempdir");
    let lc = Arc::new(DictionaryLifecycle::new(Arc::new(FsDictionaryStore::new(
        root.path(),
    ))));
    lc.ensure_for_locale("en");
    let stop = Arc::new(AtomicBool::new(false));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = EmojiIndex::new(lc.reader());
            let stop = stop.clone();
            std::thread::spawn(move || {
                let m = model();
                while !stop.load(Ordering::SeqCst) {
                    let results = index.search(&m, "face");
                    assert!(results.is_empty() || results == ["😀"]);
                }
            })
        })
        .collect();

    let bytes = words("en", &[("😀", "grinning face")]);
    for _ in 0..50 {
        let outcome = lc
            .install_from_download(bytes.as_bytes(), "en")
            .expect("install");
        assert!(matches!(outcome, InstallOutcome::Installed { .. }));
    }
    stop.store(true, Ordering::SeqCst);
    for r in readers {
        assert!(r.join().is_ok());
    }
    assert_eq!(lc.state(), DictionaryState::Ready);
}
