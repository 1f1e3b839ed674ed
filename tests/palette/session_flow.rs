//! Integration tests for the line-driven session front end.
//!
//! Tests cover:
//! - Picks from pages and from search persisted to the recents file
//! - Unknown commands reported without ending the session
//! - Incognito toggled mid-session
//! - Locale switches while search is open

#![cfg(test)]

use std::fs;
use std::path::Path;

use emoji_palette::app::{ConsoleView, build_palette, load_recents, run_session};
use emoji_palette::catalog::Catalog;
use emoji_palette::config::Settings;
use emoji_palette::palette::EmojiPalette;

/// Write a one-entry-per-pair combined dictionary for `lang`.
fn write_dict(dicts: &Path, lang: &str, entries: &[(&str, &str)]) {
    let dir = dicts.join(lang);
    fs::create_dir_all(&dir).expect("mkdir");
    let mut text = format!("dictionary=emoji_{lang},locale={lang}\n");
    for (word, description) in entries {
        text.push_str(&format!(" word={word}\n  shortcut={description}\n"));
    }
    fs::write(dir.join(format!("emoji_{lang}.dict")), text).expect("write");
}

/// What: Run `script` against a fresh palette started for `locale`.
///
/// Output:
/// - Console output and the recents persisted by the session.
async fn run_script(dir: &Path, locale: &str, script: &str) -> (String, Vec<String>) {
    let recents = dir.join("recent_emoji.json");
    let mut palette: EmojiPalette<ConsoleView<Vec<u8>>> = build_palette(
        &Settings::default(),
        Catalog::builtin(),
        &dir.join("dicts"),
        load_recents(&recents),
        Vec::new(),
    );
    palette.start(locale);
    run_session(
        &mut palette,
        tokio::io::BufReader::new(script.as_bytes()),
        &recents,
    )
    .await
    .expect("session");
    let out = String::from_utf8_lossy(palette.view().writer()).to_string();
    (out, load_recents(&recents))
}

#[tokio::test]
/// What: Page picks and search picks both land in the persisted recents.
///
/// Inputs:
/// - `en` dictionary describing 🐶 and 🐱; script picks 🐱, searches "dog", chooses 🐶.
///
/// Output:
/// - Both commits printed; recents file holds `[🐶, 🐱]`.
async fn integration_session_persists_picks() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_dict(
        &dir.path().join("dicts"),
        "en",
        &[("🐶", "dog face"), ("🐱", "cat face")],
    );
    let script = "pick 🐱\ntab search\nquery dog\nchoose 🐶\nclose\nquit\n";
    let (out, recents) = run_script(dir.path(), "en", script).await;

    assert!(out.contains("commit: 🐱"));
    assert!(out.contains("results: 🐶"));
    assert!(out.contains("commit: 🐶"));
    assert_eq!(recents, vec!["🐶", "🐱"]);
}

#[tokio::test]
/// What: A bad line prints an error and the next lines still run.
async fn integration_session_survives_bad_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (out, recents) = run_script(dir.path(), "en", "jump 3\nswipe x\npick 😀\n").await;

    assert!(out.contains("error: unknown command `jump` (try `help`)"));
    assert!(out.contains("error: invalid position"));
    assert!(out.contains("commit: 😀"));
    assert_eq!(recents, vec!["😀"]);
}

#[tokio::test]
/// What: Picks made while incognito is on are committed but never persisted.
async fn integration_session_incognito_toggle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = "incognito on\npick 😀\nincognito off\npick 😂\n";
    let (out, recents) = run_script(dir.path(), "en", script).await;

    assert!(out.contains("commit: 😀"));
    assert!(out.contains("commit: 😂"));
    assert_eq!(recents, vec!["😂"]);
}

#[tokio::test]
/// What: Switching locale while searching re-runs the query on the new dictionary.
///
/// Inputs:
/// - `en` and `de` dictionaries; search "face" under `en`, then `locale de`.
///
/// Output:
/// - Empty surface on entry, then `🐶`; the `de` refresh of "face" is empty until "hund".
async fn integration_session_locale_switch_refreshes_search() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dicts = dir.path().join("dicts");
    write_dict(&dicts, "en", &[("🐶", "dog face")]);
    write_dict(&dicts, "de", &[("🐶", "Hundegesicht")]);
    let script = "tab search\nquery face\nlocale de\nquery hund\n";
    let (out, _) = run_script(dir.path(), "en", script).await;

    let lines: Vec<&str> = out.lines().filter(|l| l.starts_with("results:")).collect();
    assert_eq!(
        lines,
        [
            "results: (none)",
            "results: 🐶",
            "results: (none)",
            "results: 🐶"
        ]
    );
}
