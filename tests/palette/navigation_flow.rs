//! Integration tests for navigation, paging and recents.
//!
//! Tests cover:
//! - Recents persisted and restored across palette instances
//! - Deferred recents while the recents page is on screen
//! - Scroll-driven page positions at exact boundaries

#![cfg(test)]

use emoji_palette::app::{ConsoleView, build_palette, load_recents, maybe_flush_recents};
use emoji_palette::catalog::{Catalog, CategoryDef, CategoryId};
use emoji_palette::config::Settings;
use emoji_palette::palette::EmojiPalette;
use emoji_palette::state::{NavTab, ScrollReport};

/// What: Build a palette printing into a buffer.
///
/// Inputs:
/// - `settings`: Effective settings.
/// - `catalog`: Key sets.
/// - `recents`: Persisted recents.
///
/// Output:
/// - Palette plus the temp directory backing its dictionary cache.
fn palette(
    settings: &Settings,
    catalog: Catalog,
    recents: Vec<String>,
) -> (tempfile::TempDir, EmojiPalette<ConsoleView<Vec<u8>>>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = build_palette(settings, catalog, &dir.path().join("dicts"), recents, Vec::new());
    (dir, p)
}

/// Output text of the palette's console view.
fn output(p: &EmojiPalette<ConsoleView<Vec<u8>>>) -> String {
    String::from_utf8_lossy(p.view().writer()).to_string()
}

#[test]
/// What: Picks survive a restart and make RECENTS the starting category.
///
/// Inputs:
/// - First run: picks 🐶 then 😀 from smileys; flush to disk.
/// - Second run: palette built from the persisted list.
///
/// Output:
/// - Second run starts on RECENTS showing `😀 🐶`.
fn integration_recents_persist_across_runs() {
    let settings = Settings::default();
    let (dir, mut first) = palette(&settings, Catalog::builtin(), Vec::new());
    let path = dir.path().join("recent_emoji.json");
    first.start("en");
    assert_eq!(
        first.model().current_category_id(),
        CategoryId::SMILEYS_EMOTION
    );
    first.on_emoji_selected("🐶");
    first.on_emoji_selected("😀");
    first.stop();
    maybe_flush_recents(&mut first, &path);

    let (_dir2, mut second) = palette(&settings, Catalog::builtin(), load_recents(&path));
    second.start("en");
    assert!(second.model().is_in_recents_category());
    assert!(output(&second).contains("page recents(0) #0: 😀 🐶"));
}

#[test]
/// What: Picks on the recents page wait until the page is left, then land in pick order.
///
/// Inputs:
/// - RECENTS hidden when empty; persisted `[🍕]`; picks ⭐ and 🍀 while on RECENTS.
///
/// Output:
/// - RECENTS keeps showing `🍕` until detached; afterwards `[🍀, ⭐, 🍕]` and still shown.
fn integration_pending_recents_flush_on_detach() {
    let settings = Settings {
        recents_always_visible: false,
        ..Settings::default()
    };
    let (_dir, mut p) = palette(&settings, Catalog::builtin(), vec!["🍕".into()]);
    p.start("en");
    assert!(p.model().is_in_recents_category());

    p.on_emoji_selected("⭐");
    p.on_emoji_selected("🍀");
    assert_eq!(p.model().recents().keys(), vec!["🍕"]);
    assert_eq!(p.model().recents().pending(), ["⭐", "🍀"]);

    p.on_category_detached(CategoryId::RECENTS);
    assert_eq!(p.model().recents().keys(), vec!["🍀", "⭐", "🍕"]);
    assert!(p.model().is_shown(CategoryId::RECENTS));
    assert!(p.take_recents_dirty());
}

#[test]
/// What: The scroll boundary example lands exactly on page 1.
///
/// Inputs:
/// - A category with 9 pages; scroll offset 50, extent 100, range 550.
///
/// Output:
/// - Indicator `1/9 +0.00`; cursor on the first fully visible position.
fn integration_scroll_boundary_is_whole_page() {
    let settings = Settings {
        page_capacity: 4,
        ..Settings::default()
    };
    let catalog = Catalog {
        categories: vec![CategoryDef {
            id: CategoryId::SYMBOLS,
            name: "symbols".into(),
            keys: (0..36).map(|i| format!("s{i}")).collect(),
        }],
    };
    let (_dir, mut p) = palette(&settings, catalog, Vec::new());
    p.start("en");
    assert_eq!(p.model().current_page_count(), 9);

    p.on_scrolled(&ScrollReport {
        category: CategoryId::SYMBOLS,
        offset: 50,
        extent: 100,
        range: 550,
        first_fully_visible: 1,
        first_partially_visible: 0,
    });
    assert!(output(&p).ends_with("indicator: 1/9 +0.00\n"));
    assert_eq!(p.model().current_page_index(), 1);
}

#[test]
/// What: Tab clicks animate, re-clicks are no-ops and pages are remembered.
fn integration_tab_navigation_remembers_pages() {
    let (_dir, mut p) = palette(&Settings::default(), Catalog::builtin(), Vec::new());
    p.start("en");
    p.on_scrolled(&ScrollReport {
        category: CategoryId::SMILEYS_EMOTION,
        offset: 0,
        extent: 10,
        range: 100,
        first_fully_visible: 2,
        first_partially_visible: 2,
    });
    assert_eq!(p.model().current_page_index(), 2);

    p.on_tab_clicked(NavTab::Category(CategoryId::FLAGS));
    let before = output(&p);
    p.on_tab_clicked(NavTab::Category(CategoryId::FLAGS));
    assert_eq!(output(&p), before);

    p.on_tab_clicked(NavTab::Category(CategoryId::SMILEYS_EMOTION));
    assert_eq!(p.model().current_page_index(), 2);
    assert!(output(&p).contains("page smileys_emotion(1) #2 (animated)"));
}
