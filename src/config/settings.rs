use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::palette::PaletteOptions;
use crate::state::{CategoryOptions, DEFAULT_PAGE_CAPACITY, RECENTS_CAPACITY};

/// Commented skeleton written when no settings file exists.
pub const SKELETON_SETTINGS_CONTENT: &str = "\
# emoji-palette settings
# key = value; lines starting with # are comments.

# Input locale used to pick the emoji dictionary (e.g. en, en_US, de).
locale = en

# Emoji keys per page.
page_capacity = 32

# Maximum number of recent emoji kept.
recents_capacity = 32

# Show the recents tab even when it is empty.
recents_always_visible = true

# Offer the search tab.
search_tab_visible = true

# Leave search mode after choosing a result.
exit_search_on_pick = false

# Do not record picks in recents.
incognito = false

# Animate category changes triggered by tab clicks.
animations = true

# Base URL for dictionary downloads (file:// is accepted). Empty disables downloads.
dictionary_url =

# Optional JSON catalog replacing the built-in emoji set.
catalog_path =
";

/// What: User settings for the palette and its front end.
///
/// Details:
/// - Values missing from the file, or failing to parse, keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Input locale.
    pub locale: String,
    /// Keys per page.
    pub page_capacity: usize,
    /// Maximum recents.
    pub recents_capacity: usize,
    /// Show RECENTS while empty.
    pub recents_always_visible: bool,
    /// Offer the search tab.
    pub search_tab_visible: bool,
    /// Leave search mode after a pick.
    pub exit_search_on_pick: bool,
    /// Do not record recents.
    pub incognito: bool,
    /// Animate tab-driven category changes.
    pub animations: bool,
    /// Dictionary download base URL.
    pub dictionary_url: Option<String>,
    /// Catalog file replacing the built-in set.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            page_capacity: DEFAULT_PAGE_CAPACITY,
            recents_capacity: RECENTS_CAPACITY,
            recents_always_visible: true,
            search_tab_visible: true,
            exit_search_on_pick: false,
            incognito: false,
            animations: true,
            dictionary_url: None,
            catalog_path: None,
        }
    }
}

impl Settings {
    /// Category model options derived from these settings.
    #[must_use]
    pub fn category_options(&self) -> CategoryOptions {
        CategoryOptions {
            page_capacity: NonZeroUsize::new(self.page_capacity).unwrap_or(NonZeroUsize::MIN),
            recents_always_visible: self.recents_always_visible,
        }
    }

    /// Controller options derived from these settings.
    #[must_use]
    pub fn palette_options(&self) -> PaletteOptions {
        PaletteOptions {
            incognito: self.incognito,
            search_tab_visible: self.search_tab_visible,
            exit_search_on_pick: self.exit_search_on_pick,
            animations: self.animations,
            dictionary_url: self.dictionary_url.clone(),
        }
    }

    /// Recents capacity as a non-zero value.
    #[must_use]
    pub fn recents_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.recents_capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

/// What: Strip a trailing `#` or `//` comment from a value.
///
/// Details:
/// - A value starting with `#` keeps that first `#` (so `#tag # note` becomes `#tag`).
pub(crate) fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    if let Some(i_rel) = if let Some(stripped) = s.strip_prefix('#') {
        stripped.find('#').map(|j| j + 1)
    } else {
        s.find('#')
    } {
        s = &s[..i_rel];
    }
    s.trim()
}

/// Parse a boolean setting value.
fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a strictly positive count.
fn parse_count(val: &str) -> Option<usize> {
    val.parse::<usize>().ok().filter(|v| *v > 0)
}

/// What: Apply `settings.conf` content on top of `settings`.
///
/// Inputs:
/// - `content`: File content.
/// - `settings`: Values to update in place.
///
/// Details:
/// - Keys are case-insensitive; `.`, `-` and spaces count as `_`.
/// - Unknown keys and unparseable values are ignored (logged at debug level).
/// - An empty `dictionary_url` or `catalog_path` clears the value.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        if !trimmed.contains('=') {
            continue;
        }
        let mut parts = trimmed.splitn(2, '=');
        let raw_key = parts.next().unwrap_or("");
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val_raw = parts.next().unwrap_or("").trim();
        let val = if key.ends_with("_url") {
            // URLs contain `//`; only `#` starts a comment here.
            val_raw.split(" #").next().unwrap_or("").trim()
        } else {
            strip_inline_comment(val_raw)
        };
        let applied = match key.as_str() {
            "locale" | "language" => {
                if val.is_empty() {
                    false
                } else {
                    val.clone_into(&mut settings.locale);
                    true
                }
            }
            "page_capacity" | "keys_per_page" => parse_count(val)
                .map(|v| settings.page_capacity = v)
                .is_some(),
            "recents_capacity" | "max_recents" => parse_count(val)
                .map(|v| settings.recents_capacity = v)
                .is_some(),
            "recents_always_visible" => parse_bool(val)
                .map(|v| settings.recents_always_visible = v)
                .is_some(),
            "search_tab_visible" | "show_search_tab" => parse_bool(val)
                .map(|v| settings.search_tab_visible = v)
                .is_some(),
            "exit_search_on_pick" => parse_bool(val)
                .map(|v| settings.exit_search_on_pick = v)
                .is_some(),
            "incognito" => parse_bool(val).map(|v| settings.incognito = v).is_some(),
            "animations" | "animate" => parse_bool(val).map(|v| settings.animations = v).is_some(),
            "dictionary_url" => {
                settings.dictionary_url = (!val.is_empty()).then(|| val.to_string());
                true
            }
            "catalog_path" | "catalog" => {
                settings.catalog_path = (!val.is_empty()).then(|| PathBuf::from(val));
                true
            }
            _ => false,
        };
        if !applied {
            tracing::debug!(key, value = val, "ignoring settings entry");
        }
    }
}

/// What: Load settings from `path`, writing the skeleton when the file is missing.
///
/// Output:
/// - Parsed settings; defaults when the file cannot be read.
pub fn load_settings_from(path: &Path) -> Settings {
    let mut out = Settings::default();
    if !path.is_file() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, SKELETON_SETTINGS_CONTENT) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote default settings"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to write default settings"),
        }
    }
    match fs::read_to_string(path) {
        Ok(content) => parse_settings(&content, &mut out),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to read settings; using defaults"),
    }
    out
}

/// Load settings from the user config directory.
pub fn settings() -> Settings {
    load_settings_from(&super::paths::settings_path())
}
