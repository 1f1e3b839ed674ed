//! Emoji palette controller.
//!
//! [`EmojiPalette`] receives the events of an emoji picker (tab clicks, pager
//! callbacks, scroll reports, picks, search input, locale and visibility
//! changes, download completions), updates the state models and pushes the
//! resulting display state to a [`PaletteView`].

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::catalog::CategoryId;
use crate::dictionary::{
    DictionaryLifecycle, DownloadOutcome, DownloadRequest, InstallOutcome, dictionary_url,
    download_in_background, normalize_locale,
};
use crate::error::Result;
use crate::index::EmojiIndex;
use crate::state::{
    CategoryChange, CategoryModel, NavTab, PageProgressMapper, ScrollReport, SearchSession,
    SearchSurface,
};

/// User-visible notices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A dictionary download was started.
    DownloadStarted {
        /// Target locale.
        locale: String,
    },
    /// A downloaded dictionary is now in use.
    DictionaryInstalled {
        /// Installed locale.
        locale: String,
    },
    /// Download or installation failed.
    InstallFailed {
        /// Target locale.
        locale: String,
        /// Human-readable reason.
        reason: String,
    },
    /// No download source is configured.
    DownloadUnavailable,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DownloadStarted { locale } => {
                write!(f, "downloading emoji dictionary for {locale}")
            }
            Self::DictionaryInstalled { locale } => {
                write!(f, "emoji dictionary for {locale} installed")
            }
            Self::InstallFailed { locale, reason } => {
                write!(f, "could not install emoji dictionary for {locale}: {reason}")
            }
            Self::DownloadUnavailable => write!(f, "no dictionary download source configured"),
        }
    }
}

/// What: Rendering collaborator driven by [`EmojiPalette`].
///
/// Details:
/// - Calls arrive on the controller's context, in the order the display should change.
pub trait PaletteView {
    /// Tab strip content and the highlighted tab.
    fn render_tabs(&mut self, tabs: &[NavTab], current: NavTab);
    /// Keys of the page now shown.
    fn render_page(&mut self, category: CategoryId, page: usize, keys: &[String], animate: bool);
    /// Page indicator position; `fraction` is the part of the next page scrolled in.
    fn render_page_indicator(&mut self, page_count: usize, page: usize, fraction: f32);
    /// Search surface content.
    fn show_search(&mut self, surface: SearchSurface<'_>);
    /// An emoji was picked and must be committed as text.
    fn commit_emoji(&mut self, key: &str);
    /// A user-visible notice.
    fn notify(&mut self, notice: Notice);
}

/// Behavior switches of the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteOptions {
    /// Picks are not recorded in recents.
    pub incognito: bool,
    /// Offer the search tab.
    pub search_tab_visible: bool,
    /// Leave search mode after a result is chosen.
    pub exit_search_on_pick: bool,
    /// Animate category changes triggered by tab clicks.
    pub animations: bool,
    /// Base URL for dictionary downloads; `None` disables downloads.
    pub dictionary_url: Option<String>,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            incognito: false,
            search_tab_visible: true,
            exit_search_on_pick: false,
            animations: true,
            dictionary_url: None,
        }
    }
}

/// What: Emoji picker controller.
///
/// Inputs:
/// - Built from a [`CategoryModel`], a shared [`DictionaryLifecycle`], a view and options.
///
/// Details:
/// - Single owner of navigation, recents and search state; call it from one context.
/// - `recents_dirty` is raised whenever the visible recents change, for persistence by the
///   front end through [`EmojiPalette::take_recents_dirty`].
pub struct EmojiPalette<V: PaletteView> {
    /// Categories, cursor and recents.
    model: CategoryModel,
    /// Key list and description search.
    index: EmojiIndex,
    /// Search mode state.
    search: SearchSession,
    /// Dictionary owner.
    lifecycle: Arc<DictionaryLifecycle>,
    /// Rendering collaborator.
    view: V,
    /// Behavior switches.
    options: PaletteOptions,
    /// Active input locale.
    locale: String,
    /// Whether the palette is on screen.
    visible: bool,
    /// Visible recents changed since the last take.
    recents_dirty: bool,
}

impl<V: PaletteView> EmojiPalette<V> {
    /// Create a hidden palette; call [`Self::start`] to show it.
    #[must_use]
    pub fn new(
        model: CategoryModel,
        lifecycle: Arc<DictionaryLifecycle>,
        view: V,
        options: PaletteOptions,
    ) -> Self {
        Self {
            model,
            index: EmojiIndex::new(lifecycle.reader()),
            search: SearchSession::new(options.exit_search_on_pick),
            lifecycle,
            view,
            options,
            locale: String::new(),
            visible: false,
            recents_dirty: false,
        }
    }

    /// What: Show the palette for `locale`.
    ///
    /// Details:
    /// - Ensures the dictionary for `locale`, performs the initial category selection and renders
    ///   everything.
    pub fn start(&mut self, locale: &str) {
        self.locale = normalize_locale(locale);
        let state = self.lifecycle.ensure_for_locale(&self.locale);
        tracing::info!(locale = %self.locale, dictionary = ?state, "emoji palette started");
        self.visible = true;
        let initial = self.model.current_category_id();
        self.model.set_current_category(initial, false);
        self.render();
    }

    /// Hide the palette for good: flush recents and leave search mode.
    pub fn stop(&mut self) {
        self.search.exit();
        self.visible = false;
        self.flush_recents();
        tracing::debug!("emoji palette stopped");
    }

    /// Push the complete display state to the view.
    pub fn render(&mut self) {
        self.render_tabs();
        if self.search.is_active() {
            self.view.show_search(self.search.surface(&self.index));
        } else {
            self.render_current_page(false);
        }
    }

    /// Tab strip with the highlighted tab.
    fn render_tabs(&mut self) {
        let tabs = self.model.nav_tabs(self.options.search_tab_visible);
        let current = if self.search.is_active() {
            NavTab::Search
        } else {
            NavTab::Category(self.model.current_category_id())
        };
        self.view.render_tabs(&tabs, current);
    }

    /// Current page and an indicator resting on it.
    fn render_current_page(&mut self, animate: bool) {
        let cursor = self.model.cursor();
        let keys = self.model.page_keys(cursor.category, cursor.page);
        self.view
            .render_page(cursor.category, cursor.page, &keys, animate);
        self.view
            .render_page_indicator(self.model.current_page_count(), cursor.page, 0.0);
    }

    /// Render after a committed category change.
    fn apply_change(&mut self, change: CategoryChange) {
        if change.previous.is_recents() && !change.current.is_recents() {
            self.flush_recents();
        }
        self.render_tabs();
        self.render_current_page(change.animate);
    }

    /// Select `id`, leaving search first when needed.
    fn select_category(&mut self, id: CategoryId, animate: bool) {
        let left_search = self.search.exit();
        match self.model.set_current_category(id, animate) {
            Some(change) => self.apply_change(change),
            None if left_search => self.render(),
            None => {}
        }
    }

    /// What: Handle a click on a tab of the strip.
    ///
    /// Details:
    /// - The search tab enters search mode; category tabs select the category, animated when
    ///   animations are enabled.
    pub fn on_tab_clicked(&mut self, tab: NavTab) {
        match tab {
            NavTab::Search => self.enter_search(),
            NavTab::Category(id) => self.select_category(id, self.options.animations),
        }
    }

    /// Handle the pager settling on `position` (index into the shown categories).
    pub fn on_page_selected(&mut self, position: usize) {
        match self.model.category_at_tab(position) {
            Some(id) => self.select_category(id, false),
            None => tracing::debug!(position, "pager position outside shown categories"),
        }
    }

    /// Handle a scroll report from a category's page list.
    pub fn on_scrolled(&mut self, report: &ScrollReport) {
        if let Some(progress) = PageProgressMapper::apply(&mut self.model, report) {
            self.view
                .render_page_indicator(progress.page_count, progress.whole_page, progress.fraction);
        }
    }

    /// Handle a category page list leaving the screen; leaving RECENTS flushes pending picks.
    pub fn on_category_detached(&mut self, id: CategoryId) {
        if id.is_recents() {
            self.flush_recents();
        }
    }

    /// What: Merge pending recents and repair page counts.
    ///
    /// Details:
    /// - Flush first, then invalidate, so RECENTS keeps its pages through the transition.
    /// - A redirect off a category that stopped being shown is rendered immediately.
    pub fn flush_recents(&mut self) {
        if self.model.recents_mut().flush_pending() {
            self.recents_dirty = true;
        }
        if let Some(redirect) = self.model.invalidate_page_counts()
            && self.visible
            && !self.search.is_active()
        {
            self.apply_change(redirect);
        }
    }

    /// What: Handle a picked emoji from a page or from the search results.
    ///
    /// Details:
    /// - The key is always committed to the view.
    /// - Incognito picks never reach recents.
    /// - While RECENTS is the current category the key is buffered, even from the search
    ///   surface, so pending picks keep their pick order; otherwise it goes straight to the
    ///   front of recents.
    pub fn on_emoji_selected(&mut self, key: &str) {
        self.view.commit_emoji(key);
        if self.options.incognito {
            tracing::trace!("incognito pick not recorded");
            return;
        }
        if self.model.is_in_recents_category() {
            self.model.recents_mut().add_pending(key);
            return;
        }
        if !self.model.recents_mut().add_first(key) {
            return;
        }
        self.recents_dirty = true;
        let tabs_before = self.model.nav_tabs(self.options.search_tab_visible);
        self.model.invalidate_page_counts();
        if self.visible
            && !self.search.is_active()
            && tabs_before != self.model.nav_tabs(self.options.search_tab_visible)
        {
            self.render_tabs();
        }
    }

    /// Enter search mode; ignored when the search tab is disabled.
    pub fn enter_search(&mut self) {
        if !self.options.search_tab_visible {
            tracing::debug!("search tab disabled; ignoring search request");
            return;
        }
        if self.search.is_active() {
            return;
        }
        self.search.enter();
        self.render();
    }

    /// Leave search mode and go back to the current category.
    pub fn exit_search(&mut self) {
        if self.search.exit() {
            self.render();
        }
    }

    /// Handle search text changes.
    pub fn on_query_changed(&mut self, query: &str) {
        if self
            .search
            .on_query_changed(&self.index, &self.model, query)
        {
            self.view.show_search(self.search.surface(&self.index));
        }
    }

    /// Handle a picked search result.
    pub fn on_search_result_chosen(&mut self, key: &str) {
        self.on_emoji_selected(key);
        if self.search.on_result_chosen() {
            self.render();
        }
    }

    /// What: Switch to a new input locale.
    ///
    /// Details:
    /// - Swaps the dictionary; an open search surface refreshes against the new one.
    pub fn on_locale_changed(&mut self, locale: &str) {
        self.locale = normalize_locale(locale);
        self.lifecycle.ensure_for_locale(&self.locale);
        if self.search.is_active() {
            self.search.refresh(&self.index, &self.model);
            self.view.show_search(self.search.surface(&self.index));
        }
    }

    /// What: Start downloading the dictionary for the active locale.
    ///
    /// Inputs:
    /// - `tx`: Channel the completion is delivered on; feed it back to
    ///   [`Self::on_download_complete`].
    ///
    /// Output:
    /// - `false` when no download source is configured.
    pub fn request_dictionary_download(&mut self, tx: &mpsc::UnboundedSender<DownloadOutcome>) -> bool {
        let Some(base) = self.options.dictionary_url.as_deref() else {
            self.view.notify(Notice::DownloadUnavailable);
            return false;
        };
        let request = DownloadRequest {
            locale: self.locale.clone(),
            url: dictionary_url(base, &self.locale),
        };
        download_in_background(request, tx.clone());
        self.view.notify(Notice::DownloadStarted {
            locale: self.locale.clone(),
        });
        true
    }

    /// What: Install a finished download.
    ///
    /// Details:
    /// - Completions for a locale that is no longer active are dropped silently, failures
    ///   included.
    /// - On success an open search surface is restarted on the new dictionary.
    /// - Failures become [`Notice::InstallFailed`]; the previous dictionary stays.
    pub fn on_download_complete(&mut self, outcome: DownloadOutcome) {
        let bytes = match outcome.result {
            Ok(bytes) => bytes,
            Err(reason) => {
                if normalize_locale(&outcome.locale) != self.locale {
                    tracing::debug!(
                        locale = %outcome.locale,
                        active = %self.locale,
                        reason,
                        "stale dictionary download failure dropped"
                    );
                    return;
                }
                self.view.notify(Notice::InstallFailed {
                    locale: outcome.locale,
                    reason,
                });
                return;
            }
        };
        match self.lifecycle.install_from_download(&bytes, &outcome.locale) {
            Ok(InstallOutcome::Installed { .. }) => {
                self.view.notify(Notice::DictionaryInstalled {
                    locale: normalize_locale(&outcome.locale),
                });
                if self.search.is_active() {
                    self.search.refresh(&self.index, &self.model);
                    self.view.show_search(self.search.surface(&self.index));
                }
            }
            Ok(InstallOutcome::Discarded { active }) => {
                tracing::debug!(locale = %outcome.locale, ?active, "stale dictionary download dropped");
            }
            Err(e) => self.view.notify(Notice::InstallFailed {
                locale: outcome.locale,
                reason: e.to_string(),
            }),
        }
    }

    /// Close the dictionary and drop cached keys; the next locale change reloads.
    pub fn clear_cache(&mut self) {
        self.lifecycle.close();
        self.index.invalidate();
        if self.search.is_active() {
            self.search.refresh(&self.index, &self.model);
            self.view.show_search(self.search.surface(&self.index));
        }
    }

    /// The palette lost visibility: leave search mode and flush recents.
    pub fn hide(&mut self) {
        self.search.exit();
        self.visible = false;
        self.flush_recents();
    }

    /// What: Replace the keys of a category and refresh dependants.
    ///
    /// # Errors
    /// - `PaletteError::CategoryNotFound` for unknown ids and RECENTS.
    pub fn set_category_keys(&mut self, id: CategoryId, keys: Vec<String>) -> Result<()> {
        self.model.set_category_keys(id, keys)?;
        self.index.invalidate();
        let redirect = self.model.invalidate_page_counts();
        if self.visible && !self.search.is_active() {
            match redirect {
                Some(change) => self.apply_change(change),
                None => self.render(),
            }
        }
        Ok(())
    }

    /// Toggle incognito mode.
    pub const fn set_incognito(&mut self, incognito: bool) {
        self.options.incognito = incognito;
    }

    /// Return and clear the "recents changed" flag.
    pub const fn take_recents_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.recents_dirty, false)
    }

    /// Description of `key` in the current dictionary.
    #[must_use]
    pub fn describe(&self, key: &str) -> Option<String> {
        self.index.describe(key)
    }

    /// Run a search without touching search mode.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<String> {
        self.index.search(&self.model, query)
    }

    /// Category model.
    #[must_use]
    pub const fn model(&self) -> &CategoryModel {
        &self.model
    }

    /// Search session.
    #[must_use]
    pub const fn search_session(&self) -> &SearchSession {
        &self.search
    }

    /// Shared dictionary lifecycle.
    #[must_use]
    pub const fn lifecycle(&self) -> &Arc<DictionaryLifecycle> {
        &self.lifecycle
    }

    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether the palette is on screen.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Rendering collaborator.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Mutable rendering collaborator.
    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
