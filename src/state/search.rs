//! Search mode state.

use crate::index::EmojiIndex;

use super::category::CategoryModel;

/// What the search surface should display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchSurface<'a> {
    /// No dictionary is ready; offer to download one.
    DownloadOffer,
    /// Results for the last query (possibly empty).
    Results(&'a [String]),
}

/// What: Search on/off flag, last query and its results.
///
/// Details:
/// - While inactive the query and results are always empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchSession {
    /// Whether search mode is on.
    active: bool,
    /// Last query seen while active.
    last_query: String,
    /// Results of `last_query`.
    results: Vec<String>,
    /// Leave search mode after a result is chosen.
    exit_on_pick: bool,
}

impl SearchSession {
    /// Create an inactive session.
    #[must_use]
    pub fn new(exit_on_pick: bool) -> Self {
        Self {
            exit_on_pick,
            ..Self::default()
        }
    }

    /// Turn search mode on with an empty query.
    pub fn enter(&mut self) {
        self.active = true;
        self.last_query.clear();
        self.results.clear();
        tracing::debug!("search mode entered");
    }

    /// Turn search mode off and forget the query; returns whether it was on.
    pub fn exit(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.last_query.clear();
        self.results.clear();
        if was_active {
            tracing::debug!("search mode exited");
        }
        was_active
    }

    /// Whether search mode is on.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Last query while active.
    #[must_use]
    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Current results.
    #[must_use]
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// What: Store `query` and recompute the results.
    ///
    /// Output:
    /// - `false` when the session is inactive and the query was ignored.
    pub fn on_query_changed(&mut self, index: &EmojiIndex, model: &CategoryModel, query: &str) -> bool {
        if !self.active {
            return false;
        }
        query.clone_into(&mut self.last_query);
        self.results = index.search(model, query);
        true
    }

    /// Recompute results for the last query, e.g. after a dictionary swap.
    pub fn refresh(&mut self, index: &EmojiIndex, model: &CategoryModel) {
        if self.active {
            self.results = index.search(model, &self.last_query);
        }
    }

    /// What: Finish handling a chosen result.
    ///
    /// Output:
    /// - `true` when the session left search mode.
    ///
    /// Details:
    /// - The caller commits the key through the ordinary pick path first.
    pub fn on_result_chosen(&mut self) -> bool {
        if self.active && self.exit_on_pick {
            return self.exit();
        }
        false
    }

    /// What the search surface shows given the current dictionary availability.
    #[must_use]
    pub fn surface<'a>(&'a self, index: &EmojiIndex) -> SearchSurface<'a> {
        if index.has_dictionary() {
            SearchSurface::Results(&self.results)
        } else {
            SearchSurface::DownloadOffer
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::dictionary::DictionaryReader;
    use crate::state::{CategoryOptions, RecentsStore};

    use super::*;

    fn fixtures() -> (EmojiIndex, CategoryModel) {
        (
            EmojiIndex::new(DictionaryReader::default()),
            CategoryModel::new(Catalog::builtin(), RecentsStore::default(), CategoryOptions::default()),
        )
    }

    #[test]
    /// What: Queries are ignored while inactive and cleared on exit.
    fn query_ignored_while_inactive() {
        let (index, model) = fixtures();
        let mut s = SearchSession::new(false);
        assert!(!s.on_query_changed(&index, &model, "dog"));
        assert_eq!(s.last_query(), "");

        s.enter();
        assert!(s.on_query_changed(&index, &model, "dog"));
        assert_eq!(s.last_query(), "dog");
        assert!(s.exit());
        assert_eq!(s.last_query(), "");
        assert!(s.results().is_empty());
        assert!(!s.exit());
    }

    #[test]
    /// What: Without a dictionary the surface offers a download.
    fn surface_without_dictionary_offers_download() {
        let (index, _) = fixtures();
        let mut s = SearchSession::new(false);
        s.enter();
        assert_eq!(s.surface(&index), SearchSurface::DownloadOffer);
    }

    #[test]
    /// What: Choosing a result exits only when configured to.
    fn result_choice_honors_exit_setting() {
        let mut stay = SearchSession::new(false);
        stay.enter();
        assert!(!stay.on_result_chosen());
        assert!(stay.is_active());

        let mut leave = SearchSession::new(true);
        leave.enter();
        assert!(leave.on_result_chosen());
        assert!(!leave.is_active());
    }
}
