//! Category/page state machine.
//!
//! [`CategoryModel`] owns the category list, the per-category key sets, the
//! recents store and the navigation cursor. Every mutation keeps the cursor
//! invariant: the page index is inside `[0, page_count)` whenever the current
//! category has pages, and the current category is always a shown one once any
//! category is shown.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::catalog::{Catalog, CategoryId};
use crate::error::{PaletteError, Result};

use super::recents::RecentsStore;

/// Default number of emoji keys per page.
pub const DEFAULT_PAGE_CAPACITY: usize = 32;

/// A paged category as seen by navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Stable id.
    pub id: CategoryId,
    /// Machine name (`recents`, `smileys_emotion`, ...).
    pub name: String,
    /// Position in display order; RECENTS is always 0.
    pub display_order: usize,
    /// Number of pages of the backing key set.
    pub page_count: usize,
}

/// Current category and page within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationCursor {
    /// Category the user is looking at.
    pub category: CategoryId,
    /// Page index within `category`.
    pub page: usize,
}

/// Entry in the navigation surface (tab strip).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavTab {
    /// Synthetic search tab; never a paged category.
    Search,
    /// A shown paged category.
    Category(CategoryId),
}

/// A committed change of the current category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryChange {
    /// Category before the change.
    pub previous: CategoryId,
    /// Category after the change.
    pub current: CategoryId,
    /// Whether the collaborator should animate to the new page.
    pub animate: bool,
    /// Whether this was the first selection since construction.
    pub initial: bool,
}

/// Tunables for [`CategoryModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryOptions {
    /// Keys per page.
    pub page_capacity: NonZeroUsize,
    /// Show RECENTS even when it has no keys.
    pub recents_always_visible: bool,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self {
            page_capacity: NonZeroUsize::new(DEFAULT_PAGE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            recents_always_visible: true,
        }
    }
}

/// Ordered categories with a navigation cursor.
#[derive(Debug)]
pub struct CategoryModel {
    /// All categories in display order; index 0 is RECENTS.
    categories: Vec<Category>,
    /// Backing key sets of the non-recents categories.
    keys: HashMap<CategoryId, Vec<String>>,
    /// Recently used emoji; backs the RECENTS category.
    recents: RecentsStore,
    /// Page capacity and visibility rules.
    options: CategoryOptions,
    /// Current category/page.
    cursor: NavigationCursor,
    /// Last page visited per category, restored on return.
    remembered_pages: HashMap<CategoryId, usize>,
    /// Set after the first category selection.
    initialized: bool,
}

impl CategoryModel {
    /// What: Build the model from a catalog and a (possibly restored) recents store.
    ///
    /// Inputs:
    /// - `catalog`: Non-recents categories in display order.
    /// - `recents`: Recents store; its keys back the RECENTS category.
    /// - `options`: Page capacity and RECENTS visibility.
    ///
    /// Output:
    /// - Model with page counts computed and the cursor on RECENTS when it has keys,
    ///   else on the first shown category.
    #[must_use]
    pub fn new(catalog: Catalog, recents: RecentsStore, options: CategoryOptions) -> Self {
        let mut categories = Vec::with_capacity(catalog.categories.len() + 1);
        categories.push(Category {
            id: CategoryId::RECENTS,
            name: "recents".to_string(),
            display_order: 0,
            page_count: 0,
        });
        let mut keys = HashMap::with_capacity(catalog.categories.len());
        for (i, def) in catalog.categories.into_iter().enumerate() {
            categories.push(Category {
                id: def.id,
                name: def.name,
                display_order: i + 1,
                page_count: 0,
            });
            keys.insert(def.id, def.keys);
        }
        let mut model = Self {
            categories,
            keys,
            recents,
            options,
            cursor: NavigationCursor {
                category: CategoryId::RECENTS,
                page: 0,
            },
            remembered_pages: HashMap::new(),
            initialized: false,
        };
        model.recompute_page_counts();
        model.cursor.category = model.initial_category();
        model
    }

    /// Category to start on: RECENTS if it has keys, otherwise the first shown one.
    fn initial_category(&self) -> CategoryId {
        if !self.recents.is_empty() {
            return CategoryId::RECENTS;
        }
        self.categories
            .iter()
            .filter(|c| self.is_visible(c))
            .find(|c| !c.id.is_recents())
            .or_else(|| self.categories.iter().find(|c| self.is_visible(c)))
            .map_or(CategoryId::RECENTS, |c| c.id)
    }

    /// Visibility rule for a single category.
    const fn is_visible(&self, c: &Category) -> bool {
        c.page_count > 0 || (c.id.is_recents() && self.options.recents_always_visible)
    }

    /// Number of keys backing `id`.
    fn key_count(&self, id: CategoryId) -> usize {
        if id.is_recents() {
            self.recents.len()
        } else {
            self.keys.get(&id).map_or(0, Vec::len)
        }
    }

    /// Recompute every page count without touching the cursor.
    fn recompute_page_counts(&mut self) {
        let cap = self.options.page_capacity.get();
        let counts: Vec<usize> = self
            .categories
            .iter()
            .map(|c| self.key_count(c.id).div_ceil(cap))
            .collect();
        for (c, count) in self.categories.iter_mut().zip(counts) {
            c.page_count = count;
        }
    }

    /// Clamp `page` into `[0, page_count)` of `id`; 0 for empty categories.
    fn clamp_page(&self, id: CategoryId, page: usize) -> usize {
        let count = self.category(id).map_or(0, |c| c.page_count);
        if count == 0 { 0 } else { page.min(count - 1) }
    }

    /// Categories the user may navigate to, in display order.
    #[must_use]
    pub fn shown_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| self.is_visible(c)).collect()
    }

    /// Look up any category (shown or not) by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Whether `id` is currently navigable.
    #[must_use]
    pub fn is_shown(&self, id: CategoryId) -> bool {
        self.category(id).is_some_and(|c| self.is_visible(c))
    }

    /// What: Build the tab strip entries.
    ///
    /// Inputs:
    /// - `with_search`: Prepend the synthetic search tab.
    ///
    /// Output:
    /// - `[Search?, Category(id)...]` in display order.
    #[must_use]
    pub fn nav_tabs(&self, with_search: bool) -> Vec<NavTab> {
        let mut tabs = Vec::with_capacity(self.categories.len() + 1);
        if with_search {
            tabs.push(NavTab::Search);
        }
        tabs.extend(self.shown_categories().iter().map(|c| NavTab::Category(c.id)));
        tabs
    }

    /// What: Make `id` the current category.
    ///
    /// Inputs:
    /// - `id`: Target category.
    /// - `animate`: Caller's animation preference, passed through on non-initial changes.
    ///
    /// Output:
    /// - `Some(CategoryChange)` when the cursor moved, `None` otherwise.
    ///
    /// Details:
    /// - Unknown or hidden ids are a silent no-op.
    /// - Re-selecting the current category is a no-op, except for the very first call.
    /// - The page last visited in the target category is restored, clamped.
    pub fn set_current_category(
        &mut self,
        id: CategoryId,
        animate: bool,
    ) -> Option<CategoryChange> {
        if !self.is_shown(id) {
            tracing::debug!(category = %id, "ignoring selection of hidden category");
            return None;
        }
        let initial = !self.initialized;
        if !initial && id == self.cursor.category {
            return None;
        }
        let previous = self.cursor.category;
        self.remembered_pages.insert(previous, self.cursor.page);
        let page = self.remembered_pages.get(&id).copied().unwrap_or(0);
        self.cursor = NavigationCursor {
            category: id,
            page: self.clamp_page(id, page),
        };
        self.initialized = true;
        tracing::debug!(from = %previous, to = %id, page = self.cursor.page, "category changed");
        Some(CategoryChange {
            previous,
            current: id,
            animate: animate && !initial,
            initial,
        })
    }

    /// What: Position of `id` within [`Self::shown_categories`].
    ///
    /// # Errors
    /// - `PaletteError::CategoryNotFound` when `id` is not shown.
    pub fn tab_index_for_category(&self, id: CategoryId) -> Result<usize> {
        self.shown_categories()
            .iter()
            .position(|c| c.id == id)
            .ok_or(PaletteError::CategoryNotFound(id))
    }

    /// Inverse of [`Self::tab_index_for_category`].
    #[must_use]
    pub fn category_at_tab(&self, index: usize) -> Option<CategoryId> {
        self.shown_categories().get(index).map(|c| c.id)
    }

    /// Full cursor value.
    #[must_use]
    pub const fn cursor(&self) -> NavigationCursor {
        self.cursor
    }

    /// Id of the current category.
    #[must_use]
    pub const fn current_category_id(&self) -> CategoryId {
        self.cursor.category
    }

    /// Page count of the current category.
    #[must_use]
    pub fn current_page_count(&self) -> usize {
        self.category(self.cursor.category).map_or(0, |c| c.page_count)
    }

    /// Page index within the current category.
    #[must_use]
    pub const fn current_page_index(&self) -> usize {
        self.cursor.page
    }

    /// What: Set the current page, clamping instead of rejecting.
    ///
    /// Inputs:
    /// - `index`: Requested page; negative "no position" values clamp to 0.
    ///
    /// Details:
    /// - Scroll-driven updates routinely overshoot at the fractional extremes.
    pub fn set_current_page_index(&mut self, index: i64) {
        let requested = usize::try_from(index).unwrap_or(0);
        self.cursor.page = self.clamp_page(self.cursor.category, requested);
    }

    /// Whether the current category is RECENTS.
    #[must_use]
    pub const fn is_in_recents_category(&self) -> bool {
        self.cursor.category.is_recents()
    }

    /// What: Recompute every page count and repair the cursor.
    ///
    /// Output:
    /// - `Some(CategoryChange)` when the current category stopped being shown and the cursor
    ///   was redirected to the nearest shown category; `None` otherwise.
    ///
    /// Details:
    /// - The nearest category is the next shown one in display order, else the previous one.
    /// - The page index is clamped to the (possibly smaller) page count.
    /// - Flush pending recents before calling this, so RECENTS never looks empty mid-transition.
    pub fn invalidate_page_counts(&mut self) -> Option<CategoryChange> {
        self.recompute_page_counts();
        let mut redirect = None;
        if !self.is_shown(self.cursor.category) {
            let order = self
                .category(self.cursor.category)
                .map_or(0, |c| c.display_order);
            let shown = self.shown_categories();
            let target = shown
                .iter()
                .find(|c| c.display_order > order)
                .or_else(|| shown.iter().rev().find(|c| c.display_order < order))
                .map(|c| c.id);
            if let Some(target) = target {
                let previous = self.cursor.category;
                self.remembered_pages.insert(previous, 0);
                let page = self.remembered_pages.get(&target).copied().unwrap_or(0);
                self.cursor = NavigationCursor {
                    category: target,
                    page,
                };
                tracing::debug!(from = %previous, to = %target, "redirected cursor off empty category");
                redirect = Some(CategoryChange {
                    previous,
                    current: target,
                    animate: false,
                    initial: false,
                });
            }
        }
        self.cursor.page = self.clamp_page(self.cursor.category, self.cursor.page);
        redirect
    }

    /// What: Keys displayed on one page of a category.
    ///
    /// Output:
    /// - The `page`-th chunk of the category's keys; empty when out of range or unknown.
    #[must_use]
    pub fn page_keys(&self, id: CategoryId, page: usize) -> Vec<String> {
        let cap = self.options.page_capacity.get();
        let start = page.saturating_mul(cap);
        if id.is_recents() {
            return self.recents.keys().into_iter().skip(start).take(cap).collect();
        }
        self.keys.get(&id).map_or_else(Vec::new, |keys| {
            keys.iter().skip(start).take(cap).cloned().collect()
        })
    }

    /// What: Replace the backing key set of a non-recents category.
    ///
    /// Details:
    /// - Page counts are not recomputed here; call [`Self::invalidate_page_counts`] afterwards.
    ///
    /// # Errors
    /// - `PaletteError::CategoryNotFound` for unknown ids and for RECENTS, whose keys belong to
    ///   the recents store.
    pub fn set_category_keys(&mut self, id: CategoryId, keys: Vec<String>) -> Result<()> {
        match self.keys.get_mut(&id) {
            Some(slot) => {
                *slot = keys;
                Ok(())
            }
            None => Err(PaletteError::CategoryNotFound(id)),
        }
    }

    /// Every non-recents key, category display order then intra-category order.
    #[must_use]
    pub fn all_emoji_keys(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| !c.id.is_recents())
            .filter_map(|c| self.keys.get(&c.id))
            .flatten()
            .cloned()
            .collect()
    }

    /// Read access to the recents store.
    #[must_use]
    pub const fn recents(&self) -> &RecentsStore {
        &self.recents
    }

    /// Write access to the recents store; invalidate page counts after visible changes.
    pub const fn recents_mut(&mut self) -> &mut RecentsStore {
        &mut self.recents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryDef;

    fn keys(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn catalog() -> Catalog {
        Catalog {
            categories: vec![
                CategoryDef {
                    id: CategoryId(1),
                    name: "faces".into(),
                    keys: keys("f", 25),
                },
                CategoryDef {
                    id: CategoryId(2),
                    name: "empty".into(),
                    keys: Vec::new(),
                },
                CategoryDef {
                    id: CategoryId(3),
                    name: "food".into(),
                    keys: keys("d", 7),
                },
            ],
        }
    }

    fn options(cap: usize, recents_always_visible: bool) -> CategoryOptions {
        CategoryOptions {
            page_capacity: NonZeroUsize::new(cap).unwrap_or(NonZeroUsize::MIN),
            recents_always_visible,
        }
    }

    fn model() -> CategoryModel {
        CategoryModel::new(catalog(), RecentsStore::default(), options(10, false))
    }

    #[test]
    /// What: Page counts, visibility and initial cursor follow the key sets.
    ///
    /// Inputs:
    /// - 25 keys, 0 keys, 7 keys at 10 per page; no recents; recents hidden when empty.
    ///
    /// Output:
    /// - Shown `[1, 3]` with 3 and 1 pages; cursor starts on category 1.
    fn shown_categories_and_page_counts() {
        let m = model();
        let shown: Vec<CategoryId> = m.shown_categories().iter().map(|c| c.id).collect();
        assert_eq!(shown, vec![CategoryId(1), CategoryId(3)]);
        assert_eq!(m.category(CategoryId(1)).map(|c| c.page_count), Some(3));
        assert_eq!(m.category(CategoryId(2)).map(|c| c.page_count), Some(0));
        assert_eq!(m.current_category_id(), CategoryId(1));
        assert_eq!(m.current_page_count(), 3);

        let visible = CategoryModel::new(catalog(), RecentsStore::default(), options(10, true));
        assert_eq!(visible.shown_categories()[0].id, CategoryId::RECENTS);
        // Empty recents is visible but not the starting category.
        assert_eq!(visible.current_category_id(), CategoryId(1));
    }

    #[test]
    /// What: Non-empty recents become the starting category.
    fn starts_on_recents_when_it_has_keys() {
        let mut recents = RecentsStore::default();
        recents.add_first("😀");
        let m = CategoryModel::new(catalog(), recents, options(10, false));
        assert!(m.is_in_recents_category());
        assert_eq!(m.current_page_count(), 1);
    }

    #[test]
    /// What: Repeated selection of the same id yields exactly one transition.
    fn set_current_category_is_idempotent() {
        let mut m = model();
        let first = m.set_current_category(CategoryId(1), true);
        assert_eq!(
            first,
            Some(CategoryChange {
                previous: CategoryId(1),
                current: CategoryId(1),
                animate: false,
                initial: true,
            })
        );
        assert_eq!(m.set_current_category(CategoryId(1), true), None);

        let change = m.set_current_category(CategoryId(3), true);
        assert_eq!(change.map(|c| (c.current, c.animate)), Some((CategoryId(3), true)));
        assert_eq!(m.set_current_category(CategoryId(3), true), None);
    }

    #[test]
    /// What: Hidden or unknown categories are ignored silently and lookups fail with `CategoryNotFound`.
    fn hidden_category_is_ignored() {
        let mut m = model();
        assert_eq!(m.set_current_category(CategoryId(2), false), None);
        assert_eq!(m.set_current_category(CategoryId(42), false), None);
        assert_eq!(m.current_category_id(), CategoryId(1));

        assert_eq!(m.tab_index_for_category(CategoryId(3)).ok(), Some(1));
        assert!(matches!(
            m.tab_index_for_category(CategoryId(2)),
            Err(PaletteError::CategoryNotFound(CategoryId(2)))
        ));
        assert_eq!(m.category_at_tab(1), Some(CategoryId(3)));
        assert_eq!(m.category_at_tab(5), None);
    }

    #[test]
    /// What: Page index clamps at both ends.
    fn set_current_page_index_clamps() {
        let mut m = model();
        m.set_current_page_index(7);
        assert_eq!(m.current_page_index(), 2);
        m.set_current_page_index(-1);
        assert_eq!(m.current_page_index(), 0);
        m.set_current_page_index(1);
        assert_eq!(m.current_page_index(), 1);
    }

    #[test]
    /// What: Pages are remembered per category and restored on return.
    fn remembered_page_restored() {
        let mut m = model();
        m.set_current_category(CategoryId(1), false);
        m.set_current_page_index(2);
        m.set_current_category(CategoryId(3), false);
        assert_eq!(m.current_page_index(), 0);
        m.set_current_category(CategoryId(1), false);
        assert_eq!(m.current_page_index(), 2);
    }

    #[test]
    /// What: Shrinking the current key set clamps the cursor; emptying it redirects.
    ///
    /// Inputs:
    /// - Cursor on page 2 of category 1, then its keys shrink to 12, then to 0.
    ///
    /// Output:
    /// - Page becomes 1 of 2; then the cursor moves to the next shown category (3).
    fn invalidate_clamps_and_redirects() {
        let mut m = model();
        m.set_current_category(CategoryId(1), false);
        m.set_current_page_index(2);

        m.set_category_keys(CategoryId(1), keys("f", 12))
            .expect("known category");
        assert_eq!(m.invalidate_page_counts(), None);
        assert_eq!(m.current_page_count(), 2);
        assert_eq!(m.current_page_index(), 1);
        assert!(m.current_page_index() < m.current_page_count());

        m.set_category_keys(CategoryId(1), Vec::new())
            .expect("known category");
        let redirect = m.invalidate_page_counts();
        assert_eq!(redirect.map(|c| c.current), Some(CategoryId(3)));
        assert_eq!(m.current_category_id(), CategoryId(3));
        assert_eq!(m.current_page_index(), 0);

        // Last category emptied: fall back to the previous shown one.
        m.set_category_keys(CategoryId(1), keys("f", 3))
            .expect("known category");
        m.set_category_keys(CategoryId(3), Vec::new())
            .expect("known category");
        let redirect = m.invalidate_page_counts();
        assert_eq!(redirect.map(|c| c.current), Some(CategoryId(1)));
    }

    #[test]
    /// What: After invalidation the page index is in range for every reachable category.
    fn invalidate_keeps_index_in_range_for_all_categories() {
        let mut m = model();
        let ids: Vec<CategoryId> = m.shown_categories().iter().map(|c| c.id).collect();
        for id in ids {
            m.set_current_category(id, false);
            m.set_current_page_index(i64::MAX);
            m.invalidate_page_counts();
            if m.current_page_count() > 0 {
                assert!(m.current_page_index() < m.current_page_count());
            }
        }
    }

    #[test]
    /// What: Page keys slice categories and recents; RECENTS key sets cannot be replaced.
    fn page_keys_and_all_keys() {
        let mut m = model();
        assert_eq!(m.page_keys(CategoryId(1), 2), keys("f", 25)[20..].to_vec());
        assert!(m.page_keys(CategoryId(1), 3).is_empty());

        m.recents_mut().add_first("x");
        m.recents_mut().add_first("y");
        assert_eq!(m.page_keys(CategoryId::RECENTS, 0), vec!["y", "x"]);

        let all = m.all_emoji_keys();
        assert_eq!(all.len(), 32);
        assert_eq!(all.first().map(String::as_str), Some("f0"));
        assert_eq!(all.last().map(String::as_str), Some("d6"));

        assert!(m.set_category_keys(CategoryId::RECENTS, Vec::new()).is_err());
    }

    #[test]
    /// What: The tab strip puts search first when requested.
    fn nav_tabs_layout() {
        let m = model();
        assert_eq!(
            m.nav_tabs(true),
            vec![
                NavTab::Search,
                NavTab::Category(CategoryId(1)),
                NavTab::Category(CategoryId(3))
            ]
        );
        assert_eq!(m.nav_tabs(false).len(), 2);
    }
}
