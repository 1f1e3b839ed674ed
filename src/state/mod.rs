//! Navigation, recents and search state.
//!
//! Everything here is plain data mutated by the palette controller on its own
//! sequential context; none of it performs I/O.

pub mod category;
pub mod progress;
pub mod recents;
pub mod search;

pub use category::{
    Category, CategoryChange, CategoryModel, CategoryOptions, DEFAULT_PAGE_CAPACITY, NavTab,
    NavigationCursor,
};
pub use progress::{PageProgress, PageProgressMapper, ScrollReport};
pub use recents::{RECENTS_CAPACITY, RecentsStore, recents_capacity};
pub use search::{SearchSession, SearchSurface};
