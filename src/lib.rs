//! Library entry for emoji-palette: the emoji picker core plus its command-line front end.
//!
//! Core pieces, leaf first:
//!
//! - [`state::RecentsStore`]: bounded recents with a deferred-write buffer.
//! - [`state::CategoryModel`]: categories, page counts and the navigation cursor.
//! - [`state::PageProgressMapper`]: scroll metrics to fractional page positions.
//! - [`index::EmojiIndex`]: key list with description search.
//! - [`dictionary::DictionaryLifecycle`]: the locale-scoped dictionary and its hot swap.
//! - [`state::SearchSession`]: search mode and results.
//! - [`palette::EmojiPalette`]: the controller driving a [`palette::PaletteView`].

pub mod app;
pub mod args;
pub mod catalog;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod index;
pub mod palette;
pub mod state;

pub use error::{PaletteError, Result};
