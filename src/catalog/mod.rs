//! Emoji catalog: the key sets backing each browsable category.
//!
//! The catalog is either the built-in default set or a JSON file of the form
//! `{"categories": [{"id": 1, "name": "smileys_emotion", "keys": ["😀", ...]}]}`.
//! RECENTS is implicit and must not appear in a catalog; its keys come from the
//! recents store at runtime.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

mod builtin;

/// Identifier of a paged category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl CategoryId {
    /// Reserved id of the recently-used pseudo-category.
    pub const RECENTS: Self = Self(0);
    /// Smileys and emotion.
    pub const SMILEYS_EMOTION: Self = Self(1);
    /// People and body.
    pub const PEOPLE_BODY: Self = Self(2);
    /// Animals and nature.
    pub const ANIMALS_NATURE: Self = Self(3);
    /// Food and drink.
    pub const FOOD_DRINK: Self = Self(4);
    /// Travel and places.
    pub const TRAVEL_PLACES: Self = Self(5);
    /// Activities.
    pub const ACTIVITIES: Self = Self(6);
    /// Objects.
    pub const OBJECTS: Self = Self(7);
    /// Symbols.
    pub const SYMBOLS: Self = Self(8);
    /// Flags.
    pub const FLAGS: Self = Self(9);
    /// Text emoticons such as `:-)`.
    pub const EMOTICONS: Self = Self(10);

    /// Whether this is the reserved recents id.
    #[must_use]
    pub const fn is_recents(self) -> bool {
        self.0 == Self::RECENTS.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One category definition as it appears in a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Stable category id.
    pub id: CategoryId,
    /// Machine name, e.g. `smileys_emotion`.
    pub name: String,
    /// Emoji keys in intra-category order.
    #[serde(default)]
    pub keys: Vec<String>,
}

/// Ordered set of category definitions; vector order is display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Categories in display order (RECENTS excluded).
    pub categories: Vec<CategoryDef>,
}

impl Catalog {
    /// What: Return the built-in catalog shipped with the crate.
    ///
    /// Output:
    /// - Ten categories (smileys through emoticons) with a representative key set each.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// What: Parse and validate a catalog from JSON text.
    ///
    /// Inputs:
    /// - `json`: Catalog document.
    ///
    /// Output:
    /// - Validated `Catalog`.
    ///
    /// # Errors
    /// - `PaletteError::Catalog` on malformed JSON, the reserved recents id, or duplicate ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self =
            serde_json::from_str(json).map_err(|e| PaletteError::Catalog(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// What: Load a catalog file from disk.
    ///
    /// # Errors
    /// - `PaletteError::Io` when the file cannot be read.
    /// - `PaletteError::Catalog` when it does not validate.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PaletteError::io(format!("read catalog {}", path.display()), e))?;
        let catalog = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            categories = catalog.categories.len(),
            "loaded emoji catalog"
        );
        Ok(catalog)
    }

    /// Reject catalogs that redefine RECENTS or repeat an id.
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for def in &self.categories {
            if def.id.is_recents() {
                return Err(PaletteError::Catalog(format!(
                    "category `{}` uses the reserved recents id",
                    def.name
                )));
            }
            if !seen.insert(def.id) {
                return Err(PaletteError::Catalog(format!(
                    "duplicate category id {}",
                    def.id
                )));
            }
        }
        Ok(())
    }
}
