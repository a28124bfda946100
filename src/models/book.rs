use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, Result};

/// A book in the catalog, the unit of storage and indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Book {
    /// Unique identifier, assigned by the store on first persist
    pub id: Option<Uuid>,

    /// Book title (tokenized for search)
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    /// Category (exact-match dimension, never tokenized)
    pub category: BookCategory,

    /// Detailed description (tokenized for search)
    pub description: String,
}

impl Book {
    /// Create a new, not-yet-persisted book. The id stays empty until the
    /// store assigns one.
    pub fn new(
        title: impl Into<String>,
        category: BookCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            category,
            description: description.into(),
        }
    }
}

/// The closed set of book categories.
///
/// String forms use the legacy uppercase spellings (`FANTASY`, `SCIFI`, ...);
/// anything else fails to parse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookCategory {
    Fantasy,
    SciFi,
    Mystery,
    Horror,
    NonFiction,
}

impl BookCategory {
    /// Parse a category from its string form, rejecting anything outside the
    /// enumeration.
    pub fn parse(value: &str) -> Result<Self> {
        value
            .parse::<BookCategory>()
            .map_err(|_| CatalogError::InvalidCategory(value.to_string()))
    }
}
