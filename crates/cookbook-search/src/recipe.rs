//! Recipe entries as they appear in `search-data.json`.

use serde::{Deserialize, Serialize};

/// One published recipe in the search index.
///
/// Every field tolerates absence so a single malformed entry never rejects the
/// whole document; such an entry simply never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexedRecipe {
    /// Display name.
    pub title: String,

    /// Identifier, unique within the index.
    pub slug: String,

    /// Free text, possibly empty.
    pub description: String,

    /// Tags in source order.
    pub tags: Vec<String>,

    /// Coarse grouping, e.g. "mains" or "cocktails".
    pub category: String,

    /// Selects which classification field is active.
    pub is_cocktail: bool,

    /// Cuisine, meaningful for food recipes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,

    /// Spirit base, meaningful for cocktails only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spirit_base: Option<String>,

    /// Navigation target.
    pub url: String,
}

impl IndexedRecipe {
    /// The classification field selected by `is_cocktail`.
    pub fn classification(&self) -> Option<&str> {
        if self.is_cocktail {
            self.spirit_base.as_deref()
        } else {
            self.cuisine.as_deref()
        }
    }

    /// Label shown next to a result: the classification, or the raw category
    /// when the classification is absent or blank.
    pub fn classification_label(&self) -> &str {
        match self.classification() {
            Some(value) if !value.trim().is_empty() => value,
            _ => &self.category,
        }
    }
}

/// The top-level index document: `{ "recipes": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// Recipes in publication order.
    pub recipes: Vec<IndexedRecipe>,
}

impl IndexDocument {
    /// Parse a document from JSON. The `recipes` array is required.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
