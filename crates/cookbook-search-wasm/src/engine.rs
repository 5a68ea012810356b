//! Headless search API for scripts that draw their own UI.

use cookbook_search::{
    DEFAULT_MAX_RESULTS, DEFAULT_MAX_TAGS, IndexSource, ResultEntry, SearchIndex, SearchQuery,
};
use wasm_bindgen::prelude::*;

use crate::fetch::HttpIndexSource;

/// Recipe search without the widget.
#[wasm_bindgen]
pub struct RecipeSearch {
    index: SearchIndex,
}

#[wasm_bindgen]
impl RecipeSearch {
    /// Load the index from a URL.
    ///
    /// Unlike the widget this reports failures to the caller.
    #[wasm_bindgen(js_name = load)]
    pub async fn load(index_url: String) -> Result<RecipeSearch, JsValue> {
        let json = HttpIndexSource::new(index_url)
            .fetch_text()
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Self::from_json(&json)
    }

    /// Create from a JSON string (for testing).
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<RecipeSearch, JsValue> {
        let index = SearchIndex::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { index })
    }

    /// Ranked results as an array of `{ title, label, tags, url, score }`.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<JsValue, JsValue> {
        let entries = self.entries(query, limit.unwrap_or(DEFAULT_MAX_RESULTS));
        serde_wasm_bindgen::to_value(&entries).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the number of indexed recipes.
    #[wasm_bindgen(js_name = recipeCount)]
    pub fn recipe_count(&self) -> usize {
        self.index.len()
    }
}

impl RecipeSearch {
    fn entries(&self, query: &str, limit: usize) -> Vec<ResultEntry> {
        self.index
            .search(&SearchQuery::parse(query), limit)
            .iter()
            .map(|result| ResultEntry::from_scored(result, DEFAULT_MAX_TAGS))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "recipes": [
            {"title": "Tom Yum", "tags": ["soup", "spicy"], "is_cocktail": false,
             "cuisine": "Thai", "category": "soups", "url": "/recipes/tom-yum/"},
            {"title": "Mai Tai", "tags": ["rum", "tiki"], "is_cocktail": true,
             "spirit_base": "rum", "category": "cocktails", "url": "/recipes/mai-tai/"}
        ]
    }"#;

    #[test]
    fn test_from_json_and_count() {
        let engine = RecipeSearch::from_json(INDEX).unwrap();
        assert_eq!(engine.recipe_count(), 2);
    }

    #[test]
    fn test_entries() {
        let engine = RecipeSearch::from_json(INDEX).unwrap();

        let entries = engine.entries("thai", 10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Thai");

        let entries = engine.entries("rum", 10);
        assert_eq!(entries[0].url, "/recipes/mai-tai/");
        assert_eq!(entries[0].score, 24);

        assert!(engine.entries("", 10).is_empty());
    }
}
