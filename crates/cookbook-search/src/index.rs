//! In-memory recipe index and ranking.
//!
//! The whole index is loaded once per page and every query re-scores every
//! entry. Recipe collections are small (tens to low hundreds of entries), so a
//! linear pass is cheaper than maintaining any auxiliary structure.

use crate::{IndexDocument, IndexedRecipe, Result, SearchQuery, scoring::score_recipe};

/// Suffix appended to the site's base URL to locate the index document.
pub const INDEX_FILE_NAME: &str = "search-data.json";

/// Default cap on the number of ranked results.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Build the index document URL from a base-URL prefix.
pub fn index_url(base_url: &str) -> String {
    format!("{}/{INDEX_FILE_NAME}", base_url.trim_end_matches('/'))
}

/// A recipe paired with its relevance for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredResult<'a> {
    /// The matching recipe.
    pub recipe: &'a IndexedRecipe,

    /// Relevance score, always > 0 for returned results.
    pub score: u32,

    /// Position of the recipe in the index.
    pub position: usize,
}

/// The in-memory recipe index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    recipes: Vec<IndexedRecipe>,
}

impl SearchIndex {
    /// Create an empty index.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an index from recipes, preserving their order.
    pub fn new(recipes: Vec<IndexedRecipe>) -> Self {
        Self { recipes }
    }

    /// Parse an index from the JSON index document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(IndexDocument::from_json(json)?.into())
    }

    /// All recipes in index order.
    pub fn recipes(&self) -> &[IndexedRecipe] {
        &self.recipes
    }

    /// Get recipe count.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the index holds no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Rank the index against a query.
    ///
    /// Keeps recipes scoring above zero, orders them by descending score with
    /// ties left in index order, and returns at most `limit` of them.
    pub fn search(&self, query: &SearchQuery, limit: usize) -> Vec<ScoredResult<'_>> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredResult<'_>> = self
            .recipes
            .iter()
            .enumerate()
            .filter_map(|(position, recipe)| {
                let score = score_recipe(recipe, query);
                (score > 0).then_some(ScoredResult {
                    recipe,
                    score,
                    position,
                })
            })
            .collect();

        // `sort_by` is stable, so equal scores keep index order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);

        tracing::trace!(
            query = %query.normalized,
            matches = scored.len(),
            "Scored recipe index"
        );

        scored
    }
}

impl From<IndexDocument> for SearchIndex {
    fn from(doc: IndexDocument) -> Self {
        Self::new(doc.recipes)
    }
}

/// Something that yields the raw index document.
#[allow(async_fn_in_trait)]
pub trait IndexSource {
    /// Fetch the JSON body of the index document.
    async fn fetch_text(&self) -> Result<String>;

    /// Human-readable origin, used in log messages.
    fn describe(&self) -> String;
}

/// Load the index from `source`, falling back to an empty index.
///
/// Search is an enhancement: fetch, HTTP and decode failures are logged and
/// yield zero recipes instead of an error.
pub async fn load_index<S: IndexSource>(source: &S) -> SearchIndex {
    let origin = source.describe();

    let json = match source.fetch_text().await {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(source = %origin, error = %e, "Failed to fetch recipe index");
            return SearchIndex::empty();
        }
    };

    match SearchIndex::from_json(&json) {
        Ok(index) => {
            tracing::info!(source = %origin, recipes = index.len(), "Loaded recipe index");
            index
        }
        Err(e) => {
            tracing::warn!(source = %origin, error = %e, "Failed to parse recipe index");
            SearchIndex::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::SearchError;

    fn recipe(title: &str, tags: &[&str]) -> IndexedRecipe {
        IndexedRecipe {
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            url: format!("/recipes/{}/", title.to_lowercase().replace(' ', "-")),
            ..Default::default()
        }
    }

    fn create_test_index() -> SearchIndex {
        SearchIndex::new(vec![
            recipe("Lemon Tart", &["dessert", "lemon"]),
            recipe("Lemonade", &["drink"]),
            recipe("Chicken Soup", &["soup"]),
            recipe("Lemon Chicken", &["chicken"]),
        ])
    }

    struct StaticSource(std::result::Result<&'static str, u16>);

    impl IndexSource for StaticSource {
        async fn fetch_text(&self) -> Result<String> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(0) => Err(SearchError::network("connection refused")),
                Err(status) => Err(SearchError::Http { status }),
            }
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[test]
    fn test_ranking() {
        let index = create_test_index();
        let results = index.search(&SearchQuery::parse("lemon"), 10);

        let titles: Vec<_> = results.iter().map(|r| r.recipe.title.as_str()).collect();
        // Lemon Tart: 10 + 5 + tag 16 = 31; Lemonade: 15; Lemon Chicken: 15
        assert_eq!(titles, vec!["Lemon Tart", "Lemonade", "Lemon Chicken"]);
        assert_eq!(results[0].score, 31);
        assert_eq!(results[1].position, 1);
        assert_eq!(results[2].position, 3);
    }

    #[test]
    fn test_ties_keep_index_order() {
        let index = SearchIndex::new((0..5).map(|i| recipe(&format!("Stew {i}"), &[])).collect());
        let results = index.search(&SearchQuery::parse("stew"), 10);
        let positions: Vec<_> = results.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let index =
            SearchIndex::new((0..25).map(|i| recipe(&format!("Salad {i}"), &["salad"])).collect());
        let results = index.search(&SearchQuery::parse("salad"), DEFAULT_MAX_RESULTS);
        assert_eq!(results.len(), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_empty_query_and_empty_index() {
        let index = create_test_index();
        assert!(index.search(&SearchQuery::parse("  "), 10).is_empty());
        assert!(SearchIndex::empty().search(&SearchQuery::parse("lemon"), 10).is_empty());
    }

    #[test]
    fn test_from_json_preserves_order() {
        let json = r#"{"recipes": [{"title": "B"}, {"title": "A"}, {"title": "C"}]}"#;
        let index = SearchIndex::from_json(json).unwrap();
        let titles: Vec<_> = index.recipes().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_load_index_success() {
        let source = StaticSource(Ok(r#"{"recipes": [{"title": "Lemonade"}]}"#));
        let index = block_on(load_index(&source));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_load_index_fails_soft() {
        for source in [
            StaticSource(Err(0)),
            StaticSource(Err(500)),
            StaticSource(Ok("<html>not json</html>")),
            StaticSource(Ok(r#"{"pages": []}"#)),
        ] {
            let index = block_on(load_index(&source));
            assert!(index.is_empty());
            assert!(index.search(&SearchQuery::parse("lemon"), 10).is_empty());
        }
    }

    #[test]
    fn test_index_url() {
        assert_eq!(index_url(""), "/search-data.json");
        assert_eq!(index_url("/cookbook"), "/cookbook/search-data.json");
        assert_eq!(index_url("https://example.com/"), "https://example.com/search-data.json");
    }
}
