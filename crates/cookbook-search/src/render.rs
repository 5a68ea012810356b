//! What the result panel shows, independent of how it is drawn.

use serde::{Deserialize, Serialize};

use crate::ScoredResult;

/// Hint shown under the "no results" message.
pub const NO_RESULTS_HINT: &str = "Try an ingredient, a cuisine, or a spirit.";

/// Default number of tags shown per result.
pub const DEFAULT_MAX_TAGS: usize = 3;

/// One row of the result panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    /// Recipe title.
    pub title: String,

    /// Spirit base or cuisine, falling back to the category.
    pub label: String,

    /// Leading tags, already truncated.
    pub tags: Vec<String>,

    /// Navigation target.
    pub url: String,

    /// Relevance score.
    pub score: u32,
}

impl ResultEntry {
    /// Build a row from a scored result, keeping at most `max_tags` tags.
    pub fn from_scored(result: &ScoredResult<'_>, max_tags: usize) -> Self {
        let recipe = result.recipe;
        Self {
            title: recipe.title.clone(),
            label: recipe.classification_label().to_string(),
            tags: recipe.tags.iter().take(max_tags).cloned().collect(),
            url: recipe.url.clone(),
            score: result.score,
        }
    }

    /// Tags joined for display.
    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }
}

/// Content of the result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    /// Panel hidden.
    Hidden,

    /// Ranked results, in order.
    Results(Vec<ResultEntry>),

    /// The query matched nothing. Holds the query as typed (trimmed).
    NoResults(String),
}

impl PanelView {
    /// Text for the polite live region.
    pub fn announcement(&self) -> String {
        match self {
            PanelView::Hidden => String::new(),
            PanelView::Results(entries) if entries.len() == 1 => "1 recipe found".to_string(),
            PanelView::Results(entries) => format!("{} recipes found", entries.len()),
            PanelView::NoResults(_) => "No recipes found".to_string(),
        }
    }

    /// Number of selectable entries.
    pub fn entry_count(&self) -> usize {
        match self {
            PanelView::Results(entries) => entries.len(),
            _ => 0,
        }
    }
}

/// The "no results" sentence. Callers must insert it as text, never as markup.
pub fn no_results_message(query: &str) -> String {
    format!("No recipes found for \"{query}\"")
}
