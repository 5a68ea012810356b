//! Relevance scoring for a single recipe.
//!
//! Scores are additive integers. Every rule fires independently, so a title that
//! both contains and starts with the query collects both the substring and the
//! prefix points, and each matching tag contributes its own points.
//!
//! | Field          | Exact | Substring | Other                         |
//! |----------------|-------|-----------|-------------------------------|
//! | Title          | 20    | 10        | +5 when it starts with query  |
//! | Tag (each)     | 16    | 8         |                               |
//! | Description    |       |           | 5 once, at a word boundary    |
//! | Classification | 8     | 3         |                               |
//!
//! Descriptions require a word-start match so "gin" does not hit "original";
//! the other fields use plain containment.

use crate::{IndexedRecipe, SearchQuery};

/// Title equals the query.
pub const TITLE_EXACT: u32 = 20;

/// Title contains the query without being equal to it.
pub const TITLE_SUBSTRING: u32 = 10;

/// Title starts with the query, on top of either title rule.
pub const TITLE_PREFIX_BONUS: u32 = 5;

/// A tag equals the query.
pub const TAG_EXACT: u32 = 16;

/// A tag contains the query without being equal to it.
pub const TAG_SUBSTRING: u32 = 8;

/// The description has a word starting with the query.
pub const DESCRIPTION_WORD_START: u32 = 5;

/// The active classification equals the query.
pub const CLASSIFICATION_EXACT: u32 = 8;

/// The active classification contains the query without being equal to it.
pub const CLASSIFICATION_SUBSTRING: u32 = 3;

/// Score a recipe against a parsed query. Empty queries score 0.
pub fn score_recipe(recipe: &IndexedRecipe, query: &SearchQuery) -> u32 {
    if query.is_empty() {
        return 0;
    }
    let q = query.normalized.as_str();

    let mut score = 0;

    let title = recipe.title.to_lowercase();
    score += exact_or_substring(&title, q, TITLE_EXACT, TITLE_SUBSTRING);
    if title.starts_with(q) {
        score += TITLE_PREFIX_BONUS;
    }

    score += recipe
        .tags
        .iter()
        .map(|tag| exact_or_substring(&tag.to_lowercase(), q, TAG_EXACT, TAG_SUBSTRING))
        .sum::<u32>();

    if query.matches_word_start(&recipe.description.to_lowercase()) {
        score += DESCRIPTION_WORD_START;
    }

    if let Some(class) = recipe.classification() {
        score += exact_or_substring(
            &class.to_lowercase(),
            q,
            CLASSIFICATION_EXACT,
            CLASSIFICATION_SUBSTRING,
        );
    }

    score
}

fn exact_or_substring(field: &str, q: &str, exact: u32, substring: u32) -> u32 {
    if field == q {
        exact
    } else if field.contains(q) {
        substring
    } else {
        0
    }
}
