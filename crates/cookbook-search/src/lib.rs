//! Cookbook Recipe Search
//!
//! Client-side search over the cookbook's recipe index. Everything here is
//! platform independent; `cookbook-search-wasm` wires it to the browser.
//!
//! # Features
//!
//! - **Scoring**: additive integer relevance over title, tags, description
//!   and the recipe's classification (spirit base or cuisine)
//! - **Ranking**: stable descending sort, capped at ten results
//! - **Controller**: debounced, keyboard-driven widget state machine behind a
//!   [`Host`] trait
//! - **Writer** (feature `writer`): emits `search-data.json` at build time
//!
//! # Example
//!
//! ```
//! use cookbook_search::{SearchIndex, SearchQuery};
//!
//! let index = SearchIndex::from_json(
//!     r#"{"recipes": [{"title": "Negroni", "tags": ["gin"], "is_cocktail": true,
//!                      "spirit_base": "gin", "url": "/recipes/negroni/"}]}"#,
//! )
//! .unwrap();
//!
//! let results = index.search(&SearchQuery::parse("Gin"), 10);
//! assert_eq!(results[0].score, 24);
//! ```

pub mod controller;
pub mod debounce;
pub mod error;
pub mod index;
pub mod query;
pub mod recipe;
pub mod render;
pub mod scoring;
pub mod settings;
#[cfg(feature = "writer")]
pub mod writer;

pub use controller::{Host, Key, PanelState, SearchController};
pub use debounce::{Debouncer, Ticket};
pub use error::{Result, SearchError};
pub use index::{
    DEFAULT_MAX_RESULTS, INDEX_FILE_NAME, IndexSource, ScoredResult, SearchIndex,
    index_url, load_index,
};
pub use query::SearchQuery;
pub use recipe::{IndexDocument, IndexedRecipe};
pub use render::{DEFAULT_MAX_TAGS, NO_RESULTS_HINT, PanelView, ResultEntry, no_results_message};
pub use scoring::score_recipe;
pub use settings::WidgetConfig;
#[cfg(feature = "writer")]
pub use settings::WriterSettings;
#[cfg(feature = "writer")]
pub use writer::{MAX_INDEX_SIZE, RecipeSummary};
