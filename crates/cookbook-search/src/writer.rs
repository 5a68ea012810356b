//! Build-time writer for `search-data.json`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{INDEX_FILE_NAME, IndexDocument, IndexedRecipe, Result, WriterSettings};

/// Maximum recommended size for the index document (500KB).
pub const MAX_INDEX_SIZE: usize = 500 * 1024;

/// Recipe metadata as the site generator knows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub category: String,
    pub is_cocktail: bool,
    pub cuisine: Option<String>,
    pub spirit_base: Option<String>,
}

impl IndexDocument {
    /// Build the index document for a recipe collection.
    ///
    /// Only the active classification field is emitted, as an empty string
    /// when the recipe does not set it.
    pub fn from_summaries(summaries: &[RecipeSummary], settings: &WriterSettings) -> Self {
        let recipes = summaries
            .iter()
            .map(|summary| {
                let (cuisine, spirit_base) = if summary.is_cocktail {
                    (None, Some(summary.spirit_base.clone().unwrap_or_default()))
                } else {
                    (Some(summary.cuisine.clone().unwrap_or_default()), None)
                };

                IndexedRecipe {
                    title: summary.title.clone(),
                    slug: summary.slug.clone(),
                    description: summary.description.clone().unwrap_or_default(),
                    tags: summary.tags.clone(),
                    category: summary.category.clone(),
                    is_cocktail: summary.is_cocktail,
                    cuisine,
                    spirit_base,
                    url: settings.recipe_url(&summary.slug),
                }
            })
            .collect();

        Self { recipes }
    }

    /// Write the document as `search-data.json` under `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let json = self.to_json_pretty()?;

        if json.len() > MAX_INDEX_SIZE {
            tracing::warn!(
                size = json.len(),
                max = MAX_INDEX_SIZE,
                "Search index exceeds recommended size"
            );
        }

        fs::create_dir_all(dir)?;
        let path = dir.join(INDEX_FILE_NAME);
        fs::write(&path, json)?;

        info!(
            recipes = self.recipes.len(),
            path = %path.display(),
            "Wrote search index"
        );
        Ok(path)
    }
}
