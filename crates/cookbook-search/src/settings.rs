//! Widget options and build-time writer settings.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_RESULTS, DEFAULT_MAX_TAGS, index::index_url};

/// Options for one search widget instance.
///
/// Deserialized from the options object the page passes to `attach`; every
/// field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Site base-URL prefix (e.g., "/cookbook"). May be empty.
    pub base_url: String,

    /// `id` of the search input element.
    pub input_id: String,

    /// `id` of the result panel element.
    pub results_id: String,

    /// Quiet period before a keystroke triggers a search.
    pub debounce_ms: u32,

    /// Maximum number of results shown.
    pub max_results: usize,

    /// Maximum number of tags shown per result.
    pub max_tags: usize,
}

fn default_input_id() -> String {
    "search-input".to_string()
}

fn default_results_id() -> String {
    "search-results".to_string()
}

fn default_debounce_ms() -> u32 {
    300
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            input_id: default_input_id(),
            results_id: default_results_id(),
            debounce_ms: default_debounce_ms(),
            max_results: DEFAULT_MAX_RESULTS,
            max_tags: DEFAULT_MAX_TAGS,
        }
    }
}

impl WidgetConfig {
    /// Copy with the display limits raised to at least one.
    ///
    /// A zero limit would hide every match and show the no-results message
    /// for queries that did match.
    pub fn normalized(&self) -> Self {
        Self {
            max_results: self.max_results.max(1),
            max_tags: self.max_tags.max(1),
            ..self.clone()
        }
    }

    /// URL of the index document.
    pub fn index_url(&self) -> String {
        index_url(&self.base_url)
    }
}

/// Settings for writing `search-data.json` at build time.
#[cfg(feature = "writer")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterSettings {
    /// Base URL prefixed to every recipe URL. May be empty.
    #[serde(default)]
    pub base_url: String,

    /// Directory the index document is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

#[cfg(feature = "writer")]
fn default_output_dir() -> String {
    "output".to_string()
}

#[cfg(feature = "writer")]
impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            output_dir: default_output_dir(),
        }
    }
}

#[cfg(feature = "writer")]
impl WriterSettings {
    /// Parse settings from a TOML string.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate();
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &std::path::Path) -> crate::Result<Self> {
        if !path.exists() {
            return Err(crate::SearchError::config(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from a TOML file overlaid with `COOKBOOK__*` variables.
    ///
    /// The file is optional; without it, defaults and the environment apply.
    pub fn load_with_env(path: &std::path::Path) -> crate::Result<Self> {
        Self::load_layered(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("COOKBOOK").separator("__")
    }

    fn load_layered(path: &std::path::Path, env: config::Environment) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(env)
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate();
        Ok(settings)
    }

    fn validate(&self) {
        if self.base_url.ends_with('/') {
            tracing::warn!("base_url should not have a trailing slash");
        }
    }

    /// Recipe URL for a slug.
    pub fn recipe_url(&self, slug: &str) -> String {
        format!("{}/recipes/{slug}/", self.base_url.trim_end_matches('/'))
    }
}
