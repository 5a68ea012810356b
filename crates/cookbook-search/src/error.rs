//! Error types for the recipe search crates.

use thiserror::Error;

/// Result type alias using `SearchError`.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors raised while loading, parsing or writing the recipe index.
///
/// The widget itself never surfaces these to the page; they are logged and the
/// widget degrades to an empty index.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The index could not be fetched at all.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("Failed to load index: HTTP {status}")]
    Http { status: u16 },

    /// The body was not a valid index document.
    #[error("Failed to parse index: {0}")]
    Decode(#[from] serde_json::Error),

    /// A DOM anchor the widget needs is missing from the page.
    #[error("Missing element: #{0}")]
    MissingElement(String),

    /// The page refused a DOM operation the widget needs at attach time.
    #[error("DOM error: {0}")]
    Dom(String),

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings loading or parsing error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Create a new network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(feature = "writer")]
impl From<toml::de::Error> for SearchError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(feature = "writer")]
impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
