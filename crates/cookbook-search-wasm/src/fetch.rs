//! Fetching the index document over HTTP.

use cookbook_search::{IndexSource, Result, SearchError};
use gloo_net::http::Request;

/// Index document served at a URL.
#[derive(Debug, Clone)]
pub struct HttpIndexSource {
    url: String,
}

impl HttpIndexSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl IndexSource for HttpIndexSource {
    async fn fetch_text(&self) -> Result<String> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| SearchError::network(e.to_string()))?;

        if !response.ok() {
            return Err(SearchError::Http {
                status: response.status(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::network(format!("Failed to read response: {e}")))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
