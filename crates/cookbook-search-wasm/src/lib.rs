//! Cookbook Search WASM Runtime
//!
//! Browser-side recipe search using WebAssembly.
//!
//! # Features
//!
//! - **SearchWidget**: binds to the page's search input and result panel,
//!   with debounced querying, keyboard navigation and ARIA live updates
//! - **RecipeSearch**: headless ranking API for custom front ends
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { SearchWidget } from 'cookbook-search-wasm';
//!
//! await init();
//! const widget = SearchWidget.attach({ baseUrl: '/to-serve-man' });
//! ```

pub mod dom;
pub mod engine;
pub mod fetch;
pub mod widget;

pub use dom::DomHost;
pub use engine::RecipeSearch;
pub use fetch::HttpIndexSource;
use wasm_bindgen::prelude::*;
pub use widget::SearchWidget;

/// Initialize the WASM module.
///
/// Sets up the panic hook and routes log output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Get the version of the search library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
