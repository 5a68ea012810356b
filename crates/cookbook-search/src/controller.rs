//! Search widget state machine.
//!
//! [`SearchController`] owns everything about one widget instance: the index,
//! the raw query, the panel state, the selection cursor and the pending
//! debounce timer. It performs no I/O itself; every effect on the page goes
//! through a [`Host`], which the browser runtime implements against the DOM.
//!
//! ```text
//!            non-empty query, ≥1 hit
//!   Closed ───────────────────────────▶ OpenWithResults
//!     ▲  ╲   non-empty query, 0 hits        │    ▲
//!     │   ╲────────────────────────▶ OpenNoResults
//!     │                                     │
//!     └── empty query │ Escape │ focus leaves │ click outside
//! ```

use crate::{
    Debouncer, PanelView, ResultEntry, SearchIndex, SearchQuery, Ticket, WidgetConfig,
};

/// Visible state of the result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    OpenWithResults,
    OpenNoResults,
}

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// The environment a controller drives.
pub trait Host {
    /// Handle for a scheduled timer.
    type Timer;

    /// Call [`SearchController::on_timer`] with `ticket` after `delay_ms`.
    fn schedule_search(&mut self, delay_ms: u32, ticket: Ticket) -> Self::Timer;

    /// Cancel a timer returned by [`Host::schedule_search`].
    fn cancel_timer(&mut self, timer: Self::Timer);

    /// Replace the panel content. Any previous selection marking is discarded.
    fn render(&mut self, view: &PanelView);

    /// Move the selection marker and bring `current` into view.
    fn show_selection(&mut self, previous: Option<usize>, current: Option<usize>);

    /// Follow a result link.
    fn navigate(&mut self, url: &str);

    /// Empty the search input.
    fn clear_input(&mut self);

    /// Remove focus from the search input.
    fn blur_input(&mut self);
}

/// State machine for one search widget.
pub struct SearchController<H: Host> {
    host: H,
    index: SearchIndex,
    max_results: usize,
    max_tags: usize,
    debouncer: Debouncer<H::Timer>,
    query: String,
    view: PanelView,
    cursor: Option<usize>,
    torn_down: bool,
}

impl<H: Host> SearchController<H> {
    /// Create a closed controller with an empty index.
    pub fn new(host: H, config: &WidgetConfig) -> Self {
        let config = config.normalized();
        Self {
            host,
            index: SearchIndex::empty(),
            max_results: config.max_results,
            max_tags: config.max_tags,
            debouncer: Debouncer::new(config.debounce_ms),
            query: String::new(),
            view: PanelView::Hidden,
            cursor: None,
            torn_down: false,
        }
    }

    /// Install the loaded index. Later queries search it.
    pub fn set_index(&mut self, index: SearchIndex) {
        if self.torn_down {
            return;
        }
        self.index = index;
    }

    /// Input changed: restart the debounce window with the latest text.
    pub fn on_input(&mut self, raw: &str) {
        if self.torn_down {
            return;
        }
        self.query = raw.to_string();

        let host = &mut self.host;
        let superseded = self
            .debouncer
            .arm(raw, |delay, ticket| host.schedule_search(delay, ticket));
        if let Some(timer) = superseded {
            self.host.cancel_timer(timer);
        }
    }

    /// A debounce timer fired. Stale tickets are ignored.
    pub fn on_timer(&mut self, ticket: Ticket) {
        if self.torn_down {
            return;
        }
        if let Some((text, _timer)) = self.debouncer.fire(ticket) {
            self.perform_search(&text);
        }
    }

    /// Score the index against `raw` and show the outcome.
    pub fn perform_search(&mut self, raw: &str) {
        if self.torn_down {
            return;
        }

        let query = SearchQuery::parse(raw);
        if query.is_empty() {
            self.close();
            return;
        }

        let entries: Vec<ResultEntry> = self
            .index
            .search(&query, self.max_results)
            .iter()
            .map(|result| ResultEntry::from_scored(result, self.max_tags))
            .collect();

        tracing::debug!(query = %query.normalized, results = entries.len(), "Search performed");

        self.view = if entries.is_empty() {
            PanelView::NoResults(raw.trim().to_string())
        } else {
            PanelView::Results(entries)
        };
        self.cursor = None;
        self.host.render(&self.view);
    }

    /// Keyboard input on the search box. Returns `true` when the key was
    /// consumed and the browser default should be suppressed.
    pub fn on_key(&mut self, key: Key) -> bool {
        if self.torn_down {
            return false;
        }

        match key {
            Key::ArrowDown if self.is_open() => {
                let last = self.view.entry_count().checked_sub(1);
                let next = match (self.cursor, last) {
                    (_, None) => None,
                    (None, Some(_)) => Some(0),
                    (Some(i), Some(last)) => Some((i + 1).min(last)),
                };
                self.select(next);
                true
            }
            Key::ArrowUp if self.is_open() => {
                let next = self.cursor.and_then(|i| i.checked_sub(1));
                self.select(next);
                true
            }
            Key::Enter => match self.selected_entry() {
                Some(entry) => {
                    let url = entry.url.clone();
                    self.host.navigate(&url);
                    true
                }
                None => false,
            },
            Key::Escape => {
                self.close();
                self.query.clear();
                self.host.clear_input();
                self.host.blur_input();
                true
            }
            _ => false,
        }
    }

    /// The input regained focus. Re-runs the current text without debounce.
    pub fn on_focus(&mut self, current_text: &str) {
        if self.torn_down {
            return;
        }
        self.query = current_text.to_string();
        if current_text.trim().is_empty() {
            return;
        }
        if let Some(timer) = self.debouncer.cancel() {
            self.host.cancel_timer(timer);
        }
        self.perform_search(current_text);
    }

    /// Focus moved somewhere outside the input and the panel.
    pub fn on_focus_leave(&mut self) {
        if self.torn_down {
            return;
        }
        self.close();
    }

    /// A click landed outside the input and the panel. The query is kept.
    pub fn on_click_outside(&mut self) {
        if self.torn_down {
            return;
        }
        self.close();
    }

    /// Stop reacting to anything. Pending work is cancelled and an open
    /// panel is hidden.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.close();
        self.torn_down = true;
    }

    /// Close the panel, reset the cursor and drop any pending search.
    fn close(&mut self) {
        if let Some(timer) = self.debouncer.cancel() {
            self.host.cancel_timer(timer);
        }
        self.cursor = None;
        if self.view != PanelView::Hidden {
            self.view = PanelView::Hidden;
            self.host.render(&self.view);
        }
    }

    fn select(&mut self, next: Option<usize>) {
        if next == self.cursor {
            return;
        }
        let previous = self.cursor;
        self.cursor = next;
        self.host.show_selection(previous, next);
    }

    fn selected_entry(&self) -> Option<&ResultEntry> {
        match (&self.view, self.cursor) {
            (PanelView::Results(entries), Some(i)) => entries.get(i),
            _ => None,
        }
    }

    fn is_open(&self) -> bool {
        self.view != PanelView::Hidden
    }

    /// Current panel state.
    pub fn state(&self) -> PanelState {
        match self.view {
            PanelView::Hidden => PanelState::Closed,
            PanelView::Results(_) => PanelState::OpenWithResults,
            PanelView::NoResults(_) => PanelState::OpenNoResults,
        }
    }

    /// Selected result, `None` when nothing is selected.
    pub fn selected_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Raw query text as last seen.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// What the panel currently shows.
    pub fn view(&self) -> &PanelView {
        &self.view
    }

    /// The loaded index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Whether a debounced search is waiting to fire.
    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether [`SearchController::teardown`] ran.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndexedRecipe;

    #[derive(Default)]
    struct NullHost {
        renders: usize,
        scheduled: Vec<Ticket>,
    }

    impl Host for NullHost {
        type Timer = Ticket;

        fn schedule_search(&mut self, _delay_ms: u32, ticket: Ticket) -> Ticket {
            self.scheduled.push(ticket);
            ticket
        }

        fn cancel_timer(&mut self, _timer: Ticket) {}

        fn render(&mut self, _view: &PanelView) {
            self.renders += 1;
        }

        fn show_selection(&mut self, _previous: Option<usize>, _current: Option<usize>) {}

        fn navigate(&mut self, _url: &str) {}

        fn clear_input(&mut self) {}

        fn blur_input(&mut self) {}
    }

    fn controller() -> SearchController<NullHost> {
        let mut controller = SearchController::new(NullHost::default(), &WidgetConfig::default());
        controller.set_index(SearchIndex::new(vec![IndexedRecipe {
            title: "Gimlet".to_string(),
            url: "/recipes/gimlet/".to_string(),
            ..Default::default()
        }]));
        controller
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_key_name("Up"), Key::ArrowUp);
        assert_eq!(Key::from_key_name("Esc"), Key::Escape);
        assert_eq!(Key::from_key_name("a"), Key::Other);
    }

    #[test]
    fn test_starts_closed() {
        let controller = controller();
        assert_eq!(controller.state(), PanelState::Closed);
        assert_eq!(controller.selected_index(), None);
        assert!(!controller.has_pending_search());
    }

    #[test]
    fn test_arrows_ignored_while_closed() {
        let mut controller = controller();
        assert!(!controller.on_key(Key::ArrowDown));
        assert_eq!(controller.selected_index(), None);
    }

    #[test]
    fn test_closing_twice_renders_once() {
        let mut controller = controller();
        controller.perform_search("gim");
        controller.on_click_outside();
        controller.on_click_outside();
        assert_eq!(controller.host().renders, 2);
    }

    #[test]
    fn test_teardown_suppresses_late_timer() {
        let mut controller = controller();
        controller.on_input("gim");
        let ticket = controller.host().scheduled[0];
        controller.teardown();
        controller.on_timer(ticket);
        assert_eq!(controller.state(), PanelState::Closed);
        assert_eq!(controller.host().renders, 0);
        assert!(controller.is_torn_down());
    }

    #[test]
    fn test_teardown_hides_open_panel() {
        let mut controller = controller();
        controller.perform_search("gim");
        assert_eq!(controller.state(), PanelState::OpenWithResults);

        controller.teardown();
        assert_eq!(controller.state(), PanelState::Closed);
        assert_eq!(controller.host().renders, 2);

        controller.teardown();
        assert_eq!(controller.host().renders, 2);
    }

    #[test]
    fn test_zero_max_results_still_shows_matches() {
        let config: WidgetConfig = serde_json::from_str(r#"{"maxResults": 0}"#).unwrap();
        let mut controller = SearchController::new(NullHost::default(), &config);
        controller.set_index(SearchIndex::new(vec![IndexedRecipe {
            title: "Gin Fizz".to_string(),
            url: "/recipes/gin-fizz/".to_string(),
            ..Default::default()
        }]));

        controller.perform_search("gin");
        assert_eq!(controller.state(), PanelState::OpenWithResults);
        assert_eq!(controller.view().entry_count(), 1);
    }
}
