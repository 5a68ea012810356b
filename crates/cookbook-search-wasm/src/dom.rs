//! DOM side of the widget: drawing the panel and browser timers.

use cookbook_search::{
    Host, NO_RESULTS_HINT, PanelView, ResultEntry, SearchError, Ticket, no_results_message,
};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

/// Class toggled on the selected result.
const SELECTED_CLASS: &str = "selected";

/// The result panel: a live status line that persists across renders and a
/// body that is redrawn on every render.
pub struct Panel {
    root: HtmlElement,
    status: Element,
    body: Element,
}

impl Panel {
    /// Replace the panel's children with the status line and an empty body.
    pub fn mount(document: &Document, root: HtmlElement) -> Result<Self, SearchError> {
        let status = div(document, "search-status")?;
        status
            .set_attribute("role", "status")
            .and_then(|()| status.set_attribute("aria-live", "polite"))
            .map_err(dom_error)?;
        let body = div(document, "search-body")?;

        root.set_text_content(None);
        root.append_child(&status)
            .and_then(|_| root.append_child(&body))
            .map_err(dom_error)?;

        Ok(Self { root, status, body })
    }
}

fn div(document: &Document, class: &str) -> Result<Element, SearchError> {
    let element = document.create_element("div").map_err(dom_error)?;
    element.set_class_name(class);
    Ok(element)
}

fn dom_error(err: JsValue) -> SearchError {
    SearchError::Dom(format!("{err:?}"))
}

/// [`Host`] implementation backed by the page's input and result panel.
pub struct DomHost {
    window: Window,
    document: Document,
    input: HtmlInputElement,
    panel: Panel,
    results_id: String,
    on_timer: Closure<dyn FnMut(JsValue)>,
}

impl DomHost {
    /// `on_timer` receives the ticket generation as a number.
    pub fn new(
        window: Window,
        document: Document,
        input: HtmlInputElement,
        panel: Panel,
        results_id: String,
        on_timer: Closure<dyn FnMut(JsValue)>,
    ) -> Self {
        let host = Self {
            window,
            document,
            input,
            panel,
            results_id,
            on_timer,
        };
        host.prepare();
        host
    }

    /// Static ARIA wiring and the initial hidden state.
    fn prepare(&self) {
        self.set_attr(&self.input, "role", "combobox");
        self.set_attr(&self.input, "aria-autocomplete", "list");
        self.set_attr(&self.input, "aria-expanded", "false");
        self.set_attr(&self.input, "aria-controls", &self.listbox_id());
        self.panel.root.set_hidden(true);
    }

    fn listbox_id(&self) -> String {
        format!("{}-listbox", self.results_id)
    }

    fn option_id(&self, index: usize) -> String {
        format!("{}-option-{index}", self.results_id)
    }

    fn set_attr(&self, element: &Element, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value) {
            tracing::debug!(attribute = name, error = ?e, "Failed to set attribute");
        }
    }

    /// Create an element holding `text` as a text node.
    fn text_element(&self, tag: &str, class: &str, text: &str) -> Option<Element> {
        let element = self.document.create_element(tag).ok()?;
        element.set_class_name(class);
        element.set_text_content(Some(text));
        Some(element)
    }

    fn append(&self, parent: &Element, child: Option<Element>) {
        let Some(child) = child else {
            return;
        };
        if let Err(e) = parent.append_child(&child) {
            tracing::debug!(error = ?e, "Failed to append element");
        }
    }

    fn result_option(&self, index: usize, entry: &ResultEntry) -> Option<Element> {
        let option = self.document.create_element("a").ok()?;
        option.set_id(&self.option_id(index));
        option.set_class_name("search-result");
        self.set_attr(&option, "href", &entry.url);
        self.set_attr(&option, "role", "option");
        self.set_attr(&option, "aria-selected", "false");

        self.append(
            &option,
            self.text_element("span", "search-result-title", &entry.title),
        );
        if !entry.label.is_empty() {
            self.append(
                &option,
                self.text_element("span", "search-result-label", &entry.label),
            );
        }
        if !entry.tags.is_empty() {
            self.append(
                &option,
                self.text_element("span", "search-result-tags", &entry.tags_display()),
            );
        }
        Some(option)
    }

    fn render_results(&self, entries: &[ResultEntry]) {
        let Ok(listbox) = self.document.create_element("div") else {
            return;
        };
        listbox.set_id(&self.listbox_id());
        listbox.set_class_name("search-result-list");
        self.set_attr(&listbox, "role", "listbox");

        for (index, entry) in entries.iter().enumerate() {
            self.append(&listbox, self.result_option(index, entry));
        }
        self.append(&self.panel.body, Some(listbox));
    }

    fn render_no_results(&self, query: &str) {
        let Ok(container) = self.document.create_element("div") else {
            return;
        };
        container.set_class_name("search-no-results");
        self.append(
            &container,
            self.text_element("p", "search-no-results-message", &no_results_message(query)),
        );
        self.append(
            &container,
            self.text_element("p", "search-no-results-hint", NO_RESULTS_HINT),
        );
        self.append(&self.panel.body, Some(container));
    }

    fn mark(&self, index: usize, selected: bool) -> Option<Element> {
        let option = self.document.get_element_by_id(&self.option_id(index))?;
        let classes = option.class_list();
        let result = if selected {
            classes.add_1(SELECTED_CLASS)
        } else {
            classes.remove_1(SELECTED_CLASS)
        };
        if let Err(e) = result {
            tracing::debug!(error = ?e, "Failed to toggle selection class");
        }
        self.set_attr(&option, "aria-selected", if selected { "true" } else { "false" });
        Some(option)
    }
}

impl Host for DomHost {
    type Timer = Option<i32>;

    fn schedule_search(&mut self, delay_ms: u32, ticket: Ticket) -> Option<i32> {
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let generation = JsValue::from_f64(ticket.generation() as f64);

        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_1(
                self.on_timer.as_ref().unchecked_ref(),
                delay,
                &generation,
            )
            .inspect_err(|e| tracing::warn!(error = ?e, "Failed to schedule search"))
            .ok()
    }

    fn cancel_timer(&mut self, timer: Option<i32>) {
        if let Some(handle) = timer {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn render(&mut self, view: &PanelView) {
        self.panel.body.set_text_content(None);
        let _ = self.input.remove_attribute("aria-activedescendant");

        match view {
            PanelView::Hidden => {
                self.panel.status.set_text_content(None);
                self.panel.root.set_hidden(true);
                self.set_attr(&self.input, "aria-expanded", "false");
                return;
            }
            PanelView::Results(entries) => self.render_results(entries),
            PanelView::NoResults(query) => self.render_no_results(query),
        }

        self.panel.root.set_hidden(false);
        self.set_attr(&self.input, "aria-expanded", "true");
        // The status node stays mounted so screen readers announce the change.
        self.panel.status.set_text_content(Some(&view.announcement()));
    }

    fn show_selection(&mut self, previous: Option<usize>, current: Option<usize>) {
        if let Some(index) = previous {
            self.mark(index, false);
        }

        match current.and_then(|index| self.mark(index, true)) {
            Some(option) => {
                let options = ScrollIntoViewOptions::new();
                options.set_block(ScrollLogicalPosition::Nearest);
                option.scroll_into_view_with_scroll_into_view_options(&options);
                self.set_attr(&self.input, "aria-activedescendant", &option.id());
            }
            None => {
                let _ = self.input.remove_attribute("aria-activedescendant");
            }
        }
    }

    fn navigate(&mut self, url: &str) {
        if let Err(e) = self.window.location().assign(url) {
            tracing::warn!(url, error = ?e, "Navigation failed");
        }
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn blur_input(&mut self) {
        if let Err(e) = self.input.blur() {
            tracing::debug!(error = ?e, "Failed to blur search input");
        }
    }
}
