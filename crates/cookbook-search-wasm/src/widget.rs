//! The search widget: event wiring around a [`SearchController`].
//!
//! Focus handling uses containment instead of a blur delay. A `mousedown` on
//! the panel is cancelled so the input keeps focus while a result is clicked,
//! and `focusout` only closes the panel when focus lands outside both the
//! input and the panel.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use cookbook_search::{Key, SearchController, SearchError, Ticket, WidgetConfig, load_index};
use wasm_bindgen::{JsCast, prelude::*};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventTarget, FocusEvent, HtmlElement, HtmlInputElement, KeyboardEvent, Node};

use crate::{
    dom::{DomHost, Panel},
    fetch::HttpIndexSource,
};

type Controller = SearchController<DomHost>;

/// Run `f` on the controller if it is still alive and not already borrowed.
///
/// A handler can fire re-entrantly, e.g. `focusout` raised by the `blur()`
/// that Escape performs; such nested events are dropped.
fn with_controller<R>(
    weak: &Weak<RefCell<Controller>>,
    f: impl FnOnce(&mut Controller) -> R,
) -> Option<R> {
    let controller = weak.upgrade()?;
    let Ok(mut controller) = controller.try_borrow_mut() else {
        tracing::trace!("Search controller busy, event dropped");
        return None;
    };
    Some(f(&mut controller))
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(e) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event, error = ?e, "Failed to add event listener");
        }
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }

    fn remove(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

struct Attached {
    controller: Rc<RefCell<Controller>>,
    listeners: Vec<Listener>,
}

impl Attached {
    fn new(config: &WidgetConfig) -> Result<Self, SearchError> {
        let window =
            web_sys::window().ok_or_else(|| SearchError::MissingElement("window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| SearchError::MissingElement("document".to_string()))?;

        let input = document
            .get_element_by_id(&config.input_id)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .ok_or_else(|| SearchError::MissingElement(config.input_id.clone()))?;
        let panel = document
            .get_element_by_id(&config.results_id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| SearchError::MissingElement(config.results_id.clone()))?;
        let mounted = Panel::mount(&document, panel.clone())?;

        let controller = Rc::new_cyclic(|weak: &Weak<RefCell<Controller>>| {
            let weak = weak.clone();
            let on_timer = Closure::<dyn FnMut(JsValue)>::new(move |generation: JsValue| {
                if let Some(generation) = generation.as_f64() {
                    with_controller(&weak, |c| {
                        c.on_timer(Ticket::from_generation(generation as u64))
                    });
                }
            });

            let host = DomHost::new(
                window,
                document.clone(),
                input.clone(),
                mounted,
                config.results_id.clone(),
                on_timer,
            );
            RefCell::new(SearchController::new(host, config))
        });

        let listeners = wire_events(&controller, &document, &input, &panel);
        Ok(Self {
            controller,
            listeners,
        })
    }

    fn spawn_index_load(&self, url: String) {
        let weak = Rc::downgrade(&self.controller);
        spawn_local(async move {
            let index = load_index(&HttpIndexSource::new(url)).await;
            if with_controller(&weak, |c| c.set_index(index)).is_none() {
                tracing::debug!("Search widget detached before the index arrived");
            }
        });
    }

    fn detach(self) {
        for listener in &self.listeners {
            listener.remove();
        }
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.teardown(),
            Err(_) => {
                // Detached from inside one of our own handlers. Finish once it
                // returns; the task keeps the timer closure alive until then.
                let controller = Rc::clone(&self.controller);
                spawn_local(async move {
                    if let Ok(mut controller) = controller.try_borrow_mut() {
                        controller.teardown();
                    }
                });
            }
        }
    }
}

fn wire_events(
    controller: &Rc<RefCell<Controller>>,
    document: &web_sys::Document,
    input: &HtmlInputElement,
    panel: &HtmlElement,
) -> Vec<Listener> {
    let weak = Rc::downgrade(controller);
    let mut listeners = Vec::new();

    listeners.push(Listener::new(input, "input", {
        let (weak, input) = (weak.clone(), input.clone());
        move |_event| {
            with_controller(&weak, |c| c.on_input(&input.value()));
        }
    }));

    listeners.push(Listener::new(input, "keydown", {
        let weak = weak.clone();
        move |event| {
            let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = Key::from_key_name(&keyboard.key());
            if with_controller(&weak, |c| c.on_key(key)).unwrap_or(false) {
                event.prevent_default();
            }
        }
    }));

    listeners.push(Listener::new(input, "focus", {
        let (weak, input) = (weak.clone(), input.clone());
        move |_event| {
            with_controller(&weak, |c| c.on_focus(&input.value()));
        }
    }));

    for target in [input.unchecked_ref::<HtmlElement>(), panel] {
        listeners.push(Listener::new(target, "focusout", {
            let (weak, input, panel) = (weak.clone(), input.clone(), panel.clone());
            move |event| {
                let next = event
                    .dyn_ref::<FocusEvent>()
                    .and_then(FocusEvent::related_target)
                    .and_then(|target| target.dyn_into::<Node>().ok());
                let stays_inside = next.is_some_and(|node| {
                    input.contains(Some(&node)) || panel.contains(Some(&node))
                });
                if !stays_inside {
                    with_controller(&weak, |c| c.on_focus_leave());
                }
            }
        }));
    }

    // Keep focus on the input while a result is being clicked.
    listeners.push(Listener::new(panel, "mousedown", |event| {
        event.prevent_default();
    }));

    listeners.push(Listener::new(document, "click", {
        let (weak, input, panel) = (weak, input.clone(), panel.clone());
        move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            if !input.contains(Some(&target)) && !panel.contains(Some(&target)) {
                with_controller(&weak, |c| c.on_click_outside());
            }
        }
    }));

    listeners
}

fn parse_options(options: JsValue) -> WidgetConfig {
    if options.is_undefined() || options.is_null() {
        return WidgetConfig::default();
    }
    serde_wasm_bindgen::from_value(options).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Invalid search widget options, using defaults");
        WidgetConfig::default()
    })
}

/// Recipe search box bound to page elements.
///
/// A widget whose elements are missing is inert: it logs once and never
/// touches the page.
#[wasm_bindgen]
pub struct SearchWidget {
    attached: Option<Attached>,
}

#[wasm_bindgen]
impl SearchWidget {
    /// Attach to the page and start loading the recipe index.
    ///
    /// `options` may be omitted; see `WidgetConfig` for the accepted fields.
    #[wasm_bindgen(js_name = attach)]
    pub fn attach(options: JsValue) -> SearchWidget {
        let config = parse_options(options);

        match Attached::new(&config) {
            Ok(attached) => {
                attached.spawn_index_load(config.index_url());
                tracing::info!(input = %config.input_id, "Search widget attached");
                Self {
                    attached: Some(attached),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Search widget disabled");
                Self { attached: None }
            }
        }
    }

    /// Whether the widget is bound to the page.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.attached.is_some()
    }

    /// Index of the selected result, or -1.
    #[wasm_bindgen(js_name = selectedIndex)]
    pub fn selected_index(&self) -> i32 {
        self.attached
            .as_ref()
            .and_then(|attached| attached.controller.try_borrow().ok()?.selected_index())
            .and_then(|index| i32::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// Number of recipes loaded so far.
    #[wasm_bindgen(js_name = recipeCount)]
    pub fn recipe_count(&self) -> usize {
        self.attached
            .as_ref()
            .and_then(|attached| Some(attached.controller.try_borrow().ok()?.index().len()))
            .unwrap_or(0)
    }

    /// Remove all listeners, hide the panel and cancel pending work.
    pub fn detach(&mut self) {
        if let Some(attached) = self.attached.take() {
            attached.detach();
            tracing::debug!("Search widget detached");
        }
    }
}

impl Drop for SearchWidget {
    fn drop(&mut self) {
        self.detach();
    }
}
