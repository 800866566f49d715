//! Debounced search input with a results dropdown.
//!
//! One component serves every use-site; what differs (lookup, item markup,
//! selection) comes from a [`DropdownSource`].  Expected markup inside the
//! container:
//!
//! ```html
//! <input class="search-dropdown-input">
//! <div class="search-dropdown-container"></div>
//! ```
//!
//! Results carry the `search-dropdown-item` class.  Clicks are handled by a
//! single capture-phase listener on the results container, so re-rendering
//! never re-binds handlers.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{AddEventListenerOptions, Element, Event, HtmlInputElement};

use crate::constants::{DROPDOWN_INPUT_SELECTOR, DROPDOWN_ITEM_CLASS, DROPDOWN_RESULTS_SELECTOR, SEARCH_DEBOUNCE_MS};
use crate::debounce::Debouncer;
use crate::debug_log;
use crate::dom_utils;
use crate::navigation::report_api_error;
use crate::network::ApiError;

/// Behaviour plugged into a [`SearchDropdown`].
#[allow(async_fn_in_trait)]
pub trait DropdownSource: 'static {
    type Item;

    /// Short name used in log lines.
    const NAME: &'static str;

    async fn lookup(&self, query: String) -> Result<Vec<Self::Item>, ApiError>;

    /// HTML for one result.  `None` skips the item.
    fn render(&self, item: &Self::Item) -> Option<String>;

    /// A rendered `.search-dropdown-item` was clicked.
    fn select(&self, event: &Event, item: &Element);

    fn lookup_failed(&self, err: ApiError) {
        report_api_error(Self::NAME, &err);
    }
}

/// Monotonic request ids.  Only the newest request may touch the DOM.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestGenerations {
    latest: u64,
}

impl RequestGenerations {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

pub struct SearchDropdown<S: DropdownSource> {
    source: S,
    input: HtmlInputElement,
    results: Element,
    generations: RefCell<RequestGenerations>,
    debouncer: Debouncer,
}

impl<S: DropdownSource> SearchDropdown<S> {
    /// Bind to the input/results pair inside `container`.
    pub fn mount(container: &Element, source: S) -> Result<Rc<Self>, JsValue> {
        let input: HtmlInputElement = dom_utils::require_selector(container, DROPDOWN_INPUT_SELECTOR)?.dyn_into()?;
        let results = dom_utils::require_selector(container, DROPDOWN_RESULTS_SELECTOR)?;

        let dropdown = Rc::new(Self {
            source,
            input,
            results,
            generations: RefCell::new(RequestGenerations::default()),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE_MS),
        });

        dropdown.bind_input()?;
        dropdown.bind_selection()?;
        Ok(dropdown)
    }

    fn bind_input(self: &Rc<Self>) -> Result<(), JsValue> {
        let this = Rc::clone(self);
        let keyup = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: Event| {
            let pending = Rc::clone(&this);
            this.debouncer.trigger(move || {
                let query = pending.input.value();
                spawn_local(pending.refresh(query));
            });
        }));
        self.input
            .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        keyup.forget();
        Ok(())
    }

    fn bind_selection(self: &Rc<Self>) -> Result<(), JsValue> {
        let this = Rc::clone(self);
        let click = Closure::<dyn FnMut(_)>::wrap(Box::new(move |event: Event| {
            if let Some(item) = dom_utils::closest_with_class(event.target(), DROPDOWN_ITEM_CLASS, &this.results) {
                this.source.select(&event, &item);
            }
        }));
        let options = AddEventListenerOptions::new();
        options.set_capture(true);
        self.results.add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            click.as_ref().unchecked_ref(),
            &options,
        )?;
        click.forget();
        Ok(())
    }

    /// Run the lookup for `query` and render its results, unless a newer
    /// lookup started in the meantime.
    pub async fn refresh(self: Rc<Self>, query: String) {
        let generation = self.generations.borrow_mut().begin();
        let outcome = self.source.lookup(query).await;

        if !self.generations.borrow().is_current(generation) {
            debug_log!("{}: dropping stale results for request {}", S::NAME, generation);
            return;
        }

        match outcome {
            Ok(items) => {
                let html: String = items.iter().filter_map(|item| self.source.render(item)).collect();
                self.results.set_inner_html(&html);
            }
            Err(err) => self.source.lookup_failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_generation_is_current() {
        let mut generations = RequestGenerations::default();
        let a = generations.begin();
        let b = generations.begin();
        assert!(!generations.is_current(a));
        assert!(generations.is_current(b));
    }

    #[test]
    fn out_of_order_completion_keeps_newest() {
        // A starts, B starts, A resolves after B: only B may render.
        let mut generations = RequestGenerations::default();
        let a = generations.begin();
        let b = generations.begin();
        let applied: Vec<u64> = [b, a].into_iter().filter(|g| generations.is_current(*g)).collect();
        assert_eq!(applied, vec![b]);
    }
}
