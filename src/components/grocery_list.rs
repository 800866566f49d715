//! Grocery list view.
//!
//! Owns the [`GroceryList`] and its DOM subtree.  Mutations patch the subtree
//! according to the returned [`ListChange`]; only clear/replace rebuild it.
//! Remove buttons share one delegated listener that reads `data-index` at
//! click time, so an index is never stale.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event};

use crate::constants::{PRICE_UNAVAILABLE, REMOVE_BUTTON_CLASS};
use crate::debug_log;
use crate::dom_utils;
use crate::models::{Product, SavedList};
use crate::navigation::report_api_error;
use crate::network::{ApiClient, ApiError};
use crate::session::SessionHandle;
use crate::state::{GroceryList, ListChange};
use crate::utils::html_escape;

/// Markup for one list row.
pub fn render_row(product: &Product, index: usize) -> String {
    let price = product
        .display_price()
        .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());
    format!(
        r#"<div class="search-dropdown-item grocery-item">
    <div class="row">
        <div class="col">
            <div class="row align-center"><p class="m-0">{description}</p></div>
            <div class="row align-center"><b class="m-0">{size}</b></div>
        </div>
        <div class="col justify-center align-center ml-auto"><b>{price}</b></div>
        <div class="col justify-center align-center"><img src="{thumbnail}"/></div>
        <div class="col justify-center align-center">
            <button class="{remove_class} btn btn-close" data-index="{index}">&#10006;</button>
        </div>
    </div>
</div>"#,
        description = html_escape(&product.description),
        size = html_escape(&product.size),
        price = price,
        thumbnail = html_escape(&product.thumbnail),
        remove_class = REMOVE_BUTTON_CLASS,
        index = index,
    )
}

pub struct GroceryListView {
    list: RefCell<GroceryList>,
    container: Element,
    total: Element,
}

impl GroceryListView {
    pub fn mount(container: Element, total: Element) -> Result<Rc<Self>, JsValue> {
        let view = Rc::new(Self {
            list: RefCell::new(GroceryList::new()),
            container,
            total,
        });
        view.bind_remove_buttons()?;
        view.render();
        Ok(view)
    }

    fn bind_remove_buttons(self: &Rc<Self>) -> Result<(), JsValue> {
        let this = Rc::clone(self);
        let click = Closure::<dyn FnMut(_)>::wrap(Box::new(move |event: Event| {
            let Some(button) = dom_utils::closest_with_class(event.target(), REMOVE_BUTTON_CLASS, &this.container)
            else {
                return;
            };
            match button.get_attribute("data-index").and_then(|i| i.parse::<usize>().ok()) {
                Some(index) => this.remove_at(index),
                None => web_sys::console::warn_1(&"remove button without a usable data-index".into()),
            }
        }));
        self.container
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
        Ok(())
    }

    /// Entries in display order.
    pub fn items(&self) -> Vec<Product> {
        self.list.borrow().items().to_vec()
    }

    pub fn len(&self) -> usize {
        self.list.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.borrow().is_empty()
    }

    pub fn add(&self, item: Product) {
        let change = self.list.borrow_mut().add(item);
        self.apply(change);
    }

    /// Remove the first entry equal to `item`.  Returns `false` (and leaves
    /// the list alone) when there is none.
    pub fn remove(&self, item: &Product) -> bool {
        let change = self.list.borrow_mut().remove(item);
        match change {
            Some(change) => {
                self.apply(change);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&self, index: usize) {
        let change = self.list.borrow_mut().remove_at(index);
        if let Some(change) = change {
            self.apply(change);
        }
    }

    pub fn clear(&self) {
        let change = self.list.borrow_mut().clear();
        self.apply(change);
    }

    pub fn replace(&self, items: Vec<Product>) {
        let change = self.list.borrow_mut().replace(items);
        self.apply(change);
    }

    /// Rebuild the whole subtree and the total.
    pub fn render(&self) {
        let list = self.list.borrow();
        let html: String = list
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| render_row(item, index))
            .collect();
        self.container.set_inner_html(&html);
        self.total.set_text_content(Some(&list.formatted_total()));
    }

    fn apply(&self, change: ListChange) {
        let patched = match change {
            ListChange::Appended(index) => self.append_row(index),
            ListChange::Removed(index) => self.remove_row(index),
            ListChange::Cleared | ListChange::Replaced => Ok(false),
        };

        match patched {
            Ok(true) if self.container.child_element_count() as usize == self.len() => {
                self.total
                    .set_text_content(Some(&self.list.borrow().formatted_total()));
            }
            Ok(_) => self.render(),
            Err(e) => {
                web_sys::console::warn_1(&e);
                self.render();
            }
        }
    }

    fn append_row(&self, index: usize) -> Result<bool, JsValue> {
        let list = self.list.borrow();
        let Some(item) = list.items().get(index) else {
            return Ok(false);
        };
        self.container
            .insert_adjacent_html("beforeend", &render_row(item, index))?;
        Ok(true)
    }

    /// Drop the row at `index` and renumber the rows after it.
    fn remove_row(&self, index: usize) -> Result<bool, JsValue> {
        let rows = self.container.children();
        let Some(row) = rows.item(index as u32) else {
            return Ok(false);
        };
        row.remove();

        let rows = self.container.children();
        for i in index..rows.length() as usize {
            if let Some(row) = rows.item(i as u32) {
                if let Some(button) = row.query_selector(&format!(".{}", REMOVE_BUTTON_CLASS))? {
                    button.set_attribute("data-index", &i.to_string())?;
                }
            }
        }
        Ok(true)
    }

    /// Load the persisted list.
    pub async fn initialize(&self, session: &SessionHandle) {
        let outcome = ApiClient::get_list(&session.token()).await;
        self.apply_saved(session, outcome);
    }

    /// Show the outcome of a get-list call.  `Ok(None)` means nothing saved
    /// yet; 401 sends the user to sign in.  The list renders either way.
    pub fn apply_saved(&self, session: &SessionHandle, outcome: Result<Option<SavedList>, ApiError>) {
        match outcome {
            Ok(Some(saved)) => {
                debug_log!("loaded {} saved items", saved.items.len());
                if let Some(location_id) = saved.location {
                    if let Err(e) = session.update(|ctx| ctx.set_location_id(Some(location_id))) {
                        web_sys::console::warn_1(&e);
                    }
                }
                self.replace(saved.items);
            }
            Ok(None) => self.render(),
            Err(err) => {
                report_api_error("get list", &err);
                self.render();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64) -> Product {
        Product {
            description: "Cheddar <Sharp>".into(),
            size: "8 oz".into(),
            price,
            thumbnail: "https://img/c.jpg".into(),
            product_id: "5".into(),
        }
    }

    #[test]
    fn row_shows_price_and_index() {
        let html = render_row(&product(4.5), 3);
        assert!(html.contains("$4.50"));
        assert!(html.contains(r#"data-index="3""#));
        assert!(html.contains("Cheddar &lt;Sharp&gt;"));
    }

    #[test]
    fn row_without_price() {
        let html = render_row(&product(0.0), 0);
        assert!(html.contains(PRICE_UNAVAILABLE));
    }
}
