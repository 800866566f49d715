//! dom_utils.rs – thin helper layer for repetitive DOM operations.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, Node};

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
}

/// Hide the element by adding the `hidden` class.
pub fn hide(el: &Element) {
    let _ = el.class_list().add_1("hidden");
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document on window"))
}

/// Fetch a fixed page element by id, failing loudly when the markup is off.
pub fn require_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))
}

pub fn require_selector(parent: &Element, selector: &str) -> Result<Element, JsValue> {
    parent
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("'{}' not found", selector)))
}

/// All elements carrying `class_name`, in document order.
pub fn by_class(document: &Document, class_name: &str) -> Vec<Element> {
    let collection = document.get_elements_by_class_name(class_name);
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

/// Nearest ancestor-or-self of the event target that has `class_name`,
/// stopping at `boundary`.
pub fn closest_with_class(target: Option<EventTarget>, class_name: &str, boundary: &Element) -> Option<Element> {
    let boundary: &Node = boundary;
    let mut current = target?.dyn_into::<Element>().ok();
    while let Some(el) = current {
        if el.class_list().contains(class_name) {
            return Some(el);
        }
        if el.is_same_node(Some(boundary)) {
            return None;
        }
        current = el.parent_element();
    }
    None
}
