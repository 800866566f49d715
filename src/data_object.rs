//! Rebuild nested objects from `data-*` attributes.
//!
//! `data-product-price="1.50"` becomes `{ "product": { "price": "1.50" } }`.
//! Values stay strings.  Attribute order is whatever the DOM reports, so
//! callers must not rely on key order.

use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;
use web_sys::Element;

const DATA_PREFIX: &str = "data";

/// Fold `(name, value)` attribute pairs into a nested object.  Names that do
/// not start with the `data` segment are skipped.
///
/// When one attribute names a leaf and another names a path below it
/// (`data-a="x"` then `data-a-b="y"`), the deeper key is dropped, unless the
/// leaf is empty: an empty string gives way to an object.  A leaf written
/// over an existing object replaces the object.
pub fn attributes_to_data_object<I, K, V>(attributes: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut root = Map::new();

    for (name, value) in attributes {
        let mut segments = name.as_ref().split('-');
        if segments.next() != Some(DATA_PREFIX) {
            continue;
        }
        let path: Vec<&str> = segments.collect();
        let Some((leaf, parents)) = path.split_last() else {
            continue;
        };

        if let Some(target) = descend(&mut root, parents) {
            target.insert((*leaf).to_string(), Value::String(value.into()));
        }
    }

    Value::Object(root)
}

/// Walk (creating as needed) to the object at `path`.  `None` when a
/// non-empty string leaf is in the way.
fn descend<'a>(root: &'a mut Map<String, Value>, path: &[&str]) -> Option<&'a mut Map<String, Value>> {
    let mut current = root;
    for key in path {
        let slot = current
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if slot.as_str() == Some("") {
            *slot = Value::Object(Map::new());
        }
        current = slot.as_object_mut()?;
    }
    Some(current)
}

pub fn element_to_data_object(element: &Element) -> Value {
    let attributes = element.attributes();
    let pairs = (0..attributes.length())
        .filter_map(|i| attributes.item(i))
        .map(|attr| (attr.name(), attr.value()));
    attributes_to_data_object(pairs)
}

/// JS-facing variant for page scripts and debugging from the console.
pub fn element_to_data_object_js(element: &Element) -> Result<JsValue, JsValue> {
    // Plain objects rather than `Map`s, so `obj.product.price` works in JS.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    element_to_data_object(element)
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
