use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

pub mod components;
pub mod constants;
pub mod data_object;
pub mod debounce;
pub mod dom_utils;
mod macros;
pub mod models;
pub mod navigation;
pub mod network;
pub mod pages;
pub mod session;
pub mod state;
pub mod toast;
pub mod utils;

use pages::Page;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    let document = dom_utils::document()?;

    let Some(page) = Page::detect(&document) else {
        debug_log!("no grocery page landmark found; nothing to mount");
        return Ok(());
    };

    let session = session::SessionHandle::load(session::default_store())?;

    spawn_local(async move {
        let result = match page {
            Page::Login => pages::login::run(document, session).await,
            Page::List => pages::list::run(document, session).await,
        };
        if let Err(e) = result {
            web_sys::console::error_1(&format!("Failed to start {:?} page: {:?}", page, e).into());
        }
    });

    Ok(())
}

/// `data-*` attributes of `element` as a nested object, for page scripts.
#[wasm_bindgen(js_name = elementToDataObject)]
pub fn element_to_data_object(element: &Element) -> Result<JsValue, JsValue> {
    data_object::element_to_data_object_js(element)
}
