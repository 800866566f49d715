//! Sign-in page: OAuth code exchange or login link.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::LOGIN_BUTTON_ID;
use crate::debug_log;
use crate::dom_utils;
use crate::navigation::{self, authorization_code_from_url};
use crate::network::ApiClient;
use crate::session::SessionHandle;

const LOADER_HTML: &str = r#"<div class="loader"></div>"#;
const NO_POINTER_EVENTS_CLASS: &str = "no-pointer-events";

pub async fn run(document: Document, session: SessionHandle) -> Result<(), JsValue> {
    let button = dom_utils::require_by_id(&document, LOGIN_BUTTON_ID)?;

    match authorization_code_from_url()? {
        Some(code) => complete_sign_in(&button, &session, code).await,
        None => show_login_link(&button).await,
    }
}

/// Back from the retailer with `?code=`: trade it for a token, persist both
/// and move on to the list.  A failed exchange leaves the button usable.
pub async fn complete_sign_in(button: &Element, session: &SessionHandle, code: String) -> Result<(), JsValue> {
    let access_token = ApiClient::exchange_code(&code).await?;
    debug_log!("authorization code exchanged");
    session.update(|ctx| ctx.sign_in(code, access_token))?;
    show_loader(button)?;
    navigation::go_to_list_page()
}

async fn show_login_link(button: &Element) -> Result<(), JsValue> {
    let url = ApiClient::authorization_url().await?;
    button.set_attribute("href", &url)
}

pub fn show_loader(button: &Element) -> Result<(), JsValue> {
    button.set_inner_html(LOADER_HTML);
    button.class_list().add_1(NO_POINTER_EVENTS_CLASS)
}
