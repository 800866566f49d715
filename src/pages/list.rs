//! List page: store picker, product search, the list itself and its
//! save/clear controls.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event};

use crate::components::location_picker::LocationSource;
use crate::components::product_search::ProductSource;
use crate::components::{GroceryListView, SearchDropdown, VisibilityController};
use crate::constants::{
    ADD_CONTAINER_ID, CHANGE_LOCATION_BUTTON_ID, CLEAR_LIST_BUTTON_ID, LIST_CONTAINER_SELECTOR,
    LOCATION_BUTTON_ID, LOCATION_NAME_CLASS, LOCATION_SELECTOR_ID, SAVE_LIST_BUTTON_ID, TOTAL_PRICE_ID,
};
use crate::debug_log;
use crate::dom_utils;
use crate::models::{Location, SavedList};
use crate::navigation;
use crate::network::{ApiClient, ApiError};
use crate::session::SessionHandle;
use crate::toast;

pub async fn run(document: Document, session: SessionHandle) -> Result<(), JsValue> {
    let session = Rc::new(session);

    // Section 0 is the store picker, section 1 the "current store" button.
    let location_sections = Rc::new(RefCell::new(VisibilityController::new(vec![
        dom_utils::require_by_id(&document, LOCATION_SELECTOR_ID)?,
        dom_utils::require_by_id(&document, LOCATION_BUTTON_ID)?,
    ])));

    if session.snapshot().has_location() {
        update_location_name_display(&document, &session);
        location_sections.borrow_mut().cycle(1);
    }

    let container = document
        .query_selector(LIST_CONTAINER_SELECTOR)?
        .ok_or_else(|| JsValue::from_str("list container not found"))?;
    let total = dom_utils::require_by_id(&document, TOTAL_PRICE_ID)?;
    let list = GroceryListView::mount(container, total)?;
    list.initialize(&session).await;

    bind_click(&document, SAVE_LIST_BUTTON_ID, {
        let list = Rc::clone(&list);
        let session = Rc::clone(&session);
        move |_| {
            let list = Rc::clone(&list);
            let session = Rc::clone(&session);
            spawn_local(async move { save_list(&list, &session).await });
        }
    })?;

    bind_click(&document, CLEAR_LIST_BUTTON_ID, {
        let list = Rc::clone(&list);
        move |_| list.clear()
    })?;

    bind_click(&document, CHANGE_LOCATION_BUTTON_ID, {
        let list = Rc::clone(&list);
        let sections = Rc::clone(&location_sections);
        move |_| {
            list.clear();
            sections.borrow_mut().cycle(1);
        }
    })?;

    let location_picker = dom_utils::require_by_id(&document, LOCATION_SELECTOR_ID)?;
    SearchDropdown::mount(
        &location_picker,
        LocationSource::new(Rc::clone(&session), {
            let session = Rc::clone(&session);
            let sections = Rc::clone(&location_sections);
            let document = document.clone();
            move |location: Location| {
                debug_log!("selected store {}", location.location_id);
                sections.borrow_mut().cycle(1);
                if let Err(e) = session.update(|ctx| ctx.set_location(location)) {
                    web_sys::console::warn_1(&e);
                }
                update_location_name_display(&document, &session);
            }
        }),
    )?;

    let product_search = dom_utils::require_by_id(&document, ADD_CONTAINER_ID)?;
    SearchDropdown::mount(
        &product_search,
        ProductSource::new(Rc::clone(&session), {
            let list = Rc::clone(&list);
            move |product| list.add(product)
        }),
    )?;

    Ok(())
}

/// What the user sees after a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFeedback {
    Success,
    /// 200 without the list echoed back; nothing is shown.
    Silent,
    /// Session expired; go to sign-in without a toast.
    Redirect,
    Error(String),
}

pub fn save_feedback(outcome: Result<bool, ApiError>) -> SaveFeedback {
    match outcome {
        Ok(true) => SaveFeedback::Success,
        Ok(false) => SaveFeedback::Silent,
        Err(ApiError::Unauthorized) => SaveFeedback::Redirect,
        Err(err) => SaveFeedback::Error(err.to_string()),
    }
}

/// POST the list under the current store.
async fn save_list(list: &GroceryListView, session: &SessionHandle) {
    let saved = SavedList {
        location: session.location_id(),
        items: list.items(),
    };

    match save_feedback(ApiClient::save_list(&session.token(), &saved).await) {
        SaveFeedback::Success => toast::success("Your list was saved successfully!"),
        SaveFeedback::Silent => debug_log!("save-list returned 200 without a list"),
        SaveFeedback::Redirect => navigation::redirect_to_sign_in(),
        SaveFeedback::Error(message) => {
            web_sys::console::error_1(&format!("save list: {}", message).into());
            toast::error("There was an error with your list");
        }
    }
}

fn update_location_name_display(document: &Document, session: &SessionHandle) {
    let name = session.snapshot().location_name.unwrap_or_default();
    for element in dom_utils::by_class(document, LOCATION_NAME_CLASS) {
        element.set_text_content(Some(&name));
    }
}

fn bind_click<F>(document: &Document, id: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let button: Element = dom_utils::require_by_id(document, id)?;
    let cb = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoed_list_is_a_success() {
        assert_eq!(save_feedback(Ok(true)), SaveFeedback::Success);
        assert_eq!(save_feedback(Ok(false)), SaveFeedback::Silent);
    }

    #[test]
    fn unauthorized_save_redirects_without_a_toast() {
        let feedback = save_feedback(Err(ApiError::Unauthorized));
        assert_eq!(feedback, SaveFeedback::Redirect);
        assert!(!matches!(feedback, SaveFeedback::Success | SaveFeedback::Error(_)));
    }

    #[test]
    fn other_failures_carry_the_reason() {
        assert_eq!(
            save_feedback(Err(ApiError::Status(500))),
            SaveFeedback::Error("API request failed with status 500".into())
        );
        assert!(matches!(
            save_feedback(Err(ApiError::NotFound)),
            SaveFeedback::Error(_)
        ));
    }
}
