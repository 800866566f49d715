//! Page entry points.  Each page is detected by a landmark element.

pub mod list;
pub mod login;

use web_sys::Document;

use crate::constants::{LIST_CONTAINER_SELECTOR, LOGIN_BUTTON_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    List,
}

impl Page {
    pub fn detect(document: &Document) -> Option<Page> {
        if document.get_element_by_id(LOGIN_BUTTON_ID).is_some() {
            return Some(Page::Login);
        }
        match document.query_selector(LIST_CONTAINER_SELECTOR) {
            Ok(Some(_)) => Some(Page::List),
            _ => None,
        }
    }
}
