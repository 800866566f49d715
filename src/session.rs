//! Session context: credentials and the selected store.
//!
//! Components receive a `SessionContext` instead of poking at localStorage
//! directly.  It is loaded once per page and written back through
//! [`SessionContext::save`] whenever it changes.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::constants::{ACCESS_TOKEN_KEY, AUTHORIZATION_CODE_KEY, LOCATION_ID_KEY, LOCATION_NAME_KEY};
use crate::models::Location;

/// Minimal key-value persistence seam.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, JsValue>;
    fn set(&self, key: &str, value: &str) -> Result<(), JsValue>;
    fn remove(&self, key: &str) -> Result<(), JsValue>;
}

/// `window.localStorage`.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, JsValue> {
        self.storage.get_item(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), JsValue> {
        self.storage.set_item(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), JsValue> {
        self.storage.remove_item(key)
    }
}

/// Process-local store, used when localStorage is blocked and in tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, JsValue> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), JsValue> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), JsValue> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The browser store when available, otherwise an in-memory fallback.
pub fn default_store() -> Box<dyn KeyValueStore> {
    match LocalStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            web_sys::console::warn_1(&format!("Falling back to in-memory session: {:?}", e).into());
            Box::new(MemoryStore::default())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub access_token: Option<String>,
    pub authorization_code: Option<String>,
    pub location_id: Option<String>,
    pub location_name: Option<String>,
}

impl SessionContext {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, JsValue> {
        Ok(Self {
            access_token: store.get(ACCESS_TOKEN_KEY)?,
            authorization_code: store.get(AUTHORIZATION_CODE_KEY)?,
            location_id: store.get(LOCATION_ID_KEY)?,
            location_name: store.get(LOCATION_NAME_KEY)?,
        })
    }

    /// Write every field back; `None` removes the key.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), JsValue> {
        let fields = [
            (ACCESS_TOKEN_KEY, &self.access_token),
            (AUTHORIZATION_CODE_KEY, &self.authorization_code),
            (LOCATION_ID_KEY, &self.location_id),
            (LOCATION_NAME_KEY, &self.location_name),
        ];
        for (key, value) in fields {
            match value {
                Some(v) => store.set(key, v)?,
                None => store.remove(key)?,
            }
        }
        Ok(())
    }

    /// Token sent with every backend call.  A missing token is sent as an
    /// empty string; the backend answers 401 and the page redirects.
    pub fn token(&self) -> &str {
        self.access_token.as_deref().unwrap_or_default()
    }

    pub fn sign_in(&mut self, code: String, access_token: String) {
        self.authorization_code = Some(code);
        self.access_token = Some(access_token);
    }

    pub fn has_location(&self) -> bool {
        self.location_id.as_deref().map_or(false, |id| !id.is_empty())
    }

    pub fn set_location(&mut self, location: Location) {
        self.location_id = Some(location.location_id);
        self.location_name = Some(location.name);
    }

    /// The list endpoint only reports the id; the name is kept as is.
    pub fn set_location_id(&mut self, location_id: Option<String>) {
        self.location_id = location_id;
    }
}

/// A page's live session: the context plus the store it is written back to
/// after every change.
pub struct SessionHandle {
    context: RefCell<SessionContext>,
    store: Box<dyn KeyValueStore>,
}

impl SessionHandle {
    pub fn load(store: Box<dyn KeyValueStore>) -> Result<Self, JsValue> {
        let context = SessionContext::load(store.as_ref())?;
        Ok(Self {
            context: RefCell::new(context),
            store,
        })
    }

    pub fn snapshot(&self) -> SessionContext {
        self.context.borrow().clone()
    }

    pub fn token(&self) -> String {
        self.context.borrow().token().to_string()
    }

    pub fn location_id(&self) -> Option<String> {
        self.context.borrow().location_id.clone()
    }

    /// Mutate the context and persist the result.
    pub fn update<F>(&self, mutate: F) -> Result<(), JsValue>
    where
        F: FnOnce(&mut SessionContext),
    {
        let mut context = self.context.borrow_mut();
        mutate(&mut context);
        context.save(self.store.as_ref())
    }
}
