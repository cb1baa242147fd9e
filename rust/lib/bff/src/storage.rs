//! Session storage.
//!
//! The browser build kept the session in `localStorage`; here any
//! [`KeyValueStorage`] will do. The CLI persists it in its config file,
//! tests use [`MemoryStorage`].

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use stockdesk_client::{LoginData, SharedToken};
use stockdesk_core::{Company, User};
use stockdesk_flux::StateStore;
use thiserror::Error;
use tracing::warn;

use crate::state::StorageChanged;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "user";
pub const COMPANY_KEY: &str = "selectedCompany";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("no storage named \"{0}\"")]
    UnknownContext(String),
}

/// String key-value storage that outlives the process (or not).
pub trait KeyValueStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Typed view over the session keys.
///
/// Every write announces itself at `storage/changed` so screens derived
/// from storage (the company banner) refresh. The token also lives in a
/// [`SharedToken`] that the API client reads before each request.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn KeyValueStorage>,
    token: SharedToken,
    store: Arc<StateStore>,
}

impl Session {
    pub fn new(storage: Arc<dyn KeyValueStorage>, store: Arc<StateStore>) -> Self {
        let token = SharedToken::new(storage.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty()));
        Self { storage, token, store }
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    pub fn token_source(&self) -> SharedToken {
        self.token.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_set()
    }

    pub fn user(&self) -> Option<User> {
        read_json(self.storage.as_ref(), USER_KEY)
    }

    pub fn company(&self) -> Option<Company> {
        read_json(self.storage.as_ref(), COMPANY_KEY)
    }

    pub fn save_login(&self, login: &LoginData) {
        self.token.set(login.token.clone());
        self.write(AUTH_TOKEN_KEY, Some(login.token.clone()));
        if let Some(user) = &login.user {
            self.set_user(user);
        }
        if let Some(company) = &login.company {
            self.set_company(company);
        }
    }

    pub fn set_user(&self, user: &User) {
        self.write(USER_KEY, encode(user));
    }

    pub fn set_company(&self, company: &Company) {
        self.write(COMPANY_KEY, encode(company));
    }

    /// Forget the token and user. The selected company stays.
    pub fn clear_auth(&self) {
        self.token.clear();
        self.write(AUTH_TOKEN_KEY, None);
        self.write(USER_KEY, None);
    }

    /// Forget everything, company included.
    pub fn clear(&self) {
        self.clear_auth();
        self.write(COMPANY_KEY, None);
    }

    fn write(&self, key: &str, value: Option<String>) {
        let result = match &value {
            Some(v) => self.storage.set(key, v),
            None => self.storage.remove(key),
        };
        if let Err(e) = result {
            warn!(key, error = %e, "session storage write failed");
        }
        self.store.set(StorageChanged::PATH, StorageChanged { key: key.to_string() });
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "ignoring unreadable session entry");
            None
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(error = %e, "could not encode session entry");
            None
        }
    }
}
