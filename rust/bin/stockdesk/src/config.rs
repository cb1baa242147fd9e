//! Client-side context management.
//!
//! Reads/writes `~/.stockdesk/config.toml`. A context is one backend plus
//! the session kept for it, so the saved login survives between runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use stockdesk_bff::storage::{AUTH_TOKEN_KEY, COMPANY_KEY, USER_KEY};
use stockdesk_bff::{KeyValueStorage, StorageError};
use tracing::warn;

/// A single context: connection to one StockDesk backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Context {
    /// Context name (e.g. "shop-main").
    pub name: String,

    /// API base URL (e.g. "http://localhost:8080/api").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Bearer token (set by `stockdesk login`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,

    /// Signed-in user, as JSON.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,

    /// Selected company, as JSON.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub selected_company: String,

    /// Rows per page for list commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    /// Any other session keys.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Context {
    pub fn new(name: impl Into<String>, server: impl Into<String>) -> Self {
        Self { name: name.into(), server: server.into(), ..Self::default() }
    }

    fn slot(&mut self, key: &str) -> Option<&mut String> {
        match key {
            AUTH_TOKEN_KEY => Some(&mut self.token),
            USER_KEY => Some(&mut self.user),
            COMPANY_KEY => Some(&mut self.selected_company),
            _ => None,
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        let value = match key {
            AUTH_TOKEN_KEY => &self.token,
            USER_KEY => &self.user,
            COMPANY_KEY => &self.selected_company,
            other => return self.extra.get(other).cloned(),
        };
        (!value.is_empty()).then(|| value.clone())
    }

    fn write(&mut self, key: &str, value: Option<&str>) {
        match (self.slot(key), value) {
            (Some(slot), Some(value)) => *slot = value.to_string(),
            (Some(slot), None) => slot.clear(),
            (None, Some(value)) => {
                self.extra.insert(key.to_string(), value.to_string());
            }
            (None, None) => {
                self.extra.remove(key);
            }
        }
    }

    /// Whether a login token is stored.
    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the currently active context.
    #[serde(rename = "current-context", default)]
    pub current_context: String,

    /// List of configured contexts.
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl ClientConfig {
    /// Default config file path: ~/.stockdesk/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the currently active context, if any.
    pub fn current(&self) -> Option<&Context> {
        self.get(&self.current_context)
    }

    pub fn get(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn upsert_context(&mut self, ctx: Context) {
        if let Some(existing) = self.get_mut(&ctx.name) {
            *existing = ctx;
        } else {
            self.contexts.push(ctx);
        }
    }

    /// Remove a context by name. Returns true if it was found.
    pub fn remove_context(&mut self, name: &str) -> bool {
        let len = self.contexts.len();
        self.contexts.retain(|c| c.name != name);
        if self.current_context == name {
            self.current_context = String::new();
        }
        self.contexts.len() < len
    }
}

/// Return the StockDesk config directory (~/.stockdesk).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".stockdesk")
}

/// Session storage backed by one context of the config file.
///
/// Every write reloads the file first, so edits made by another command
/// in between are kept.
pub struct ContextStorage {
    path: PathBuf,
    context: String,
    lock: Mutex<()>,
}

impl ContextStorage {
    pub fn new(path: impl Into<PathBuf>, context: impl Into<String>) -> Self {
        Self { path: path.into(), context: context.into(), lock: Mutex::new(()) }
    }

    fn update(&self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut config = ClientConfig::load(&self.path).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let ctx = config
            .get_mut(&self.context)
            .ok_or_else(|| StorageError::UnknownContext(self.context.clone()))?;
        ctx.write(key, value);
        config.save(&self.path).map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

impl KeyValueStorage for ContextStorage {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match ClientConfig::load(&self.path) {
            Ok(config) => config.get(&self.context).and_then(|ctx| ctx.read(key)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cannot read config");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(key, Some(value))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(key, None)
    }
}
