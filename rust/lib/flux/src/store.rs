use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::pattern;
use crate::value::{StateValue, SubscriptionId};

/// Callback for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

/// Path-keyed state with pattern subscriptions.
///
/// Subscribers run synchronously on the thread calling `set`, after the
/// value is stored and the lock released, so a subscriber may read or
/// write the store.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subscriptions: RwLock<Vec<Subscription>>,
    next_id: AtomicU64,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subscriptions: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store a value and notify matching subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), value.clone());

        let handlers: Vec<ChangeHandler> = self
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|s| pattern::matches(&s.pattern, path))
            .map(|s| Arc::clone(&s.handler))
            .collect();
        for handler in handlers {
            handler(path, &value);
        }
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Typed read. `None` when missing or of another type.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.downcast_ref::<T>().cloned())
    }

    /// Remove a value. Subscribers are not notified.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    /// Children of `prefix` (entries under `{prefix}/`), ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let scan_prefix = format!("{}/", prefix);
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .range(scan_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&scan_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscription {
                id,
                pattern: pattern.to_string(),
                handler: Arc::new(handler),
            });
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscriptions.write().unwrap_or_else(PoisonError::into_inner);
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() < before
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
