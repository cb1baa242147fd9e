use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::pattern;
use crate::store::StateStore;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased handler. Takes owned arguments so the future is `'static`:
/// the request path, the payload, and the state store.
type ErasedHandler =
    Arc<dyn Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Maps request path patterns to async handlers.
///
/// Every handler whose pattern matches runs, in registration order, one
/// after the other. A path no handler matches is a no-op.
pub struct Router {
    routes: RwLock<Vec<(String, ErasedHandler)>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: RwLock::new(Vec::new()) }
    }

    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Arc<dyn Any + Send + Sync>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String,
                  payload: Arc<dyn Any + Send + Sync>,
                  store: Arc<StateStore>|
                  -> BoxFuture { Box::pin(handler(path, payload, store)) },
        );
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((pattern.to_string(), handler));
    }

    fn matching(&self, path: &str) -> Vec<ErasedHandler> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(p, _)| pattern::matches(p, path))
            .map(|(_, h)| Arc::clone(h))
            .collect()
    }

    pub async fn dispatch(
        &self,
        path: &str,
        payload: Arc<dyn Any + Send + Sync>,
        store: Arc<StateStore>,
    ) {
        let handlers = self.matching(path);
        trace!(path, handlers = handlers.len(), "dispatch");
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        !self.matching(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
