//! Flux: path-addressed state with request routing.
//!
//! The front end's screens live here as state. Renderers read state with
//! `get`, send user actions with `emit`, and watch for changes with
//! `subscribe`.
//!
//! Paths are `/`-separated (`customers/list`, `sales/bill`). Handlers and
//! subscriptions use patterns where `+` matches one segment and `#` the
//! rest of the path.

pub mod app;
pub mod pattern;
pub mod router;
pub mod store;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
