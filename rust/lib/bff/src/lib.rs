//! StockDesk screens as Flux state.
//!
//! Each screen of the inventory front end (customers, vendors, products,
//! sales, purchases, dues, users, profile) is a set of state paths plus
//! the requests that change them. A renderer (the CLI, or any other
//! shell) reads state, emits requests, and never talks HTTP itself.
//!
//! ```ignore
//! let storage = Arc::new(MemoryStorage::new());
//! let (flux, _ctx) = stockdesk_bff::bootstrap("http://localhost:8080/api", storage, Settings::default());
//! flux.emit(InitializeReq::PATH, InitializeReq).await;
//! flux.emit(LoginReq::PATH, LoginReq { email, password }).await;
//! let route: AppRoute = flux.get_as(AppRoute::PATH).unwrap();
//! ```

pub mod handlers;
pub mod request;
pub mod state;
pub mod storage;

pub use handlers::{bootstrap, register_handlers, BffContext, Settings};
pub use storage::{KeyValueStorage, MemoryStorage, Session, StorageError};
