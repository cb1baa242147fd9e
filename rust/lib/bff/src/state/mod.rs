//! State stored in Flux, one type per path.

pub mod app;
pub mod auth;
pub mod bill;
pub mod lookup;
pub mod profile;
pub mod screen;

pub use app::{AppRoute, CompanyBanner, StorageChanged, Toast, ToastKind};
pub use auth::{AuthPhase, AuthState};
pub use bill::BillState;
pub use lookup::{product_info_path, Categories, Units};
pub use profile::ProfilePage;
pub use screen::{EditorState, ListPage};
