//! Requests the UI emits, one type per path.

pub mod app;
pub mod auth;
pub mod bill;
pub mod dues;
pub mod profile;
pub mod screen;
pub mod users;

pub use app::InitializeReq;
pub use auth::{LoginReq, LogoutReq};
pub use bill::{
    bill_path, BillAddRowReq, BillEditReq, BillHeaderReq, BillLoadReq, BillNewReq, BillRemoveRowReq,
    BillSubmitReq,
};
pub use dues::PayDueReq;
pub use profile::{PasswordChangeReq, ProfileLoadReq, ProfileSaveReq};
pub use screen::{
    screen_path, CloseReq, DeleteReq, LoadReq, LookupLoadReq, OpenReq, PageReq, ProductInfoReq,
    SaveReq, SearchReq,
};
pub use users::{BlockUserReq, ChangeRoleReq};
