//! Shared records and front-end logic for the stockdesk ERP client.
//!
//! Nothing here talks to the network. The records mirror the backend's
//! JSON, and the billing and listing helpers are the arithmetic the
//! screens run locally.

pub mod billing;
pub mod currency;
pub mod error;
pub mod lenient;
pub mod listing;
pub mod model;
pub mod payment;
pub mod resource;

pub use billing::{line_total, round2, BillDraft, BillRow, BillTotals, Pricing, RowEdit};
pub use error::CoreError;
pub use listing::{paginate, search_page, PageView};
pub use model::*;
pub use payment::PaymentMode;
pub use resource::{Resource, Searchable};
