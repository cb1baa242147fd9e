//! Bill entry requests, routed under `sales/bill/...` and
//! `purchases/bill/...`.

use stockdesk_core::{PaymentMode, RowEdit, TransactionKind};

pub const NEW: &str = "new";
pub const LOAD: &str = "load";
pub const EDIT: &str = "edit";
pub const ADD_ROW: &str = "add-row";
pub const REMOVE_ROW: &str = "remove-row";
pub const HEADER: &str = "header";
pub const SUBMIT: &str = "submit";

/// `{collection}/bill/{action}`.
pub fn bill_path(kind: TransactionKind, action: &str) -> String {
    format!("{}/bill/{}", kind.collection(), action)
}

/// Start a blank bill.
#[derive(Debug, Clone, Default)]
pub struct BillNewReq;

/// Open an existing bill for editing.
#[derive(Debug, Clone)]
pub struct BillLoadReq {
    pub transaction_id: String,
}

/// Change one field of one row.
#[derive(Debug, Clone)]
pub struct BillEditReq {
    pub index: usize,
    pub edit: RowEdit,
}

#[derive(Debug, Clone, Default)]
pub struct BillAddRowReq;

#[derive(Debug, Clone)]
pub struct BillRemoveRowReq {
    pub index: usize,
}

/// Header fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct BillHeaderReq {
    pub party_id: Option<String>,
    pub party_name: Option<String>,
    pub bill_name: Option<String>,
    pub date: Option<String>,
    pub payment_mode: Option<PaymentMode>,
    pub absolute_discount: Option<f64>,
    pub paid_amount: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct BillSubmitReq;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_paths() {
        assert_eq!(bill_path(TransactionKind::Sale, ADD_ROW), "sales/bill/add-row");
        assert_eq!(bill_path(TransactionKind::Purchase, SUBMIT), "purchases/bill/submit");
    }
}
