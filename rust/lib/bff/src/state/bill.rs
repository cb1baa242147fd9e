//! Bill entry state, stored at `sales/bill` and `purchases/bill`.

use serde::Serialize;
use stockdesk_core::{BillDraft, TransactionKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillState {
    pub draft: BillDraft,
    pub busy: bool,
    pub error: Option<String>,
}

impl BillState {
    pub fn path(kind: TransactionKind) -> String {
        format!("{}/bill", kind.collection())
    }

    pub fn new(kind: TransactionKind) -> Self {
        Self::from_draft(BillDraft::new(kind))
    }

    pub fn from_draft(draft: BillDraft) -> Self {
        Self { draft, busy: false, error: None }
    }
}
