use stockdesk_core::Payment;

/// Record a payment against a due.
#[derive(Debug, Clone)]
pub struct PayDueReq {
    pub due_id: String,
    pub payment: Payment,
}

impl PayDueReq {
    pub const PATH: &'static str = "dues/pay";
}
