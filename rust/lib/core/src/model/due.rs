use serde::{Deserialize, Serialize};

use crate::billing::round2;
use crate::lenient::{f64_lenient, id_lenient};
use crate::model::TransactionKind;
use crate::payment::PaymentMode;
use crate::resource::{Resource, Searchable};

/// Outstanding balance on one bill (`/dues`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DueRecord {
    #[serde(default, deserialize_with = "id_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "id_lenient")]
    pub transaction_id: String,
    #[serde(default)]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "id_lenient", alias = "customer_id", alias = "vendor_id")]
    pub party_id: String,
    #[serde(default, alias = "customer_name", alias = "vendor_name")]
    pub party_name: String,
    #[serde(default)]
    pub bill_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub payable_amount: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub paid_amount: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub due_amount: f64,
}

impl DueRecord {
    /// Balance recomputed from payable and paid, never negative.
    pub fn outstanding(&self) -> f64 {
        round2((self.payable_amount - self.paid_amount).max(0.0))
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding() == 0.0
    }
}

impl Resource for DueRecord {
    const COLLECTION: &'static str = "dues";
    const LABEL: &'static str = "Due";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_id(&mut self) {
        self.id.clear();
    }
}

impl Searchable for DueRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.party_name, &self.bill_name, &self.transaction_id, &self.date]
    }
}

/// A payment recorded against a due (`POST /dues/{id}/payments`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(deserialize_with = "f64_lenient")]
    pub amount: f64,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}
