use std::fmt;

use serde::{Deserialize, Serialize};

use super::record_newtype;
use crate::lenient::{f64_lenient, id_lenient};
use crate::payment::PaymentMode;
use crate::resource::Searchable;

/// Which side of the ledger a bill sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Sale,
    Purchase,
}

impl TransactionKind {
    pub fn collection(self) -> &'static str {
        match self {
            TransactionKind::Sale => "sales",
            TransactionKind::Purchase => "purchases",
        }
    }

    /// Label of the counterparty ("Customer" on a sale).
    pub fn party_label(self) -> &'static str {
        match self {
            TransactionKind::Sale => "Customer",
            TransactionKind::Purchase => "Vendor",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Sale => f.write_str("sale"),
            TransactionKind::Purchase => f.write_str("purchase"),
        }
    }
}

/// One product row within a bill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "id_lenient")]
    pub product_id: String,
    #[serde(default, deserialize_with = "id_lenient")]
    pub unit_id: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub quantity: f64,
    /// Per-unit cost in the row's unit.
    #[serde(default, deserialize_with = "f64_lenient", alias = "per_unit_cost", alias = "cost")]
    pub unit_cost: f64,
    /// Discount percentage.
    #[serde(default, deserialize_with = "f64_lenient", alias = "discount_percentage")]
    pub discount: f64,
    /// GST percentage.
    #[serde(default, deserialize_with = "f64_lenient", alias = "gst_percentage")]
    pub gst: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub total: f64,
}

/// Sale or purchase bill as the backend stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "id_lenient", alias = "id", skip_serializing_if = "String::is_empty")]
    pub transaction_id: String,
    #[serde(default)]
    pub bill_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    #[serde(default, deserialize_with = "id_lenient", alias = "customer_id", alias = "vendor_id")]
    pub party_id: String,
    #[serde(default, alias = "customer_name", alias = "vendor_name")]
    pub party_name: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub absolute_discount: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub paid_amount: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub payable_amount: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub due_amount: f64,
    #[serde(default, alias = "products", alias = "line_items")]
    pub items: Vec<LineItem>,
}

impl Transaction {
    pub fn record_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn clear_record_id(&mut self) {
        self.transaction_id.clear();
    }
}

impl Searchable for Transaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.transaction_id, &self.bill_name, &self.party_name, &self.date]
    }
}

record_newtype!(
    /// A sale bill, served from `/sales`.
    Sale(Transaction), "sales", "Sale"
);

record_newtype!(
    /// A purchase bill, served from `/purchases`.
    Purchase(Transaction), "purchases", "Purchase"
);
