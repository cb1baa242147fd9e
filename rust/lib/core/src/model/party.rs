use serde::{Deserialize, Serialize};

use super::record_newtype;
use crate::lenient::id_lenient;
use crate::resource::Searchable;

/// Contact record shared by customers and vendors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default, deserialize_with = "id_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gst_no: String,
    #[serde(default)]
    pub pan: String,
}

impl Party {
    pub fn record_id(&self) -> &str {
        &self.id
    }

    pub fn clear_record_id(&mut self) {
        self.id.clear();
    }
}

impl Searchable for Party {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.phone, &self.gst_no, &self.pan]
    }
}

record_newtype!(
    /// A customer, served from `/customers`.
    Customer(Party), "customers", "Customer"
);

record_newtype!(
    /// A vendor, served from `/vendors`.
    Vendor(Party), "vendors", "Vendor"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;

    #[test]
    fn customer_is_transparent_on_the_wire() {
        let c: Customer = serde_json::from_str(
            r#"{"id":12,"name":"Ravi Traders","email":"ravi@example.com","phone":"98450","gst_no":"29ABCDE1234F1Z5"}"#,
        )
        .unwrap();
        assert_eq!(c.id(), "12");
        assert_eq!(c.name, "Ravi Traders");
        assert_eq!(c.address, "");

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["name"], "Ravi Traders");
        assert!(json.get("0").is_none());
    }

    #[test]
    fn new_records_omit_id() {
        let v = Vendor(Party { name: "Acme".into(), ..Default::default() });
        assert!(v.is_new());
        let json = serde_json::to_value(&v).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn collections_differ() {
        assert_eq!(Customer::COLLECTION, "customers");
        assert_eq!(Vendor::COLLECTION, "vendors");
        assert_eq!(Vendor::LABEL, "Vendor");
    }
}
