use serde::{Deserialize, Serialize};

use crate::lenient::id_lenient;
use crate::resource::{Resource, Searchable};

/// Unit of measure (pcs, box, kg).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default, deserialize_with = "id_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

impl Resource for Unit {
    const COLLECTION: &'static str = "units";
    const LABEL: &'static str = "Unit";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_id(&mut self) {
        self.id.clear();
    }
}

impl Searchable for Unit {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.short_name]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "id_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Resource for Category {
    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "Category";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_id(&mut self) {
        self.id.clear();
    }
}

impl Searchable for Category {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

/// The company the signed-in user works under. Kept in session storage as
/// `selectedCompany`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "id_lenient")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// ISO currency code.
    #[serde(default)]
    pub currency: String,
}
