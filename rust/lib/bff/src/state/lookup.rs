//! Reference data the product and bill forms pick from.

use serde::Serialize;
use stockdesk_core::{Category, Unit};

/// Stored at `lookup/units`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Units(pub Vec<Unit>);

impl Units {
    pub const PATH: &'static str = "lookup/units";
}

/// Stored at `lookup/categories`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Categories(pub Vec<Category>);

impl Categories {
    pub const PATH: &'static str = "lookup/categories";
}

/// `products/info/{id}` holds a `ProductInfo`.
pub fn product_info_path(product_id: &str) -> String {
    format!("products/info/{}", product_id)
}

