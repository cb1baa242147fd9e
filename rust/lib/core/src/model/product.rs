use serde::{Deserialize, Serialize};

use crate::billing::{round2, sale_costs};
use crate::lenient::{f64_lenient, id_lenient, opt_id_lenient};
use crate::resource::{Resource, Searchable};

fn one() -> f64 {
    1.0
}

/// Catalog entry.
///
/// A product is priced in its primary unit. When a secondary unit is set,
/// one primary unit equals `conversion_factor` secondary units
/// (1 box = 12 pcs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "id_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub hscode: String,
    #[serde(default, deserialize_with = "id_lenient")]
    pub primary_unit_id: String,
    #[serde(default, deserialize_with = "opt_id_lenient", skip_serializing_if = "Option::is_none")]
    pub secondary_unit_id: Option<String>,
    #[serde(default = "one", deserialize_with = "f64_lenient")]
    pub conversion_factor: f64,
    #[serde(default)]
    pub description: String,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            category: String::new(),
            hscode: String::new(),
            primary_unit_id: String::new(),
            secondary_unit_id: None,
            conversion_factor: 1.0,
            description: String::new(),
        }
    }
}

impl Product {
    /// Conversion factor usable as a divisor.
    pub fn effective_factor(&self) -> f64 {
        if self.conversion_factor > 0.0 {
            self.conversion_factor
        } else {
            1.0
        }
    }
}

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const LABEL: &'static str = "Product";

    fn id(&self) -> &str {
        &self.id
    }

    fn clear_id(&mut self) {
        self.id.clear();
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.category, &self.hscode]
    }
}

/// Pricing and stock view of a product (`GET /products/{id}/info`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default, deserialize_with = "id_lenient")]
    pub product_id: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub purchase_price: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub profit_percentage: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub gst: f64,
    #[serde(default, deserialize_with = "f64_lenient", alias = "pre_gst_sale_price")]
    pub pre_gst_sale_cost: f64,
    #[serde(default, deserialize_with = "f64_lenient", alias = "post_gst_sale_price")]
    pub post_gst_sale_cost: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub purchase_stock: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub sales_stock: f64,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub current_stock: f64,
}

impl ProductInfo {
    /// Derive sale costs from purchase price, profit and GST where the
    /// backend left them empty, and the current stock from the movements.
    pub fn fill_missing(mut self) -> Self {
        if self.pre_gst_sale_cost == 0.0 && self.purchase_price > 0.0 {
            let (pre, post) = sale_costs(self.purchase_price, self.profit_percentage, self.gst);
            self.pre_gst_sale_cost = pre;
            self.post_gst_sale_cost = post;
        } else if self.post_gst_sale_cost == 0.0 && self.pre_gst_sale_cost > 0.0 {
            self.post_gst_sale_cost = round2(self.pre_gst_sale_cost * (1.0 + self.gst.max(0.0) / 100.0));
        }
        if self.current_stock == 0.0 {
            self.current_stock = self.purchase_stock - self.sales_stock;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_with_defaults() {
        let p: Product = serde_json::from_str(
            r#"{"id":"p1","name":"Soap","primary_unit_id":1,"secondary_unit_id":null}"#,
        )
        .unwrap();
        assert_eq!(p.primary_unit_id, "1");
        assert_eq!(p.secondary_unit_id, None);
        assert_eq!(p.conversion_factor, 1.0);
    }

    #[test]
    fn zero_factor_is_not_a_divisor() {
        let p = Product { conversion_factor: 0.0, ..Default::default() };
        assert_eq!(p.effective_factor(), 1.0);
    }

    #[test]
    fn fill_missing_derives_sale_costs_and_stock() {
        let info = ProductInfo {
            purchase_price: 100.0,
            profit_percentage: 20.0,
            gst: 18.0,
            purchase_stock: 50.0,
            sales_stock: 20.0,
            ..Default::default()
        }
        .fill_missing();
        assert_eq!(info.pre_gst_sale_cost, 120.0);
        assert_eq!(info.post_gst_sale_cost, 141.6);
        assert_eq!(info.current_stock, 30.0);
    }

    #[test]
    fn fill_missing_keeps_backend_values() {
        let info = ProductInfo {
            purchase_price: 100.0,
            pre_gst_sale_cost: 130.0,
            post_gst_sale_cost: 150.0,
            current_stock: 7.0,
            ..Default::default()
        }
        .fill_missing();
        assert_eq!(info.pre_gst_sale_cost, 130.0);
        assert_eq!(info.post_gst_sale_cost, 150.0);
        assert_eq!(info.current_stock, 7.0);
    }
}
