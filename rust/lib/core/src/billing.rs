//! Bill entry arithmetic shared by the sale and purchase forms.
//!
//! Row total: `quantity * unit_cost`, minus `discount%`, plus `gst%`,
//! rounded to two decimals. Bill: payable is the subtotal less the
//! absolute discount, due is payable less paid; neither goes below zero.
//!
//! [`BillDraft`] is the editable form. Every edit recomputes the touched
//! row and the bill totals eagerly.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::model::{LineItem, Product, ProductInfo, Transaction, TransactionKind};
use crate::payment::PaymentMode;

/// Round to two decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Negative and non-finite inputs count as zero.
fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

fn percent(x: f64) -> f64 {
    non_negative(x).min(100.0)
}

/// Total of one line: quantity × cost, less discount %, plus GST %.
pub fn line_total(quantity: f64, unit_cost: f64, discount_pct: f64, gst_pct: f64) -> f64 {
    let mut total = non_negative(quantity) * non_negative(unit_cost);
    total -= total * percent(discount_pct) / 100.0;
    total += total * non_negative(gst_pct) / 100.0;
    round2(total)
}

/// Pre- and post-GST sale cost from purchase price and profit margin.
pub fn sale_costs(purchase_price: f64, profit_pct: f64, gst_pct: f64) -> (f64, f64) {
    let pre = round2(non_negative(purchase_price) * (1.0 + non_negative(profit_pct) / 100.0));
    let post = round2(pre * (1.0 + non_negative(gst_pct) / 100.0));
    (pre, post)
}

// ── Totals ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BillTotals {
    pub subtotal: f64,
    pub absolute_discount: f64,
    pub payable: f64,
    pub paid: f64,
    pub due: f64,
}

impl BillTotals {
    pub fn compute<I>(line_totals: I, absolute_discount: f64, paid: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let subtotal = round2(line_totals.into_iter().map(non_negative).sum());
        let absolute_discount = round2(non_negative(absolute_discount));
        let paid = round2(non_negative(paid));
        let payable = round2((subtotal - absolute_discount).max(0.0));
        let due = round2((payable - paid).max(0.0));
        Self { subtotal, absolute_discount, payable, paid, due }
    }
}

// ── Pricing ─────────────────────────────────────────────────────────

/// Price of one product for one bill, in the product's primary unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    pub base_cost: f64,
    pub gst: f64,
    pub primary_unit_id: String,
    pub secondary_unit_id: Option<String>,
    pub conversion_factor: f64,
}

impl Pricing {
    /// Sales are priced at the pre-GST sale cost, purchases at the
    /// purchase price.
    pub fn new(kind: TransactionKind, product: &Product, info: &ProductInfo) -> Self {
        let base_cost = match kind {
            TransactionKind::Sale => info.pre_gst_sale_cost,
            TransactionKind::Purchase => info.purchase_price,
        };
        Self {
            base_cost: non_negative(base_cost),
            gst: non_negative(info.gst),
            primary_unit_id: product.primary_unit_id.clone(),
            secondary_unit_id: product.secondary_unit_id.clone(),
            conversion_factor: product.effective_factor(),
        }
    }

    /// Cost per `unit_id`. Secondary units cost `base / factor`.
    pub fn cost_for_unit(&self, unit_id: Option<&str>) -> f64 {
        match (unit_id, self.secondary_unit_id.as_deref()) {
            (Some(unit), Some(secondary)) if unit == secondary && unit != self.primary_unit_id => {
                let factor = if self.conversion_factor > 0.0 { self.conversion_factor } else { 1.0 };
                self.base_cost / factor
            }
            _ => self.base_cost,
        }
    }

    fn knows_unit(&self, unit_id: &str) -> bool {
        self.primary_unit_id == unit_id || self.secondary_unit_id.as_deref() == Some(unit_id)
    }
}

// ── Draft ───────────────────────────────────────────────────────────

/// One editable row of the bill form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRow {
    pub product_id: Option<String>,
    pub unit_id: Option<String>,
    pub quantity: f64,
    pub unit_cost: f64,
    pub discount: f64,
    pub gst: f64,
    pub total: f64,
    /// Cost typed by hand; price lookups leave it alone.
    #[serde(skip)]
    pub cost_overridden: bool,
    #[serde(skip)]
    pub gst_overridden: bool,
}

impl BillRow {
    pub fn blank() -> Self {
        Self {
            product_id: None,
            unit_id: None,
            quantity: 1.0,
            unit_cost: 0.0,
            discount: 0.0,
            gst: 0.0,
            total: 0.0,
            cost_overridden: false,
            gst_overridden: false,
        }
    }

    fn recompute(&mut self) {
        self.total = line_total(self.quantity, self.unit_cost, self.discount, self.gst);
    }

    fn apply_pricing(&mut self, pricing: &Pricing) {
        let unit_ok = self.unit_id.as_deref().is_some_and(|u| pricing.knows_unit(u));
        if !unit_ok {
            self.unit_id = Some(pricing.primary_unit_id.clone());
        }
        if !self.cost_overridden {
            self.unit_cost = pricing.cost_for_unit(self.unit_id.as_deref());
        }
        if !self.gst_overridden {
            self.gst = pricing.gst;
        }
    }
}

/// A single field change on one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEdit {
    Product(String),
    Unit(String),
    Quantity(f64),
    UnitCost(f64),
    Discount(f64),
    Gst(f64),
}

/// Editable bill form state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillDraft {
    pub kind: TransactionKind,
    /// Set when editing an existing bill.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub transaction_id: String,
    pub party_id: String,
    pub party_name: String,
    pub bill_name: String,
    pub date: String,
    pub payment_mode: PaymentMode,
    pub absolute_discount: f64,
    pub paid_amount: f64,
    pub rows: Vec<BillRow>,
    pub totals: BillTotals,
    #[serde(skip)]
    pricing: BTreeMap<String, Pricing>,
}

impl BillDraft {
    /// Empty bill dated today with one blank row.
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            transaction_id: String::new(),
            party_id: String::new(),
            party_name: String::new(),
            bill_name: String::new(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            payment_mode: PaymentMode::default(),
            absolute_discount: 0.0,
            paid_amount: 0.0,
            rows: vec![BillRow::blank()],
            totals: BillTotals::default(),
            pricing: BTreeMap::new(),
        }
    }

    /// Load an existing bill. Its costs and GST are kept as entered.
    pub fn from_transaction(kind: TransactionKind, tx: &Transaction) -> Self {
        let rows = tx
            .items
            .iter()
            .map(|item| {
                let mut row = BillRow {
                    product_id: Some(item.product_id.clone()).filter(|s| !s.is_empty()),
                    unit_id: Some(item.unit_id.clone()).filter(|s| !s.is_empty()),
                    quantity: non_negative(item.quantity),
                    unit_cost: non_negative(item.unit_cost),
                    discount: percent(item.discount),
                    gst: non_negative(item.gst),
                    total: 0.0,
                    cost_overridden: true,
                    gst_overridden: true,
                };
                row.recompute();
                row
            })
            .collect();
        let mut draft = Self {
            kind,
            transaction_id: tx.transaction_id.clone(),
            party_id: tx.party_id.clone(),
            party_name: tx.party_name.clone(),
            bill_name: tx.bill_name.clone(),
            date: tx.date.clone(),
            payment_mode: tx.payment_mode,
            absolute_discount: non_negative(tx.absolute_discount),
            paid_amount: non_negative(tx.paid_amount),
            rows,
            totals: BillTotals::default(),
            pricing: BTreeMap::new(),
        };
        draft.recompute_totals();
        draft
    }

    pub fn add_row(&mut self) -> usize {
        self.rows.push(BillRow::blank());
        self.recompute_totals();
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, index: usize) -> Result<(), CoreError> {
        self.check_index(index)?;
        self.rows.remove(index);
        self.recompute_totals();
        Ok(())
    }

    /// Apply one field edit. Returns `true` when the row now holds a
    /// product whose pricing has not been looked up yet.
    pub fn edit(&mut self, index: usize, edit: RowEdit) -> Result<bool, CoreError> {
        self.check_index(index)?;
        let pricing = &self.pricing;
        let row = &mut self.rows[index];
        let mut needs_lookup = false;

        match edit {
            RowEdit::Product(product_id) => {
                row.cost_overridden = false;
                row.gst_overridden = false;
                match pricing.get(&product_id) {
                    Some(p) => {
                        row.unit_id = None;
                        row.apply_pricing(p);
                    }
                    None => {
                        row.unit_id = None;
                        row.unit_cost = 0.0;
                        needs_lookup = true;
                    }
                }
                row.product_id = Some(product_id);
            }
            RowEdit::Unit(unit_id) => {
                let p = row.product_id.as_ref().and_then(|id| pricing.get(id));
                if let Some(p) = p {
                    if !row.cost_overridden {
                        row.unit_cost = p.cost_for_unit(Some(&unit_id));
                    }
                }
                row.unit_id = Some(unit_id);
            }
            RowEdit::Quantity(q) => row.quantity = non_negative(q),
            RowEdit::UnitCost(c) => {
                row.unit_cost = non_negative(c);
                row.cost_overridden = true;
            }
            RowEdit::Discount(d) => row.discount = percent(d),
            RowEdit::Gst(g) => {
                row.gst = non_negative(g);
                row.gst_overridden = true;
            }
        }

        row.recompute();
        self.recompute_totals();
        Ok(needs_lookup)
    }

    pub fn set_absolute_discount(&mut self, value: f64) {
        self.absolute_discount = non_negative(value);
        self.recompute_totals();
    }

    pub fn set_paid(&mut self, value: f64) {
        self.paid_amount = non_negative(value);
        self.recompute_totals();
    }

    pub fn has_pricing(&self, product_id: &str) -> bool {
        self.pricing.contains_key(product_id)
    }

    /// Products referenced by rows whose pricing is still unknown.
    pub fn missing_pricing(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .rows
            .iter()
            .filter_map(|r| r.product_id.clone())
            .filter(|id| !self.pricing.contains_key(id))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Record pricing for a product and push it into every row holding
    /// that product.
    pub fn apply_pricing(&mut self, product_id: &str, pricing: Pricing) {
        for row in self.rows.iter_mut() {
            if row.product_id.as_deref() == Some(product_id) {
                row.apply_pricing(&pricing);
                row.recompute();
            }
        }
        self.pricing.insert(product_id.to_string(), pricing);
        self.recompute_totals();
    }

    /// Check the draft can be submitted.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.party_id.trim().is_empty() {
            return Err(CoreError::InvalidDraft(format!(
                "select a {}",
                self.kind.party_label().to_lowercase()
            )));
        }
        if self.rows.is_empty() {
            return Err(CoreError::InvalidDraft("add at least one product".into()));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.product_id.as_deref().is_none_or(str::is_empty) {
                return Err(CoreError::InvalidDraft(format!("row {}: select a product", i + 1)));
            }
            if row.quantity <= 0.0 {
                return Err(CoreError::InvalidDraft(format!(
                    "row {}: quantity must be greater than zero",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Transport form of the draft.
    pub fn to_transaction(&self) -> Result<Transaction, CoreError> {
        self.validate()?;
        let items = self
            .rows
            .iter()
            .map(|row| {
                let product_id = row.product_id.clone().unwrap_or_default();
                let unit_id = row
                    .unit_id
                    .clone()
                    .or_else(|| self.pricing.get(&product_id).map(|p| p.primary_unit_id.clone()))
                    .unwrap_or_default();
                LineItem {
                    product_id,
                    unit_id,
                    quantity: row.quantity,
                    unit_cost: row.unit_cost,
                    discount: row.discount,
                    gst: row.gst,
                    total: row.total,
                }
            })
            .collect();
        Ok(Transaction {
            transaction_id: self.transaction_id.clone(),
            bill_name: self.bill_name.clone(),
            date: self.date.clone(),
            payment_mode: self.payment_mode,
            party_id: self.party_id.clone(),
            party_name: self.party_name.clone(),
            absolute_discount: self.totals.absolute_discount,
            paid_amount: self.totals.paid,
            payable_amount: self.totals.payable,
            total_amount: self.totals.subtotal,
            due_amount: self.totals.due,
            items,
        })
    }

    fn check_index(&self, index: usize) -> Result<(), CoreError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(CoreError::RowOutOfRange { index, len: self.rows.len() })
        }
    }

    fn recompute_totals(&mut self) {
        self.totals = BillTotals::compute(
            self.rows.iter().map(|r| r.total),
            self.absolute_discount,
            self.paid_amount,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soap() -> (Product, ProductInfo) {
        let product = Product {
            id: "p1".into(),
            name: "Soap".into(),
            primary_unit_id: "box".into(),
            secondary_unit_id: Some("pcs".into()),
            conversion_factor: 10.0,
            ..Default::default()
        };
        let info = ProductInfo {
            product_id: "p1".into(),
            purchase_price: 80.0,
            pre_gst_sale_cost: 100.0,
            gst: 18.0,
            ..Default::default()
        };
        (product, info)
    }

    // ====================================================================
    // line_total
    // ====================================================================

    #[test]
    fn line_total_applies_discount_then_gst() {
        assert_eq!(line_total(2.0, 100.0, 10.0, 18.0), 212.4);
        assert_eq!(line_total(3.0, 33.333, 0.0, 0.0), 100.0);
        assert_eq!(line_total(1.0, 99.99, 0.0, 5.0), 104.99);
    }

    #[test]
    fn line_total_clamps_negative_inputs() {
        assert_eq!(line_total(-2.0, 100.0, 0.0, 0.0), 0.0);
        assert_eq!(line_total(2.0, -100.0, 0.0, 0.0), 0.0);
        assert_eq!(line_total(2.0, 100.0, -10.0, -18.0), 200.0);
        assert_eq!(line_total(2.0, 100.0, 150.0, 18.0), 0.0);
        assert_eq!(line_total(f64::NAN, 100.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn line_total_matches_closed_form() {
        let grid = [0.0, 0.5, 1.0, 3.0, 12.75, 250.0];
        let pcts = [0.0, 5.0, 12.5, 18.0, 28.0, 100.0];
        for &q in &grid {
            for &c in &grid {
                for &d in &pcts {
                    for &g in &pcts {
                        let expected = round2(q * c * (1.0 - d / 100.0) * (1.0 + g / 100.0));
                        let got = line_total(q, c, d, g);
                        assert!((got - expected).abs() <= 0.01, "q={q} c={c} d={d} g={g}: {got} vs {expected}");
                        assert!(got >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn line_total_is_monotonic() {
        let steps = [0.0, 1.0, 2.5, 10.0, 40.0, 99.0, 100.0];
        for w in steps.windows(2) {
            let (lo, hi) = (w[0], w[1]);
            assert!(line_total(lo, 50.0, 10.0, 18.0) <= line_total(hi, 50.0, 10.0, 18.0));
            assert!(line_total(4.0, lo, 10.0, 18.0) <= line_total(4.0, hi, 10.0, 18.0));
            assert!(line_total(4.0, 50.0, 10.0, lo) <= line_total(4.0, 50.0, 10.0, hi));
            assert!(line_total(4.0, 50.0, lo, 18.0) >= line_total(4.0, 50.0, hi, 18.0));
        }
    }

    #[test]
    fn sale_costs_from_margin() {
        assert_eq!(sale_costs(100.0, 20.0, 18.0), (120.0, 141.6));
        assert_eq!(sale_costs(-5.0, 20.0, 18.0), (0.0, 0.0));
    }

    // ====================================================================
    // BillTotals
    // ====================================================================

    #[test]
    fn totals_payable_and_due() {
        let t = BillTotals::compute([100.0, 50.5], 20.0, 30.0);
        assert_eq!(t.subtotal, 150.5);
        assert_eq!(t.payable, 130.5);
        assert_eq!(t.due, 100.5);
    }

    #[test]
    fn totals_never_negative() {
        let t = BillTotals::compute([40.0], 90.0, 10.0);
        assert_eq!(t.payable, 0.0);
        assert_eq!(t.due, 0.0);

        let t = BillTotals::compute([40.0], 0.0, 100.0);
        assert_eq!(t.payable, 40.0);
        assert_eq!(t.due, 0.0);
    }

    // ====================================================================
    // Pricing
    // ====================================================================

    #[test]
    fn pricing_source_depends_on_kind() {
        let (product, info) = soap();
        assert_eq!(Pricing::new(TransactionKind::Sale, &product, &info).base_cost, 100.0);
        assert_eq!(Pricing::new(TransactionKind::Purchase, &product, &info).base_cost, 80.0);
    }

    #[test]
    fn secondary_unit_divides_by_factor() {
        let (product, info) = soap();
        let p = Pricing::new(TransactionKind::Sale, &product, &info);
        assert_eq!(p.cost_for_unit(Some("box")), 100.0);
        assert_eq!(p.cost_for_unit(Some("pcs")), 10.0);
        assert_eq!(p.cost_for_unit(None), 100.0);
        assert_eq!(p.cost_for_unit(Some("kg")), 100.0);
    }

    // ====================================================================
    // BillDraft
    // ====================================================================

    #[test]
    fn new_draft_has_one_blank_row() {
        let d = BillDraft::new(TransactionKind::Sale);
        assert_eq!(d.rows.len(), 1);
        assert_eq!(d.rows[0].quantity, 1.0);
        assert_eq!(d.totals, BillTotals::default());
        assert_eq!(d.date.len(), 10);
    }

    #[test]
    fn selecting_unpriced_product_requests_lookup() {
        let mut d = BillDraft::new(TransactionKind::Sale);
        assert!(d.edit(0, RowEdit::Product("p1".into())).unwrap());
        assert_eq!(d.missing_pricing(), vec!["p1".to_string()]);
        assert_eq!(d.rows[0].unit_cost, 0.0);
    }

    #[test]
    fn pricing_cascades_to_every_row_with_the_product() {
        let (product, info) = soap();
        let mut d = BillDraft::new(TransactionKind::Sale);
        d.edit(0, RowEdit::Product("p1".into())).unwrap();
        let second = d.add_row();
        d.edit(second, RowEdit::Product("p1".into())).unwrap();
        d.edit(second, RowEdit::Unit("pcs".into())).unwrap();
        d.edit(second, RowEdit::Quantity(5.0)).unwrap();

        d.apply_pricing("p1", Pricing::new(TransactionKind::Sale, &product, &info));

        assert_eq!(d.rows[0].unit_id.as_deref(), Some("box"));
        assert_eq!(d.rows[0].unit_cost, 100.0);
        assert_eq!(d.rows[0].gst, 18.0);
        assert_eq!(d.rows[0].total, 118.0);

        assert_eq!(d.rows[1].unit_id.as_deref(), Some("pcs"));
        assert_eq!(d.rows[1].unit_cost, 10.0);
        assert_eq!(d.rows[1].total, 59.0);

        assert_eq!(d.totals.subtotal, 177.0);
        assert!(d.missing_pricing().is_empty());
    }

    #[test]
    fn cached_pricing_fills_new_rows_without_lookup() {
        let (product, info) = soap();
        let mut d = BillDraft::new(TransactionKind::Purchase);
        d.apply_pricing("p1", Pricing::new(TransactionKind::Purchase, &product, &info));
        assert!(!d.edit(0, RowEdit::Product("p1".into())).unwrap());
        assert_eq!(d.rows[0].unit_cost, 80.0);
        assert_eq!(d.rows[0].total, 94.4);
    }

    #[test]
    fn manual_cost_survives_lookup_until_product_changes() {
        let (product, info) = soap();
        let mut d = BillDraft::new(TransactionKind::Sale);
        d.edit(0, RowEdit::Product("p1".into())).unwrap();
        d.edit(0, RowEdit::UnitCost(95.0)).unwrap();
        d.edit(0, RowEdit::Gst(5.0)).unwrap();
        d.apply_pricing("p1", Pricing::new(TransactionKind::Sale, &product, &info));
        assert_eq!(d.rows[0].unit_cost, 95.0);
        assert_eq!(d.rows[0].gst, 5.0);

        d.edit(0, RowEdit::Unit("pcs".into())).unwrap();
        assert_eq!(d.rows[0].unit_cost, 95.0);

        d.edit(0, RowEdit::Product("p1".into())).unwrap();
        assert_eq!(d.rows[0].unit_cost, 100.0);
        assert_eq!(d.rows[0].gst, 18.0);
    }

    #[test]
    fn edits_clamp_and_recompute() {
        let mut d = BillDraft::new(TransactionKind::Sale);
        d.edit(0, RowEdit::Product("p9".into())).unwrap();
        d.edit(0, RowEdit::UnitCost(50.0)).unwrap();
        d.edit(0, RowEdit::Quantity(-3.0)).unwrap();
        assert_eq!(d.rows[0].quantity, 0.0);
        assert_eq!(d.totals.subtotal, 0.0);

        d.edit(0, RowEdit::Quantity(4.0)).unwrap();
        d.edit(0, RowEdit::Discount(250.0)).unwrap();
        assert_eq!(d.rows[0].discount, 100.0);
        assert_eq!(d.rows[0].total, 0.0);

        d.edit(0, RowEdit::Discount(25.0)).unwrap();
        assert_eq!(d.rows[0].total, 150.0);
        d.set_absolute_discount(10.0);
        d.set_paid(100.0);
        assert_eq!(d.totals.payable, 140.0);
        assert_eq!(d.totals.due, 40.0);
    }

    #[test]
    fn row_index_is_checked() {
        let mut d = BillDraft::new(TransactionKind::Sale);
        assert_eq!(
            d.edit(3, RowEdit::Quantity(1.0)).unwrap_err(),
            CoreError::RowOutOfRange { index: 3, len: 1 }
        );
        assert!(d.remove_row(1).is_err());
        d.remove_row(0).unwrap();
        assert!(d.rows.is_empty());
    }

    #[test]
    fn validation_messages() {
        let mut d = BillDraft::new(TransactionKind::Purchase);
        assert_eq!(d.validate().unwrap_err(), CoreError::InvalidDraft("select a vendor".into()));

        d.party_id = "v1".into();
        assert_eq!(d.validate().unwrap_err(), CoreError::InvalidDraft("row 1: select a product".into()));

        d.edit(0, RowEdit::Product("p1".into())).unwrap();
        d.edit(0, RowEdit::Quantity(0.0)).unwrap();
        assert_eq!(
            d.validate().unwrap_err(),
            CoreError::InvalidDraft("row 1: quantity must be greater than zero".into())
        );

        d.remove_row(0).unwrap();
        assert_eq!(d.validate().unwrap_err(), CoreError::InvalidDraft("add at least one product".into()));
    }

    #[test]
    fn to_transaction_carries_totals() {
        let (product, info) = soap();
        let mut d = BillDraft::new(TransactionKind::Sale);
        d.party_id = "c1".into();
        d.party_name = "Ravi Traders".into();
        d.payment_mode = PaymentMode::Upi;
        d.edit(0, RowEdit::Product("p1".into())).unwrap();
        d.edit(0, RowEdit::Quantity(2.0)).unwrap();
        d.apply_pricing("p1", Pricing::new(TransactionKind::Sale, &product, &info));
        d.set_absolute_discount(6.0);
        d.set_paid(200.0);

        let tx = d.to_transaction().unwrap();
        assert_eq!(tx.total_amount, 236.0);
        assert_eq!(tx.payable_amount, 230.0);
        assert_eq!(tx.paid_amount, 200.0);
        assert_eq!(tx.due_amount, 30.0);
        assert_eq!(tx.items.len(), 1);
        assert_eq!(tx.items[0].unit_id, "box");
        assert_eq!(tx.items[0].total, 236.0);
        assert_eq!(tx.payment_mode, PaymentMode::Upi);
    }

    #[test]
    fn from_transaction_recomputes_rows() {
        let tx = Transaction {
            transaction_id: "t1".into(),
            party_id: "c1".into(),
            absolute_discount: 5.0,
            paid_amount: 50.0,
            total_amount: 9999.0,
            items: vec![LineItem {
                product_id: "p1".into(),
                unit_id: "box".into(),
                quantity: 2.0,
                unit_cost: 100.0,
                discount: 10.0,
                gst: 18.0,
                total: 0.0,
            }],
            ..Default::default()
        };
        let d = BillDraft::from_transaction(TransactionKind::Sale, &tx);
        assert_eq!(d.rows[0].total, 212.4);
        assert_eq!(d.totals.subtotal, 212.4);
        assert_eq!(d.totals.payable, 207.4);
        assert_eq!(d.totals.due, 157.4);
        assert!(d.rows[0].cost_overridden);
    }
}
