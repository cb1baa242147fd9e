//! Sale and purchase bill commands.
//!
//! A bill file fills the same form the UI shows: header fields, then one
//! row per product. Costs and GST come from the product's pricing unless
//! the file sets them.

use std::path::Path;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::Deserialize;
use stockdesk_bff::request::*;
use stockdesk_bff::request::bill::{ADD_ROW, EDIT, HEADER, LOAD, NEW, REMOVE_ROW, SUBMIT};
use stockdesk_bff::state::{BillState, CompanyBanner};
use stockdesk_core::lenient::opt_id_lenient;
use stockdesk_core::{BillDraft, PaymentMode, RowEdit, TransactionKind};

use crate::render::{dash, print_json, Output, Table};
use crate::shell::Shell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BillKind {
    Sale,
    Purchase,
}

impl From<BillKind> for TransactionKind {
    fn from(kind: BillKind) -> Self {
        match kind {
            BillKind::Sale => TransactionKind::Sale,
            BillKind::Purchase => TransactionKind::Purchase,
        }
    }
}

fn label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Sale => "Sale",
        TransactionKind::Purchase => "Purchase",
    }
}

fn one() -> f64 {
    1.0
}

/// Bill as written in a `-f` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillFile {
    #[serde(default, deserialize_with = "opt_id_lenient", alias = "customer_id", alias = "vendor_id")]
    pub party_id: Option<String>,
    #[serde(default, alias = "customer_name", alias = "vendor_name")]
    pub party_name: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub payment_mode: Option<PaymentMode>,
    #[serde(default)]
    pub absolute_discount: Option<f64>,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    #[serde(default, alias = "items")]
    pub rows: Vec<BillFileRow>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillFileRow {
    #[serde(deserialize_with = "stockdesk_core::lenient::id_lenient")]
    pub product_id: String,
    #[serde(default, deserialize_with = "opt_id_lenient")]
    pub unit_id: Option<String>,
    #[serde(default = "one")]
    pub quantity: f64,
    #[serde(default)]
    pub unit_cost: Option<f64>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub gst: Option<f64>,
}

impl BillFile {
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
        serde_json::from_str(&text).map_err(|e| anyhow!("Invalid bill file {}: {}", path.display(), e))
    }

    fn header(&self) -> BillHeaderReq {
        BillHeaderReq {
            party_id: self.party_id.clone(),
            party_name: self.party_name.clone(),
            bill_name: self.bill_name.clone(),
            date: self.date.clone(),
            payment_mode: self.payment_mode,
            absolute_discount: self.absolute_discount,
            paid_amount: self.paid_amount,
        }
    }
}

impl BillFileRow {
    /// Edits in form order: picking the product first lets its pricing
    /// fill the row before explicit values override it.
    fn edits(&self) -> Vec<RowEdit> {
        let mut edits = vec![RowEdit::Product(self.product_id.clone())];
        if let Some(unit) = &self.unit_id {
            edits.push(RowEdit::Unit(unit.clone()));
        }
        edits.push(RowEdit::Quantity(self.quantity));
        if let Some(cost) = self.unit_cost {
            edits.push(RowEdit::UnitCost(cost));
        }
        if let Some(discount) = self.discount {
            edits.push(RowEdit::Discount(discount));
        }
        if let Some(gst) = self.gst {
            edits.push(RowEdit::Gst(gst));
        }
        edits
    }
}

fn bill_state(shell: &Shell, kind: TransactionKind) -> Result<BillState> {
    shell
        .get(&BillState::path(kind))
        .ok_or_else(|| anyhow!("No {} bill open.", kind.collection()))
}

/// Apply a bill file to the open bill. Rows in the file replace the
/// bill's rows; a file without rows keeps them.
async fn fill(shell: &Shell, kind: TransactionKind, file: &BillFile) -> Result<BillDraft> {
    shell.emit(&bill_path(kind, HEADER), file.header()).await?;

    if !file.rows.is_empty() {
        let existing = bill_state(shell, kind)?.draft.rows.len();
        for index in (0..existing).rev() {
            shell.emit(&bill_path(kind, REMOVE_ROW), BillRemoveRowReq { index }).await?;
        }
        for (index, row) in file.rows.iter().enumerate() {
            shell.emit(&bill_path(kind, ADD_ROW), BillAddRowReq).await?;
            for edit in row.edits() {
                shell.emit(&bill_path(kind, EDIT), BillEditReq { index, edit }).await?;
            }
        }
    }

    Ok(bill_state(shell, kind)?.draft)
}

/// Price the bill against the server and record it. `dry_run` prints
/// the priced bill without saving.
pub async fn create(shell: &Shell, kind: TransactionKind, file: &BillFile, dry_run: bool) -> Result<()> {
    shell.require_login()?;
    if file.rows.is_empty() {
        anyhow::bail!("The bill file has no rows.");
    }
    shell.emit(&bill_path(kind, NEW), BillNewReq).await?;
    let draft = fill(shell, kind, file).await?;
    print_draft(&draft, &shell.banner(), shell.output())?;
    if dry_run {
        return Ok(());
    }
    shell.emit(&bill_path(kind, SUBMIT), BillSubmitReq).await
}

async fn load(shell: &Shell, kind: TransactionKind, id: &str) -> Result<BillDraft> {
    shell.require_login()?;
    shell.emit(&bill_path(kind, LOAD), BillLoadReq { transaction_id: id.to_string() }).await?;
    let draft = bill_state(shell, kind)?.draft;
    if draft.transaction_id != id {
        anyhow::bail!("{} {} not found.", label(kind), id);
    }
    Ok(draft)
}

pub async fn show(shell: &Shell, kind: TransactionKind, id: &str) -> Result<()> {
    let draft = load(shell, kind, id).await?;
    print_draft(&draft, &shell.banner(), shell.output())
}

/// Open an existing bill, apply the file over it and save.
pub async fn edit(shell: &Shell, kind: TransactionKind, id: &str, file: &BillFile) -> Result<()> {
    load(shell, kind, id).await?;
    let draft = fill(shell, kind, file).await?;
    print_draft(&draft, &shell.banner(), shell.output())?;
    shell.emit(&bill_path(kind, SUBMIT), BillSubmitReq).await
}

/// Totals for a bill without a server. Every row needs its unit cost.
pub fn quote(kind: TransactionKind, file: &BillFile) -> Result<BillDraft> {
    let mut draft = BillDraft::new(kind);
    if let Some(party_id) = &file.party_id {
        draft.party_id = party_id.clone();
    }
    if let Some(party_name) = &file.party_name {
        draft.party_name = party_name.clone();
    }
    if let Some(bill_name) = &file.bill_name {
        draft.bill_name = bill_name.clone();
    }
    if let Some(date) = &file.date {
        draft.date = date.clone();
    }
    if let Some(mode) = file.payment_mode {
        draft.payment_mode = mode;
    }

    draft.remove_row(0)?;
    for (i, row) in file.rows.iter().enumerate() {
        if row.unit_cost.is_none() {
            anyhow::bail!("Row {}: unit_cost is required for an offline quote.", i + 1);
        }
        let index = draft.add_row();
        for edit in row.edits() {
            draft.edit(index, edit)?;
        }
    }
    if let Some(discount) = file.absolute_discount {
        draft.set_absolute_discount(discount);
    }
    if let Some(paid) = file.paid_amount {
        draft.set_paid(paid);
    }
    Ok(draft)
}

pub fn print_draft(draft: &BillDraft, banner: &CompanyBanner, output: Output) -> Result<()> {
    if output == Output::Json {
        return print_json(draft);
    }

    let id = if draft.transaction_id.is_empty() { "(new)" } else { &draft.transaction_id };
    println!("{}:  {}", draft.kind.party_label(), dash(&draft.party_name));
    println!("Bill:      {} {}", id, draft.bill_name);
    println!("Date:      {}", dash(&draft.date));
    println!("Payment:   {}", draft.payment_mode);
    println!();

    let mut table = Table::new(&["#", "PRODUCT", "UNIT", "QTY", "COST", "DISC%", "GST%", "TOTAL"]);
    for (i, row) in draft.rows.iter().enumerate() {
        table.row(vec![
            (i + 1).to_string(),
            row.product_id.clone().unwrap_or_else(|| "-".into()),
            row.unit_id.clone().unwrap_or_else(|| "-".into()),
            row.quantity.to_string(),
            banner.format(row.unit_cost),
            row.discount.to_string(),
            row.gst.to_string(),
            banner.format(row.total),
        ]);
    }
    table.print();
    println!();

    let totals = &draft.totals;
    println!("Subtotal:  {}", banner.format(totals.subtotal));
    println!("Discount:  {}", banner.format(totals.absolute_discount));
    println!("Payable:   {}", banner.format(totals.payable));
    println!("Paid:      {}", banner.format(totals.paid));
    println!("Due:       {}", banner.format(totals.due));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(json: &str) -> BillFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn bill_file_accepts_party_aliases_and_codes() {
        let f = file(
            r#"{"customer_id": 42, "payment_mode": "upi", "items": [{"product_id": 7, "unit_cost": 10}]}"#,
        );
        assert_eq!(f.party_id.as_deref(), Some("42"));
        assert_eq!(f.payment_mode, Some(PaymentMode::Upi));
        assert_eq!(f.rows[0].product_id, "7");
        assert_eq!(f.rows[0].quantity, 1.0);

        assert!(serde_json::from_str::<BillFile>(r#"{"party": "x"}"#).is_err());
    }

    #[test]
    fn row_edits_pick_product_first() {
        let f = file(r#"{"rows": [{"product_id": "p1", "unit_id": "2", "quantity": 3, "gst": 5}]}"#);
        assert_eq!(
            f.rows[0].edits(),
            vec![
                RowEdit::Product("p1".into()),
                RowEdit::Unit("2".into()),
                RowEdit::Quantity(3.0),
                RowEdit::Gst(5.0),
            ]
        );
    }

    #[test]
    fn offline_quote_totals() {
        let f = file(
            r#"{
                "party_id": "c1",
                "absolute_discount": 12.4,
                "paid_amount": 100,
                "rows": [
                    {"product_id": "p1", "quantity": 2, "unit_cost": 100, "discount": 10, "gst": 18},
                    {"product_id": "p2", "unit_cost": 50}
                ]
            }"#,
        );
        let draft = quote(TransactionKind::Sale, &f).unwrap();
        assert_eq!(draft.rows.len(), 2);
        assert_eq!(draft.rows[0].total, 212.4);
        assert_eq!(draft.rows[1].total, 50.0);
        assert_eq!(draft.totals.subtotal, 262.4);
        assert_eq!(draft.totals.payable, 250.0);
        assert_eq!(draft.totals.due, 150.0);
        assert!(draft.to_transaction().is_ok());
    }

    #[test]
    fn offline_quote_needs_costs() {
        let f = file(r#"{"rows": [{"product_id": "p1"}]}"#);
        let err = quote(TransactionKind::Purchase, &f).unwrap_err();
        assert!(err.to_string().contains("unit_cost is required"));
    }

    #[test]
    fn bill_kind_maps_to_transaction_kind() {
        assert_eq!(TransactionKind::from(BillKind::Purchase), TransactionKind::Purchase);
    }
}
