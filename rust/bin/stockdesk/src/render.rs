//! Table and JSON output.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use stockdesk_bff::state::CompanyBanner;
use stockdesk_core::{Customer, DueRecord, Party, PageView, Product, Purchase, Sale, Transaction, User, Vendor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    Table,
    Json,
}

/// Left-aligned text table sized to its widest cell.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self { headers: headers.iter().map(|h| h.to_string()).collect(), rows: Vec::new() }
    }

    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.rows.push(cells);
        self
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| {
            let mut out = String::new();
            for (i, width) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                if i + 1 == widths.len() {
                    out.push_str(cell);
                } else {
                    let pad = width.saturating_sub(cell.chars().count());
                    out.push_str(cell);
                    out.push_str(&" ".repeat(pad + 2));
                }
            }
            out.trim_end().to_string()
        };

        let mut out = line(&self.headers);
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// How a record shows up as a table row.
pub trait Columns {
    const HEADERS: &'static [&'static str];

    fn cells(&self, banner: &CompanyBanner) -> Vec<String>;
}

fn party_cells(p: &Party) -> Vec<String> {
    vec![
        p.id.clone(),
        p.name.clone(),
        dash(&p.phone).to_string(),
        dash(&p.email).to_string(),
        dash(&p.gst_no).to_string(),
    ]
}

impl Columns for Customer {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "PHONE", "EMAIL", "GST NO"];

    fn cells(&self, _: &CompanyBanner) -> Vec<String> {
        party_cells(self)
    }
}

impl Columns for Vendor {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "PHONE", "EMAIL", "GST NO"];

    fn cells(&self, _: &CompanyBanner) -> Vec<String> {
        party_cells(self)
    }
}

impl Columns for Product {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "CATEGORY", "HSN", "UNITS"];

    fn cells(&self, _: &CompanyBanner) -> Vec<String> {
        let units = match &self.secondary_unit_id {
            Some(secondary) => format!("{} = {} x {}", self.primary_unit_id, self.conversion_factor, secondary),
            None => dash(&self.primary_unit_id).to_string(),
        };
        vec![
            self.id.clone(),
            self.name.clone(),
            dash(&self.category).to_string(),
            dash(&self.hscode).to_string(),
            units,
        ]
    }
}

impl Columns for User {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EMAIL", "MOBILE", "ROLE", "STATUS"];

    fn cells(&self, _: &CompanyBanner) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            dash(&self.email).to_string(),
            dash(&self.mobile).to_string(),
            self.rid.to_string(),
            if self.blocked { "blocked" } else { "active" }.to_string(),
        ]
    }
}

fn transaction_cells(tx: &Transaction, banner: &CompanyBanner) -> Vec<String> {
    vec![
        tx.transaction_id.clone(),
        dash(&tx.date).to_string(),
        dash(&tx.bill_name).to_string(),
        dash(&tx.party_name).to_string(),
        tx.payment_mode.to_string(),
        banner.format(tx.payable_amount),
        banner.format(tx.due_amount),
    ]
}

const TRANSACTION_HEADERS: &[&str] = &["ID", "DATE", "BILL", "PARTY", "MODE", "PAYABLE", "DUE"];

impl Columns for Sale {
    const HEADERS: &'static [&'static str] = TRANSACTION_HEADERS;

    fn cells(&self, banner: &CompanyBanner) -> Vec<String> {
        transaction_cells(self, banner)
    }
}

impl Columns for Purchase {
    const HEADERS: &'static [&'static str] = TRANSACTION_HEADERS;

    fn cells(&self, banner: &CompanyBanner) -> Vec<String> {
        transaction_cells(self, banner)
    }
}

impl Columns for DueRecord {
    const HEADERS: &'static [&'static str] = &["ID", "DATE", "KIND", "BILL", "PARTY", "PAYABLE", "PAID", "OUTSTANDING"];

    fn cells(&self, banner: &CompanyBanner) -> Vec<String> {
        vec![
            self.id.clone(),
            dash(&self.date).to_string(),
            self.kind.collection().to_string(),
            dash(&self.bill_name).to_string(),
            dash(&self.party_name).to_string(),
            banner.format(self.payable_amount),
            banner.format(self.paid_amount),
            banner.format(self.outstanding()),
        ]
    }
}

/// Print one page of records with a pager footer.
pub fn print_page<T: Columns + Serialize>(view: &PageView<T>, banner: &CompanyBanner, output: Output) -> Result<()> {
    if output == Output::Json {
        return print_json(view);
    }
    if view.items.is_empty() {
        println!("No records found.");
        return Ok(());
    }
    let mut table = Table::new(T::HEADERS);
    for item in &view.items {
        table.row(item.cells(banner));
    }
    table.print();
    println!();
    println!("Page {} of {} ({} total)", view.page, view.page_count, view.total);
    Ok(())
}

/// Print one record as FIELD/VALUE pairs.
pub fn print_record<T: Columns + Serialize>(record: &T, banner: &CompanyBanner, output: Output) -> Result<()> {
    if output == Output::Json {
        return print_json(record);
    }
    let mut table = Table::new(&["FIELD", "VALUE"]);
    for (header, cell) in T::HEADERS.iter().zip(record.cells(banner)) {
        table.row(vec![header.to_string(), cell]);
    }
    table.print();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_core::{Company, DueRecord, Role};

    fn usd() -> CompanyBanner {
        CompanyBanner::from_company(Some(&Company {
            id: "1".into(),
            name: "Acme".into(),
            currency: "USD".into(),
        }))
    }

    #[test]
    fn columns_align_to_widest_cell() {
        let mut table = Table::new(&["ID", "NAME"]);
        table.row(vec!["1".into(), "Asha".into()]);
        table.row(vec!["1024".into(), "Bo".into()]);
        assert_eq!(table.render(), "ID    NAME\n1     Asha\n1024  Bo");
    }

    #[test]
    fn short_rows_pad_with_blanks() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.row(vec!["x".into()]);
        assert_eq!(table.render().lines().nth(1), Some("x"));
    }

    #[test]
    fn user_cells_show_role_and_status() {
        let user = User {
            id: "7".into(),
            name: "Ravi".into(),
            rid: Role::Manager,
            blocked: true,
            ..User::default()
        };
        let cells = user.cells(&usd());
        assert_eq!(cells[4], "Manager");
        assert_eq!(cells[5], "blocked");
        assert_eq!(cells[3], "-");
    }

    #[test]
    fn due_cells_use_company_currency() {
        let due = DueRecord {
            id: "d1".into(),
            payable_amount: 500.0,
            paid_amount: 120.5,
            ..DueRecord::default()
        };
        let cells = due.cells(&usd());
        assert_eq!(cells[5], "$500.00");
        assert_eq!(cells[7], "$379.50");
    }
}
