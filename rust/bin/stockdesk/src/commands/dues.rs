//! Dues commands.

use anyhow::Result;
use stockdesk_bff::request::screen::LOAD;
use stockdesk_bff::request::{screen_path, LoadReq, PayDueReq};
use stockdesk_core::{DueRecord, Payment, PaymentMode};

use crate::shell::Shell;

/// Record a payment against a due. The due list is loaded first so the
/// amount can be checked against what is outstanding.
pub async fn pay(
    shell: &Shell,
    due_id: &str,
    amount: f64,
    mode: PaymentMode,
    date: Option<String>,
    note: Option<String>,
) -> Result<()> {
    shell.require_login()?;
    shell.emit(&screen_path::<DueRecord>(LOAD), LoadReq).await?;

    let payment = Payment {
        amount,
        payment_mode: mode,
        date: date.unwrap_or_else(today),
        note: note.unwrap_or_default(),
    };
    shell.emit(PayDueReq::PATH, PayDueReq { due_id: due_id.to_string(), payment }).await
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
