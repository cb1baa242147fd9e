//! Generic record commands, shared by every CRUD screen.
//!
//! `stockdesk customers list`, `stockdesk products edit 12 --json ...`.
//! Each command drives the same screen requests the UI does: load, search,
//! page, open, save, delete.

use anyhow::{anyhow, Result};
use serde_json::Value;
use stockdesk_bff::request::*;
use stockdesk_bff::request::screen::{DELETE, LOAD, OPEN, PAGE, SAVE, SEARCH};
use stockdesk_bff::state::{product_info_path, EditorState, ListPage};
use stockdesk_core::{ProductInfo, Resource, Searchable};

use crate::render::{print_json, print_page, print_record, Columns, Output, Table};
use crate::shell::Shell;

/// Bounds every record type driven through the screen handlers.
pub trait Record: Resource + Searchable + Columns + Default {}

impl<T: Resource + Searchable + Columns + Default> Record for T {}

/// Read a JSON object from `--json` or `-f`.
pub fn read_body(json: Option<String>, file: Option<String>) -> Result<Value> {
    let text = match (json, file) {
        (Some(json), None) => json,
        (None, Some(path)) => {
            std::fs::read_to_string(&path).map_err(|e| anyhow!("Cannot read {}: {}", path, e))?
        }
        (Some(_), Some(_)) => anyhow::bail!("Provide either --json or -f <file>, not both."),
        (None, None) => anyhow::bail!("Provide --json or -f <file>."),
    };
    let body: Value = serde_json::from_str(&text).map_err(|e| anyhow!("Invalid JSON: {}", e))?;
    if !body.is_object() {
        anyhow::bail!("Expected a JSON object.");
    }
    Ok(body)
}

/// Overlay `patch`'s top-level keys onto `base`.
fn merge(base: &mut Value, patch: Value) {
    if let (Value::Object(base), Value::Object(patch)) = (base, patch) {
        for (key, value) in patch {
            base.insert(key, value);
        }
    }
}

/// Load the list and print the requested page.
pub async fn list<T: Record>(shell: &Shell, search: Option<String>, page: Option<usize>) -> Result<()> {
    shell.require_login()?;
    shell.emit(&screen_path::<T>(LOAD), LoadReq).await?;
    if let Some(query) = search {
        shell.emit(&screen_path::<T>(SEARCH), SearchReq { query }).await?;
    }
    if let Some(page) = page {
        shell.emit(&screen_path::<T>(PAGE), PageReq { page }).await?;
    }

    let list: ListPage<T> = shell
        .get(&ListPage::<T>::path())
        .ok_or_else(|| anyhow!("{} list is not loaded", T::LABEL))?;
    print_page(&list.view(), &shell.banner(), shell.output())
}

/// Open a record the way the edit dialog does.
async fn open<T: Record>(shell: &Shell, id: &str) -> Result<T> {
    shell.require_login()?;
    shell.emit(&screen_path::<T>(OPEN), OpenReq { id: Some(id.to_string()) }).await?;
    shell
        .get::<EditorState<T>>(&EditorState::<T>::path())
        .filter(|editor| editor.editing.as_deref() == Some(id))
        .map(|editor| editor.draft)
        .ok_or_else(|| anyhow!("{} {} not found.", T::LABEL, id))
}

pub async fn show<T: Record>(shell: &Shell, id: &str) -> Result<()> {
    let record: T = open(shell, id).await?;
    print_record(&record, &shell.banner(), shell.output())
}

pub async fn add<T: Record>(shell: &Shell, body: Value) -> Result<()> {
    shell.require_login()?;
    let record: T = serde_json::from_value(body).map_err(|e| anyhow!("Invalid {}: {}", T::LABEL.to_lowercase(), e))?;
    shell.emit(&screen_path::<T>(OPEN), OpenReq { id: None }).await?;
    shell.emit(&screen_path::<T>(SAVE), SaveReq { record }).await
}

/// Fetch the record, overlay the given fields, and save.
pub async fn edit<T: Record>(shell: &Shell, id: &str, patch: Value) -> Result<()> {
    let current: T = open(shell, id).await?;
    let mut merged = serde_json::to_value(&current)?;
    merge(&mut merged, patch);
    let record: T = serde_json::from_value(merged).map_err(|e| anyhow!("Invalid {}: {}", T::LABEL.to_lowercase(), e))?;
    shell.emit(&screen_path::<T>(SAVE), SaveReq { record }).await
}

pub async fn delete<T: Record>(shell: &Shell, id: &str) -> Result<()> {
    shell.require_login()?;
    shell.emit(&screen_path::<T>(DELETE), DeleteReq { id: id.to_string() }).await
}

/// Pricing and stock for one product.
pub async fn product_info(shell: &Shell, id: &str) -> Result<()> {
    shell.require_login()?;
    shell.emit(ProductInfoReq::PATH, ProductInfoReq { product_id: id.to_string() }).await?;
    let info: ProductInfo = shell
        .get(&product_info_path(id))
        .ok_or_else(|| anyhow!("No pricing found for product {}.", id))?;

    if shell.output() == Output::Json {
        return print_json(&info);
    }
    let banner = shell.banner();
    let mut table = Table::new(&["FIELD", "VALUE"]);
    table
        .row(vec!["PURCHASE PRICE".into(), banner.format(info.purchase_price)])
        .row(vec!["PROFIT".into(), format!("{}%", info.profit_percentage)])
        .row(vec!["GST".into(), format!("{}%", info.gst)])
        .row(vec!["SALE (PRE-GST)".into(), banner.format(info.pre_gst_sale_cost)])
        .row(vec!["SALE (POST-GST)".into(), banner.format(info.post_gst_sale_cost)])
        .row(vec!["PURCHASED".into(), info.purchase_stock.to_string()])
        .row(vec!["SOLD".into(), info.sales_stock.to_string()])
        .row(vec!["IN STOCK".into(), info.current_stock.to_string()]);
    table.print();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_needs_exactly_one_source() {
        assert!(read_body(None, None).is_err());
        assert!(read_body(Some("{}".into()), Some("x.json".into())).is_err());
        assert!(read_body(Some("[1]".into()), None).is_err());
        assert!(read_body(Some("{oops".into()), None).is_err());
        assert_eq!(read_body(Some(r#"{"name":"Asha"}"#.into()), None).unwrap(), json!({"name": "Asha"}));
    }

    #[test]
    fn body_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, r#"{"name":"Meena","phone":"99"}"#).unwrap();
        let body = read_body(None, Some(path.to_string_lossy().to_string())).unwrap();
        assert_eq!(body["phone"], "99");
        assert!(read_body(None, Some(dir.path().join("missing.json").to_string_lossy().to_string())).is_err());
    }

    #[test]
    fn merge_overlays_top_level_keys() {
        let mut base = json!({"id": "3", "name": "Old", "phone": "1"});
        merge(&mut base, json!({"name": "New", "pan": "ABC"}));
        assert_eq!(base, json!({"id": "3", "name": "New", "phone": "1", "pan": "ABC"}));
    }
}
