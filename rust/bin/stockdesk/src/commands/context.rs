//! Context management commands.

use std::path::Path;

use anyhow::Result;
use stockdesk_core::User;

use crate::config::{ClientConfig, Context};
use crate::render::{Output, Table};

/// Register a backend under `name`. The first context becomes current.
pub fn create(name: &str, server: &str, page_size: Option<usize>, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    if config.get(name).is_some() {
        anyhow::bail!("Context \"{}\" already exists. Use `stockdesk context set {}` to change it.", name, name);
    }
    let server = normalize_server(server)?;
    config.upsert_context(Context { page_size, ..Context::new(name, server.clone()) });
    if config.current_context.is_empty() {
        config.current_context = name.to_string();
    }
    config.save(config_path)?;

    println!("Context \"{}\" created.", name);
    println!("  Server: {}", server);
    Ok(())
}

/// List all contexts.
pub fn list(output: Output, config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;

    if output == Output::Json {
        let rows: Vec<_> = config
            .contexts
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "server": c.server,
                    "current": c.name == config.current_context,
                    "logged_in": c.is_logged_in(),
                })
            })
            .collect();
        return crate::render::print_json(&rows);
    }

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!("Run: stockdesk context create <name> --server <url>");
        return Ok(());
    }

    let mut table = Table::new(&["", "NAME", "SERVER", "USER"]);
    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context { "*" } else { "" };
        let server = if ctx.server.is_empty() { "-" } else { &ctx.server };
        table.row(vec![marker.to_string(), ctx.name.clone(), server.to_string(), signed_in_as(ctx)]);
    }
    table.print();
    Ok(())
}

fn signed_in_as(ctx: &Context) -> String {
    if !ctx.is_logged_in() {
        return "-".to_string();
    }
    serde_json::from_str::<User>(&ctx.user)
        .ok()
        .map(|u| if u.email.is_empty() { u.name } else { u.email })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "(logged in)".to_string())
}

/// Set properties on a context.
pub fn set(name: &str, server: Option<&str>, page_size: Option<usize>, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    let ctx = config
        .get_mut(name)
        .ok_or_else(|| anyhow::anyhow!("Context \"{}\" not found.", name))?;

    if let Some(server) = server {
        let server = normalize_server(server)?;
        if server != ctx.server {
            // A token from one backend means nothing to another.
            ctx.token.clear();
            ctx.user.clear();
            ctx.selected_company.clear();
        }
        ctx.server = server;
    }
    if let Some(size) = page_size {
        if size == 0 {
            anyhow::bail!("Page size must be at least 1.");
        }
        ctx.page_size = Some(size);
    }

    config.save(config_path)?;
    println!("Context \"{}\" updated.", name);
    Ok(())
}

/// Delete a context.
pub fn delete(name: &str, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    if !config.remove_context(name) {
        anyhow::bail!("Context \"{}\" not found.", name);
    }
    config.save(config_path)?;
    println!("Context \"{}\" deleted.", name);
    Ok(())
}

/// Switch current context.
pub fn use_context(name: &str, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;

    if config.get(name).is_none() {
        anyhow::bail!("Context \"{}\" not found. Run `stockdesk context list` to see available contexts.", name);
    }

    config.current_context = name.to_string();
    config.save(config_path)?;
    println!("Switched to context \"{}\".", name);
    Ok(())
}

fn normalize_server(server: &str) -> Result<String> {
    let server = server.trim().trim_end_matches('/');
    if !(server.starts_with("http://") || server.starts_with("https://")) {
        anyhow::bail!("Server URL must start with http:// or https:// (got \"{}\").", server);
    }
    Ok(server.to_string())
}
