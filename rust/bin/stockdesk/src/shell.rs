//! One command's view of the app: a Flux with every screen handler
//! registered, bound to the current context.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use stockdesk_bff::request::InitializeReq;
use stockdesk_bff::state::{AppRoute, CompanyBanner, Toast};
use stockdesk_bff::{bootstrap, Settings};
use stockdesk_core::listing::DEFAULT_PAGE_SIZE;
use stockdesk_flux::Flux;

use crate::config::{ClientConfig, ContextStorage};
use crate::render::Output;

pub struct Shell {
    flux: Flux,
    output: Output,
}

impl Shell {
    /// Open the current context and restore its session.
    pub async fn open(config_path: &Path, output: Output, page_size: Option<usize>) -> Result<Self> {
        let config = ClientConfig::load(config_path)?;
        let current = config
            .current()
            .ok_or_else(|| anyhow!("No current context. Run `stockdesk context create <name> --server <url>`."))?;
        if current.server.is_empty() {
            bail!(
                "No server URL set for context \"{}\". Run `stockdesk context set {} --server <url>`.",
                current.name,
                current.name
            );
        }

        let settings = Settings {
            page_size: page_size.or(current.page_size).unwrap_or(DEFAULT_PAGE_SIZE),
            // Arguments arrive whole; there is no typing to wait out.
            search_debounce: Duration::ZERO,
            ..Settings::default()
        };
        let storage = Arc::new(ContextStorage::new(config_path, current.name.clone()));
        let (flux, _) = bootstrap(&current.server, storage, settings);
        flux.emit(InitializeReq::PATH, InitializeReq).await;
        Ok(Self { flux, output })
    }

    pub fn output(&self) -> Output {
        self.output
    }

    pub fn get<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.flux.get_as(path)
    }

    pub fn banner(&self) -> CompanyBanner {
        self.get(CompanyBanner::PATH)
            .unwrap_or_else(|| CompanyBanner::from_company(None))
    }

    pub fn is_logged_in(&self) -> bool {
        !self.get::<AppRoute>(AppRoute::PATH).is_some_and(|route| route.is_login())
    }

    pub fn require_login(&self) -> Result<()> {
        if !self.is_logged_in() {
            bail!("Not logged in. Run `stockdesk login`.");
        }
        Ok(())
    }

    /// Emit a request and wait for its handlers. A success toast goes to
    /// stderr; an error toast becomes the command's error.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, req: T) -> Result<()> {
        self.flux.store().remove(Toast::PATH);
        self.flux.emit(path, req).await;
        match self.get::<Toast>(Toast::PATH) {
            Some(toast) if toast.is_error() => bail!("{}", toast.message),
            Some(toast) => {
                eprintln!("{}", toast.message);
                Ok(())
            }
            None => Ok(()),
        }
    }
}
