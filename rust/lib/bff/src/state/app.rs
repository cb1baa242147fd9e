//! App shell state: route, toast, company banner.

use serde::Serialize;
use stockdesk_core::currency::{company_symbol, format_amount, DEFAULT_CURRENCY};
use stockdesk_core::Company;

/// Current route. Stored at `app/route`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppRoute(pub String);

impl AppRoute {
    pub const PATH: &'static str = "app/route";
    pub const LOGIN: &'static str = "/login";
    pub const HOME: &'static str = "/home";

    pub fn login() -> Self {
        Self(Self::LOGIN.into())
    }

    pub fn home() -> Self {
        Self(Self::HOME.into())
    }

    pub fn is_login(&self) -> bool {
        self.0 == Self::LOGIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// Latest notification. Stored at `app/toast`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub const PATH: &'static str = "app/toast";

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ToastKind::Error
    }
}

/// Header banner for the selected company. Stored at `app/company`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyBanner {
    pub name: String,
    pub currency: String,
    pub symbol: String,
}

impl CompanyBanner {
    pub const PATH: &'static str = "app/company";

    pub fn from_company(company: Option<&Company>) -> Self {
        let currency = company
            .map(|c| c.currency.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        Self {
            name: company.map(|c| c.name.clone()).unwrap_or_default(),
            currency,
            symbol: company_symbol(company),
        }
    }

    pub fn format(&self, amount: f64) -> String {
        format_amount(&self.symbol, amount)
    }
}

/// Written after every session storage change. Stored at `storage/changed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChanged {
    pub key: String,
}

impl StorageChanged {
    pub const PATH: &'static str = "storage/changed";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_defaults_to_rupee() {
        let banner = CompanyBanner::from_company(None);
        assert_eq!(banner.currency, "INR");
        assert_eq!(banner.format(1250.5), "₹1250.50");
    }

    #[test]
    fn banner_uses_company_currency() {
        let company = Company { id: "1".into(), name: "Acme".into(), currency: "usd".into() };
        let banner = CompanyBanner::from_company(Some(&company));
        assert_eq!(banner.name, "Acme");
        assert_eq!(banner.currency, "USD");
        assert_eq!(banner.format(3.0), "$3.00");
    }

    #[test]
    fn toast_kinds() {
        assert!(Toast::error("boom").is_error());
        assert!(!Toast::success("ok").is_error());
    }
}
