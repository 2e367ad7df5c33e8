//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use thiserror::Error;

use upline::money;

use crate::{
    gateway::{Gateway, GatewayConfig, HttpGateway},
    geo::{CountriesNowClient, GeoClient, GeoResolver},
    services::{AccountService, DashboardService, PackagesService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("unknown currency code `{0}`")]
    UnknownCurrency(String),
}

/// Where the remote services live.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// API base URL
    pub api_url: String,

    /// ISO code of the currency the API's amounts are in
    pub currency: String,

    /// Geography service base URL
    pub geo_url: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub currency: &'static Currency,
    pub account: AccountService,
    pub packages: PackagesService,
    pub dashboard: DashboardService,
    pub geo: GeoResolver,
}

impl AppContext {
    /// Build application context over the HTTP gateway and geography client.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured currency code is unknown.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let currency = money::currency(&settings.currency)
            .ok_or_else(|| AppInitError::UnknownCurrency(settings.currency.clone()))?;

        let gateway = HttpGateway::new(GatewayConfig {
            base_url: settings.api_url.clone(),
            currency,
        });

        Ok(Self::new(
            currency,
            Arc::new(gateway),
            Arc::new(CountriesNowClient::new(settings.geo_url.clone())),
        ))
    }

    /// Build application context over the given gateway and geography client.
    #[must_use]
    pub fn new(
        currency: &'static Currency,
        gateway: Arc<dyn Gateway>,
        geo: Arc<dyn GeoClient>,
    ) -> Self {
        Self {
            currency,
            account: AccountService::new(Arc::clone(&gateway)),
            packages: PackagesService::new(Arc::clone(&gateway)),
            dashboard: DashboardService::new(gateway),
            geo: GeoResolver::new(geo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_currency_is_rejected() {
        let result = AppContext::from_settings(&AppSettings {
            api_url: "http://localhost".to_string(),
            currency: "XYZ".to_string(),
            geo_url: "http://localhost".to_string(),
        });

        assert!(matches!(result, Err(AppInitError::UnknownCurrency(code)) if code == "XYZ"));
    }

    #[test]
    fn currency_code_is_case_insensitive() {
        let result = AppContext::from_settings(&AppSettings {
            api_url: "http://localhost".to_string(),
            currency: "ngn".to_string(),
            geo_url: "http://localhost".to_string(),
        });

        assert!(matches!(result, Ok(context) if context.currency.iso_alpha_code == "NGN"));
    }
}
