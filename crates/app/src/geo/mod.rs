//! Geography service
//!
//! Country, state and city lookups feeding the cascade in [`upline::geo`].

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use upline::geo::{City, Country, State};

mod countries_now;
mod resolver;

pub use countries_now::CountriesNowClient;
pub use resolver::GeoResolver;

/// Errors that can occur when talking to the geography service.
#[derive(Debug, Error)]
pub enum GeoClientError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with `error: true`.
    #[error("geography service error: {0}")]
    Service(String),

    /// The service answered with an unexpected body.
    #[error("unexpected response from geography service: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait GeoClient: Send + Sync {
    /// Every country.
    async fn countries(&self) -> Result<Vec<Country>, GeoClientError>;

    /// States of `country`.
    async fn states(&self, country: &str) -> Result<Vec<State>, GeoClientError>;

    /// Cities of `state` in `country`.
    async fn cities(&self, country: &str, state: &str) -> Result<Vec<City>, GeoClientError>;
}
