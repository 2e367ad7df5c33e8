//! countriesnow.space-compatible geography client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use upline::geo::{City, Country, State};

use crate::geo::{GeoClient, GeoClientError};

/// Client for a countriesnow-style API.
#[derive(Debug, Clone)]
pub struct CountriesNowClient {
    base_url: String,
    http: Client,
}

impl CountriesNowClient {
    /// Create a client against `base_url`, e.g.
    /// `"https://countriesnow.space/api/v0.1"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GeoClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        decode(status.as_u16(), &body)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    error: bool,

    #[serde(default)]
    msg: String,

    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct WireCountry {
    country: String,

    #[serde(default)]
    iso2: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireStates {
    states: Vec<WireState>,
}

#[derive(Debug, Deserialize)]
struct WireState {
    name: String,
}

/// Unwrap a `{ error, msg, data }` envelope. The service reports lookup
/// failures with `error: true` and a non-2xx status alike.
fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, GeoClientError> {
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|error| {
        GeoClientError::UnexpectedResponse(format!("status {status}: {error}"))
    })?;

    if envelope.error || !(200..300).contains(&status) {
        return Err(GeoClientError::Service(envelope.msg));
    }

    envelope
        .data
        .ok_or_else(|| GeoClientError::UnexpectedResponse("missing data".to_string()))
}

#[async_trait]
impl GeoClient for CountriesNowClient {
    async fn countries(&self) -> Result<Vec<Country>, GeoClientError> {
        debug!("fetching countries");

        let data: Vec<WireCountry> = self.fetch(self.http.get(self.url("countries"))).await?;

        Ok(data
            .into_iter()
            .map(|country| Country {
                name: country.country,
                iso2: country.iso2.filter(|iso2| !iso2.is_empty()),
            })
            .collect())
    }

    async fn states(&self, country: &str) -> Result<Vec<State>, GeoClientError> {
        debug!(country, "fetching states");

        let request = self
            .http
            .post(self.url("countries/states"))
            .json(&serde_json::json!({ "country": country }));

        let data: WireStates = self.fetch(request).await?;

        Ok(data
            .states
            .into_iter()
            .map(|state| State {
                name: state.name,
                country: country.to_string(),
            })
            .collect())
    }

    async fn cities(&self, country: &str, state: &str) -> Result<Vec<City>, GeoClientError> {
        debug!(country, state, "fetching cities");

        let request = self
            .http
            .post(self.url("countries/state/cities"))
            .json(&serde_json::json!({ "country": country, "state": state }));

        let data: Vec<String> = self.fetch(request).await?;

        Ok(data
            .into_iter()
            .map(|name| City {
                name,
                state: state.to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_country_envelope() -> TestResult {
        let data: Vec<WireCountry> = decode(
            200,
            r#"{"error":false,"msg":"countries retrieved","data":[{"country":"Nigeria","iso2":"NG","iso3":"NGA","cities":[]}]}"#,
        )?;

        assert_eq!(data.first().map(|c| c.country.as_str()), Some("Nigeria"));

        Ok(())
    }

    #[test]
    fn service_errors_carry_msg() {
        let result: Result<Vec<String>, _> =
            decode(404, r#"{"error":true,"msg":"state not found"}"#);

        assert!(matches!(result, Err(GeoClientError::Service(msg)) if msg == "state not found"));
    }

    #[test]
    fn garbage_is_unexpected() {
        let result: Result<Vec<String>, _> = decode(502, "<html>Bad Gateway</html>");

        assert!(matches!(result, Err(GeoClientError::UnexpectedResponse(_))));
    }
}
