//! Drives a cascade against a [`GeoClient`].

use std::sync::Arc;

use tracing::{error, warn};

use upline::geo::{
    Applied, Cascade, FetchTicket, GeoError, GeoFetchError, GeoLevel, GeoPayload,
};

use crate::geo::GeoClient;

/// Issues the fetch each cascade transition asks for and applies the result
/// through the ticket guard.
#[derive(Clone)]
pub struct GeoResolver {
    client: Arc<dyn GeoClient>,
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver").finish_non_exhaustive()
    }
}

impl GeoResolver {
    /// Create a resolver over `client`.
    #[must_use]
    pub fn new(client: Arc<dyn GeoClient>) -> Self {
        Self { client }
    }

    /// Fetch the options `ticket` asks for. Failures are reduced to one
    /// message per level; the cause is logged.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoFetchError`] if the lookup fails or the ticket lacks the
    /// parent selection its level needs.
    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<GeoPayload, GeoFetchError> {
        let level = ticket.level();

        let result = match (level, ticket.country(), ticket.state()) {
            (GeoLevel::Countries, _, _) => {
                self.client.countries().await.map(GeoPayload::Countries)
            }
            (GeoLevel::States, Some(country), _) => {
                self.client.states(country).await.map(GeoPayload::States)
            }
            (GeoLevel::Cities, Some(country), Some(state)) => self
                .client
                .cities(country, state)
                .await
                .map(GeoPayload::Cities),
            (GeoLevel::States | GeoLevel::Cities, _, _) => {
                return Err(GeoFetchError(format!("select a parent to load {level}")));
            }
        };

        result.map_err(|cause| {
            error!(%level, error = %cause, "geography lookup failed");

            GeoFetchError(format!("could not load {level}, please try again"))
        })
    }

    /// Fetch for `ticket` and apply the result to `cascade`.
    pub async fn resolve<C: Cascade + ?Sized>(
        &self,
        cascade: &mut C,
        ticket: &FetchTicket,
    ) -> Applied {
        let result = self.fetch(ticket).await;

        let applied = cascade.apply(ticket, result);

        if applied == Applied::Stale {
            warn!(level = %ticket.level(), "discarding stale geography response");
        }

        applied
    }

    /// Load the country list into `cascade`.
    pub async fn load_countries<C: Cascade + ?Sized>(&self, cascade: &mut C) -> Applied {
        let ticket = cascade.load_countries();

        self.resolve(cascade, &ticket).await
    }

    /// Select a country and load its states.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoError`] if the selection is rejected.
    pub async fn select_country<C: Cascade + ?Sized>(
        &self,
        cascade: &mut C,
        name: &str,
    ) -> Result<Applied, GeoError> {
        let ticket = cascade.select_country(name)?;

        Ok(self.resolve(cascade, &ticket).await)
    }

    /// Select a state and load its cities.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoError`] if the selection is rejected.
    pub async fn select_state<C: Cascade + ?Sized>(
        &self,
        cascade: &mut C,
        name: &str,
    ) -> Result<Applied, GeoError> {
        let ticket = cascade.select_state(name)?;

        Ok(self.resolve(cascade, &ticket).await)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use upline::geo::{City, Country, GeoCascade, SliceStatus, State};

    use super::*;
    use crate::geo::{GeoClientError, MockGeoClient};

    fn nigeria() -> Vec<Country> {
        vec![
            Country {
                name: "Nigeria".to_string(),
                iso2: Some("NG".to_string()),
            },
            Country {
                name: "Ghana".to_string(),
                iso2: Some("GH".to_string()),
            },
        ]
    }

    #[tokio::test]
    async fn resolves_the_full_cascade() -> TestResult {
        let mut client = MockGeoClient::new();

        client
            .expect_countries()
            .once()
            .return_once(|| Ok(nigeria()));
        client
            .expect_states()
            .once()
            .withf(|country| country == "Nigeria")
            .return_once(|_| {
                Ok(vec![State {
                    name: "Lagos".to_string(),
                    country: "Nigeria".to_string(),
                }])
            });
        client
            .expect_cities()
            .once()
            .withf(|country, state| country == "Nigeria" && state == "Lagos")
            .return_once(|_, _| {
                Ok(vec![City {
                    name: "Ikeja".to_string(),
                    state: "Lagos".to_string(),
                }])
            });

        let resolver = GeoResolver::new(Arc::new(client));
        let mut cascade = GeoCascade::new();

        assert_eq!(resolver.load_countries(&mut cascade).await, Applied::Applied);
        assert_eq!(
            resolver.select_country(&mut cascade, "nigeria").await?,
            Applied::Applied
        );
        assert_eq!(
            resolver.select_state(&mut cascade, "Lagos").await?,
            Applied::Applied
        );

        cascade.select_city("Ikeja")?;

        assert_eq!(cascade.cities().selected(), Some("Ikeja"));
        assert_eq!(cascade.calling_code().as_deref(), Some("+234"));

        Ok(())
    }

    #[tokio::test]
    async fn failed_city_lookup_keeps_states() -> TestResult {
        let mut client = MockGeoClient::new();

        client
            .expect_countries()
            .once()
            .return_once(|| Ok(nigeria()));
        client.expect_states().once().return_once(|_| {
            Ok(vec![State {
                name: "Lagos".to_string(),
                country: "Nigeria".to_string(),
            }])
        });
        client
            .expect_cities()
            .once()
            .return_once(|_, _| Err(GeoClientError::Service("state not found".to_string())));

        let resolver = GeoResolver::new(Arc::new(client));
        let mut cascade = GeoCascade::new();

        resolver.load_countries(&mut cascade).await;
        resolver.select_country(&mut cascade, "Nigeria").await?;
        resolver.select_state(&mut cascade, "Lagos").await?;

        assert!(matches!(cascade.cities().status(), SliceStatus::Failed(_)));
        assert_eq!(cascade.states().selected(), Some("Lagos"));
        assert_eq!(cascade.states().options().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn late_state_response_is_stale() -> TestResult {
        let mut client = MockGeoClient::new();

        client
            .expect_countries()
            .once()
            .return_once(|| Ok(nigeria()));
        client.expect_states().times(2).returning(|country| {
            Ok(vec![State {
                name: format!("{country} Capital"),
                country: country.to_string(),
            }])
        });

        let resolver = GeoResolver::new(Arc::new(client));
        let mut cascade = GeoCascade::new();

        resolver.load_countries(&mut cascade).await;

        let nigeria_ticket = cascade.select_country("Nigeria")?;

        assert_eq!(
            resolver.select_country(&mut cascade, "Ghana").await?,
            Applied::Applied
        );
        assert_eq!(
            resolver.resolve(&mut cascade, &nigeria_ticket).await,
            Applied::Stale
        );
        assert_eq!(
            cascade
                .states()
                .options()
                .iter()
                .map(|state| state.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Ghana Capital"]
        );

        Ok(())
    }
}
