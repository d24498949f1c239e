//! Transit route queries.
//!
//! `RouteQueryClient` is the thin mapping between a transit question
//! ("from A to B, leaving then") and normalised `Itinerary` records.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{Itinerary, LocationCandidate};

use super::client::{DepartAt, DirectionsApi, DirectionsRequest};
use super::convert::convert_routes;
use super::error::DirectionsError;

/// Error from a transit route query.
#[derive(Debug, thiserror::Error)]
pub enum RouteQueryError {
    /// The provider returned zero candidate routes
    #[error("no routes found")]
    NoRoutesFound,

    /// Transport, parsing or API failure talking to the provider
    #[error("directions provider error: {0}")]
    Provider(#[source] DirectionsError),
}

impl From<DirectionsError> for RouteQueryError {
    fn from(err: DirectionsError) -> Self {
        match err {
            DirectionsError::ZeroResults => RouteQueryError::NoRoutesFound,
            other => RouteQueryError::Provider(other),
        }
    }
}

/// Trait for providing transit itineraries.
///
/// This abstraction allows the aggregator to be tested with mock data.
#[async_trait]
pub trait RouteSource: Send + Sync {
    /// Itineraries from `origin` to `destination` leaving at `depart_at`.
    ///
    /// With `alternatives` false the provider is asked for its single best
    /// route. Results are in provider order.
    async fn query_transit_routes(
        &self,
        origin: &LocationCandidate,
        destination: &LocationCandidate,
        depart_at: DepartAt,
        alternatives: bool,
    ) -> Result<Vec<Itinerary>, RouteQueryError>;
}

/// Route source backed by a directions API.
#[derive(Debug, Clone)]
pub struct RouteQueryClient<A> {
    api: A,
}

impl<A: DirectionsApi> RouteQueryClient<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Access the underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: DirectionsApi> RouteSource for RouteQueryClient<A> {
    async fn query_transit_routes(
        &self,
        origin: &LocationCandidate,
        destination: &LocationCandidate,
        depart_at: DepartAt,
        alternatives: bool,
    ) -> Result<Vec<Itinerary>, RouteQueryError> {
        let request =
            DirectionsRequest::transit(origin.clone(), destination.clone(), depart_at, alternatives);

        let response = self.api.directions(&request).await?;

        if response.routes.is_empty() {
            return Err(RouteQueryError::NoRoutesFound);
        }

        let itineraries = convert_routes(&response.routes);
        debug!(
            candidates = response.routes.len(),
            itineraries = itineraries.len(),
            depart_at = %depart_at.as_param(),
            "transit query"
        );

        Ok(itineraries)
    }
}
