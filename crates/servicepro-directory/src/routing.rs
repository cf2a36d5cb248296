//! Route sessions: one at a time, with tickets so a slow answer for an
//! abandoned destination can never be drawn over the current one.

use servicepro_api::{OsrmClient, RoutingError};
use servicepro_core::{LatLng, ProviderId, Route};
use thiserror::Error;

use crate::sync::MapSurface;

/// Computes a driving route between two points.
#[allow(async_fn_in_trait)]
pub trait RouteService {
    async fn route(&self, from: LatLng, to: LatLng) -> Result<Route, RoutingError>;
}

impl RouteService for OsrmClient {
    async fn route(&self, from: LatLng, to: LatLng) -> Result<Route, RoutingError> {
        OsrmClient::route(self, from, to).await
    }
}

/// Resolves the user's current position.
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    async fn locate(&self) -> Result<LatLng, GeolocationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("timed out waiting for a position fix")]
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RouteState {
    Idle,
    Computing,
    Active(Route),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSession {
    pub ticket: RouteTicket,
    pub origin: LatLng,
    pub destination_id: ProviderId,
    pub destination: LatLng,
    pub state: RouteState,
}

/// What happened to a routing result handed to [`Router::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The ticket no longer matches the open session; nothing was drawn.
    Stale,
    Active(Route),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Router {
    next_ticket: u64,
    session: Option<RouteSession>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new session, tearing down any previous route overlay.
    pub fn begin<M: MapSurface>(
        &mut self,
        surface: &mut M,
        origin: LatLng,
        destination_id: ProviderId,
        destination: LatLng,
    ) -> RouteTicket {
        if self.session.take().is_some() {
            surface.clear_route();
        }
        self.next_ticket += 1;
        let ticket = RouteTicket(self.next_ticket);
        tracing::debug!(ticket = ticket.0, destination = %destination_id, "route session opened");
        self.session = Some(RouteSession {
            ticket,
            origin,
            destination_id,
            destination,
            state: RouteState::Computing,
        });
        ticket
    }

    /// Applies a routing result to the session it was requested for.
    pub fn resolve<M: MapSurface>(
        &mut self,
        surface: &mut M,
        ticket: RouteTicket,
        result: Result<Route, RoutingError>,
    ) -> RouteOutcome {
        let Some(session) = self.session.as_mut().filter(|s| s.ticket == ticket) else {
            tracing::debug!(ticket = ticket.0, "ignoring route for superseded session");
            return RouteOutcome::Stale;
        };

        match result {
            Ok(route) => {
                surface.draw_route(&route);
                surface.fit_bounds(session.origin, session.destination);
                tracing::info!(
                    ticket = ticket.0,
                    distance_m = route.distance_m,
                    duration_s = route.duration_s,
                    "route active"
                );
                session.state = RouteState::Active(route.clone());
                RouteOutcome::Active(route)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(ticket = ticket.0, error = %e, "routing failed");
                session.state = RouteState::Error(message.clone());
                RouteOutcome::Failed(message)
            }
        }
    }

    /// Destroys the session and its overlay.
    pub fn close<M: MapSurface>(&mut self, surface: &mut M) {
        if self.session.take().is_some() {
            surface.clear_route();
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&RouteSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> RouteState {
        self.session
            .as_ref()
            .map_or(RouteState::Idle, |s| s.state.clone())
    }
}
