//! Client for an OSRM-compatible routing service.
//!
//! Calls `GET {base}/route/v1/driving/{lng},{lat};{lng},{lat}` with GeoJSON
//! geometry and step output, and turns the first route into a
//! [`servicepro_core::Route`] with plain-English turn instructions.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use servicepro_core::{LatLng, Route};

use crate::error::RoutingError;

const PROFILE: &str = "driving";

pub struct OsrmClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// `[lng, lat]` pairs.
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    #[serde(default)]
    name: String,
    maneuver: Maneuver,
}

#[derive(Debug, Deserialize)]
struct Maneuver {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    modifier: Option<String>,
    #[serde(default)]
    bearing_after: Option<f64>,
}

impl OsrmClient {
    /// # Errors
    ///
    /// Returns [`RoutingError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`RoutingError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| RoutingError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    /// Computes a driving route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::Http`] on network failure or timeout.
    /// - [`RoutingError::NoRoute`] when OSRM answers with a non-`Ok` code or
    ///   no routes.
    /// - [`RoutingError::Deserialize`] if the body is not an OSRM response.
    pub async fn route(&self, from: LatLng, to: LatLng) -> Result<Route, RoutingError> {
        let url = self.route_url(from, to)?;
        tracing::debug!(%url, "requesting route");

        // OSRM reports NoRoute/InvalidQuery with a 400 and a JSON body, so the
        // body is decoded before looking at the status.
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: OsrmResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Deserialize {
                context: format!("route ({status}) {url}"),
                source: e,
            })?;

        if parsed.code != "Ok" {
            return Err(RoutingError::NoRoute {
                code: parsed.code,
                message: parsed.message.unwrap_or_default(),
            });
        }

        let first = parsed
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::NoRoute {
                code: "NoRoute".to_owned(),
                message: "routing service returned no routes".to_owned(),
            })?;

        Ok(into_route(first))
    }

    fn route_url(&self, from: LatLng, to: LatLng) -> Result<Url, RoutingError> {
        let path = format!(
            "route/v1/{PROFILE}/{},{};{},{}",
            from.lng, from.lat, to.lng, to.lat
        );
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| RoutingError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("steps", "true")
            .append_pair("geometries", "geojson");
        Ok(url)
    }
}

fn into_route(route: OsrmRoute) -> Route {
    let geometry = route
        .geometry
        .coordinates
        .iter()
        .map(|[lng, lat]| LatLng::new(*lat, *lng))
        .collect();
    let instructions = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .map(describe_step)
        .collect();
    Route {
        distance_m: route.distance,
        duration_s: route.duration,
        geometry,
        instructions,
    }
}

fn describe_step(step: &OsrmStep) -> String {
    let road = step.name.trim();
    let onto = |verb: &str| {
        if road.is_empty() {
            verb.to_owned()
        } else {
            format!("{verb} onto {road}")
        }
    };
    let modifier = step.maneuver.modifier.as_deref().unwrap_or("straight");

    match step.maneuver.kind.as_str() {
        "depart" => {
            let heading = step
                .maneuver
                .bearing_after
                .map_or("ahead", compass_direction);
            if road.is_empty() {
                format!("Head {heading}")
            } else {
                format!("Head {heading} on {road}")
            }
        }
        "arrive" => "You have arrived at your destination".to_owned(),
        "roundabout" | "rotary" => onto("Enter the roundabout and exit"),
        "continue" | "new name" => onto("Continue"),
        "merge" => onto("Merge"),
        "fork" => onto(&format!("Keep {modifier} at the fork")),
        "end of road" => onto(&format!("At the end of the road turn {modifier}")),
        _ if modifier == "straight" => onto("Continue straight"),
        _ if modifier == "uturn" => onto("Make a U-turn"),
        _ => onto(&format!("Turn {modifier}")),
    }
}

fn compass_direction(bearing: f64) -> &'static str {
    const NAMES: [&str; 8] = [
        "north",
        "northeast",
        "east",
        "southeast",
        "south",
        "southwest",
        "west",
        "northwest",
    ];
    let normalised = bearing.rem_euclid(360.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = ((normalised + 22.5) / 45.0) as usize % 8;
    NAMES[index]
}
