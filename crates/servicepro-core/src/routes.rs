use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// A computed route between two points, as returned by the routing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub distance_m: f64,
    pub duration_s: f64,
    /// Polyline from origin to destination.
    pub geometry: Vec<LatLng>,
    /// Turn-by-turn instructions in travel order.
    pub instructions: Vec<String>,
}

impl Route {
    #[must_use]
    pub fn first_instruction(&self) -> Option<&str> {
        self.instructions.first().map(String::as_str)
    }
}
