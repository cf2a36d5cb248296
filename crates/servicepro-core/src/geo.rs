//! Great-circle geometry on a spherical Earth.
//!
//! Map-scale accuracy only: the haversine formula on a 6 371 km sphere is
//! within a few metres of the ellipsoidal answer at city distances.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `lat` is outside `[-90, 90]`,
    /// `lng` is outside `[-180, 180]`, or either value is NaN/infinite.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, String> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(format!("latitude {lat} is outside [-90, 90]"));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(format!("longitude {lng} is outside [-180, 180]"));
        }
        Ok(Self { lat, lng })
    }

    #[must_use]
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        distance_meters(*self, *other)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// Haversine distance between two coordinates, in metres.
#[must_use]
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    // Clamp guards against h drifting a hair above 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = LatLng::new(31.488, 74.343);
        assert!(distance_meters(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = LatLng::new(31.488, 74.343);
        let b = LatLng::new(31.60, 74.45);
        assert!((distance_meters(a, b) - distance_meters(b, a)).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_meters(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn lahore_center_to_nearby_shop() {
        let center = LatLng::new(31.4880, 74.3430);
        let d = distance_meters(center, LatLng::new(31.50, 74.35));
        assert!(d > 1_300.0 && d < 1_700.0, "got {d}");
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = distance_meters(LatLng::new(0.0, 0.0), LatLng::new(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1.0);
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(LatLng::try_new(91.0, 0.0).is_err());
        assert!(LatLng::try_new(0.0, -181.0).is_err());
        assert!(LatLng::try_new(f64::NAN, 0.0).is_err());
        assert!(LatLng::try_new(31.5, 74.3).is_ok());
    }
}
