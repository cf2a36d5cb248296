//! Creation-time geofence: how far a new or edited shop may sit from the map
//! center.
//!
//! This bound is independent of the display radius in
//! [`FilterCriteria`](crate::FilterCriteria); widening the search circle never
//! widens what may be created.

use thiserror::Error;

use crate::geo::{distance_meters, LatLng};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("location is required: pick a point on the map or enter coordinates")]
    MissingCoordinates,

    #[error("invalid {field}: {reason}")]
    InvalidCoordinate { field: &'static str, reason: String },

    #[error("location is {actual_m:.0} m from the map center; maximum allowed is {max_m:.0} m")]
    OutsideGeofence { actual_m: f64, max_m: f64 },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceConstraint {
    pub center: LatLng,
    pub max_radius_km: f64,
}

impl GeofenceConstraint {
    #[must_use]
    pub fn max_meters(&self) -> f64 {
        self.max_radius_km * 1000.0
    }

    /// Accepts `candidate` iff it lies within the radius (boundary inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutsideGeofence`] with the actual and
    /// maximum distances when the candidate is too far from the center.
    pub fn check(&self, candidate: LatLng) -> Result<(), ValidationError> {
        let actual_m = distance_meters(candidate, self.center);
        let max_m = self.max_meters();
        if actual_m > max_m {
            return Err(ValidationError::OutsideGeofence { actual_m, max_m });
        }
        Ok(())
    }
}

/// Parses typed or picker-filled coordinate text and applies the geofence.
///
/// Both entry paths funnel through here, so a hand-typed coordinate gets
/// exactly the same check as one captured from a map click.
///
/// # Errors
///
/// - [`ValidationError::MissingCoordinates`] when either field is blank.
/// - [`ValidationError::InvalidCoordinate`] when a field does not parse or is
///   out of range.
/// - [`ValidationError::OutsideGeofence`] when the point is too far out.
pub fn validate_location(
    lat: &str,
    lng: &str,
    constraint: &GeofenceConstraint,
) -> Result<LatLng, ValidationError> {
    if lat.trim().is_empty() || lng.trim().is_empty() {
        return Err(ValidationError::MissingCoordinates);
    }
    let lat = parse_degrees("latitude", lat)?;
    let lng = parse_degrees("longitude", lng)?;
    let candidate = LatLng::try_new(lat, lng).map_err(|reason| ValidationError::InvalidCoordinate {
        field: "coordinate",
        reason,
    })?;
    constraint.check(candidate)?;
    Ok(candidate)
}

fn parse_degrees(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| ValidationError::InvalidCoordinate {
            field,
            reason: e.to_string(),
        })
}
