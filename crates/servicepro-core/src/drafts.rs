use serde::{Deserialize, Serialize};

use crate::geo::LatLng;
use crate::geofence::{validate_location, GeofenceConstraint, ValidationError};
use crate::providers::{Provider, ServiceKind};

/// The add/edit shop form as the user left it.
///
/// Coordinates stay as text until submission so that picker-filled and
/// hand-typed values take the same validation path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopForm {
    pub name: String,
    pub service: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub lat: String,
    pub lng: String,
}

impl ShopForm {
    /// Pre-fills the form for editing an existing shop.
    #[must_use]
    pub fn from_provider(provider: &Provider) -> Self {
        Self {
            name: provider.name.clone(),
            service: provider.service.to_string(),
            phone: provider.phone.clone(),
            address: provider.address.clone(),
            description: provider.description.clone(),
            lat: provider.lat.to_string(),
            lng: provider.lng.to_string(),
        }
    }

    pub fn set_location(&mut self, at: LatLng) {
        self.lat = at.lat.to_string();
        self.lng = at.lng.to_string();
    }

    /// Validates the form into a [`ShopDraft`] ready for persistence.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank name or service,
    /// or any coordinate/geofence error from [`validate_location`].
    pub fn validate(&self, geofence: &GeofenceConstraint) -> Result<ShopDraft, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.service.trim().is_empty() {
            return Err(ValidationError::MissingField("service"));
        }
        let location = validate_location(&self.lat, &self.lng, geofence)?;
        Ok(ShopDraft {
            name: self.name.trim().to_owned(),
            service: ServiceKind::from(self.service.as_str()),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            description: self.description.trim().to_owned(),
            location,
        })
    }
}

/// A validated shop, guaranteed to lie inside the geofence it was checked
/// against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopDraft {
    pub name: String,
    pub service: ServiceKind,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub location: LatLng,
}
