use std::path::PathBuf;

use crate::filter::FilterCriteria;
use crate::geo::LatLng;
use crate::geofence::GeofenceConstraint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub routing_base_url: String,
    /// Fixed origin of the geofence and of the display radius.
    pub map_center: LatLng,
    pub max_allowed_radius_km: f64,
    pub default_radius_km: f64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub session_path: PathBuf,
}

impl AppConfig {
    #[must_use]
    pub fn geofence(&self) -> GeofenceConstraint {
        GeofenceConstraint {
            center: self.map_center,
            max_radius_km: self.max_allowed_radius_km,
        }
    }

    /// Criteria shown on first load and after a view reset.
    #[must_use]
    pub fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria::with_radius(self.default_radius_km)
    }
}
