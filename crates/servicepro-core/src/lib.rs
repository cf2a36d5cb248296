pub mod app_config;
pub mod config;
pub mod drafts;
pub mod filter;
pub mod geo;
pub mod geofence;
pub mod providers;
pub mod routes;
pub mod users;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use drafts::{ShopDraft, ShopForm};
pub use filter::{apply, FilterCriteria, ServiceFilter};
pub use geo::{distance_meters, LatLng};
pub use geofence::{validate_location, GeofenceConstraint, ValidationError};
pub use providers::{Provider, ProviderId, Review, ServiceKind};
pub use routes::Route;
pub use users::{CurrentUser, Role, UserId};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
