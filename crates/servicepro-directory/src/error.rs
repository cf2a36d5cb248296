use servicepro_api::ApiError;
use servicepro_core::{ProviderId, ValidationError};
use thiserror::Error;

use crate::routing::GeolocationError;
use crate::store::FetchError;

/// Everything that can go wrong while handling a user intent.
///
/// None of these escape [`Directory::dispatch`](crate::Directory::dispatch);
/// they are turned into a [`Notice`](crate::Notice) for the user.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The shop list could not be loaded; the directory is offline.
    #[error("shop directory is offline: {0}")]
    Offline(#[from] FetchError),

    /// A create/update/delete call failed at the remote collection.
    #[error("request failed: {0}")]
    Remote(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("permission denied: {0}")]
    Permission(&'static str),

    #[error("unable to get your location: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("unable to compute a route: {0}")]
    Routing(String),

    #[error("no shop with id {0}")]
    NotFound(ProviderId),
}

impl DirectoryError {
    /// Short text for a toast or status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DirectoryError::Offline(_) => {
                "Could not load shops. The directory is offline; try refreshing.".to_owned()
            }
            DirectoryError::Remote(ApiError::Status { message, .. }) => message.clone(),
            DirectoryError::Remote(e) if e.is_unreachable() => {
                "The server could not be reached.".to_owned()
            }
            DirectoryError::Permission(reason) => format!("Not allowed: {reason}."),
            other => other.to_string(),
        }
    }
}
