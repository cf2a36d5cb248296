use serde::{Deserialize, Serialize};

use crate::geo::LatLng;
use crate::users::UserId;

/// Opaque shop identifier as assigned by the remote collection.
///
/// The API sends numeric ids; they are kept as strings so the directory
/// never does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(pub String);

impl ProviderId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<i64> for ProviderId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Kind of service a shop offers.
///
/// The well-known kinds come from the directory's service dropdown; anything
/// else the API sends is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceKind {
    Electrician,
    Plumber,
    Mechanic,
    Carwash,
    Other(String),
}

impl ServiceKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ServiceKind::Electrician => "electrician",
            ServiceKind::Plumber => "plumber",
            ServiceKind::Mechanic => "mechanic",
            ServiceKind::Carwash => "carwash",
            ServiceKind::Other(s) => s,
        }
    }
}

impl From<&str> for ServiceKind {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "electrician" => ServiceKind::Electrician,
            "plumber" => ServiceKind::Plumber,
            "mechanic" => ServiceKind::Mechanic,
            "carwash" | "car wash" => ServiceKind::Carwash,
            _ => ServiceKind::Other(s.trim().to_owned()),
        }
    }
}

impl From<String> for ServiceKind {
    fn from(s: String) -> Self {
        ServiceKind::from(s.as_str())
    }
}

impl From<ServiceKind> for String {
    fn from(kind: ServiceKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer review attached to exactly one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    /// Star rating, `1..=5`.
    pub rating: u8,
    pub text: String,
}

/// A service business with a fixed location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub owner_id: Option<UserId>,
    pub name: String,
    pub service: ServiceKind,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    /// Average rating in `[0, 5]`; `0` when the shop has no ratings yet.
    pub rating: f64,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Provider {
    #[must_use]
    pub fn location(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Whether `user_id` owns this shop.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id.as_ref() == Some(user_id)
    }
}
