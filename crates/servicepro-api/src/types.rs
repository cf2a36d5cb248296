//! Wire types for the ServicePro REST API.
//!
//! ## Observed shape of `GET /api/shops`
//!
//! ### Ids
//! Shop and user ids come back as JSON numbers from the Postgres-backed
//! deployment but as strings from older revisions. Both are accepted and kept
//! as strings.
//!
//! ### Owner
//! The column is `owner_id`; the create/update body uses `ownerId`. Both
//! spellings are accepted on read.
//!
//! ### Numeric fields
//! `lat`, `lng` and `rating` are `NUMERIC` columns and are frequently
//! serialized as strings (`"31.4880"`). They are coerced to `f64`. A missing or
//! `null` rating means the shop has not been rated yet and becomes `0`.
//!
//! ### Text fields
//! `phone`, `address` and `description` may be `null`; they become empty
//! strings.

use serde::{Deserialize, Serialize};
use servicepro_core::{
    CurrentUser, Provider, ProviderId, Review, Role, ServiceKind, ShopDraft, UserId,
};

/// A JSON value that should be a number but may arrive as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    /// Coerces to `f64`, returning `None` for text that is not a finite number.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            IdValue::Number(n) => n.to_string(),
            IdValue::Text(s) => s,
        }
    }
}

/// One row of `GET /api/shops`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopRecord {
    pub id: IdValue,
    #[serde(default, alias = "ownerId")]
    pub owner_id: Option<IdValue>,
    pub name: String,
    pub service: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub lat: NumberOrText,
    pub lng: NumberOrText,
    #[serde(default)]
    pub rating: Option<NumberOrText>,
    #[serde(default)]
    pub reviews: Option<Vec<ReviewRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRecord {
    #[serde(alias = "username")]
    pub author: String,
    pub rating: NumberOrText,
    #[serde(default)]
    pub text: Option<String>,
}

impl ShopRecord {
    /// Converts the wire record into a domain [`Provider`].
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `lat` or `lng` is not a number.
    pub fn into_provider(self) -> Result<Provider, String> {
        let id = self.id.into_string();
        let lat = self
            .lat
            .to_f64()
            .ok_or_else(|| format!("shop {id}: lat {:?} is not a number", self.lat))?;
        let lng = self
            .lng
            .to_f64()
            .ok_or_else(|| format!("shop {id}: lng {:?} is not a number", self.lng))?;
        let rating = self
            .rating
            .as_ref()
            .and_then(NumberOrText::to_f64)
            .unwrap_or(0.0)
            .clamp(0.0, 5.0);
        let reviews = self
            .reviews
            .unwrap_or_default()
            .into_iter()
            .filter_map(ReviewRecord::into_review)
            .collect();

        Ok(Provider {
            id: ProviderId(id),
            owner_id: self.owner_id.map(|o| UserId(o.into_string())),
            name: self.name,
            service: ServiceKind::from(self.service),
            phone: self.phone.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            lat,
            lng,
            rating,
            reviews,
        })
    }
}

impl ReviewRecord {
    fn into_review(self) -> Option<Review> {
        let stars = self.rating.to_f64()?.round();
        if !(1.0..=5.0).contains(&stars) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rating = stars as u8;
        Some(Review {
            author: self.author,
            rating,
            text: self.text.unwrap_or_default(),
        })
    }
}

/// Body of `POST /api/shops` and `PUT /api/shops/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopBody<'a> {
    pub owner_id: Option<&'a str>,
    pub name: &'a str,
    pub service: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub description: &'a str,
    pub lat: f64,
    pub lng: f64,
}

impl<'a> ShopBody<'a> {
    #[must_use]
    pub fn new(owner: Option<&'a UserId>, draft: &'a ShopDraft) -> Self {
        Self {
            owner_id: owner.map(|o| o.0.as_str()),
            name: &draft.name,
            service: draft.service.as_str(),
            phone: &draft.phone,
            address: &draft.address,
            description: &draft.description,
            lat: draft.location.lat,
            lng: draft.location.lng,
        }
    }
}

/// One row of `GET /api/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: IdValue,
    pub username: String,
    pub role: Role,
}

impl UserRecord {
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId(self.id.clone().into_string())
    }
}

/// Body of `POST /api/requests`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub provider_id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Password-recovery question and answer.
    pub question: String,
    pub answer: String,
}

/// `POST /api/login` and `POST /api/register` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionRecord {
    pub id: IdValue,
    pub username: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl From<SessionRecord> for CurrentUser {
    fn from(record: SessionRecord) -> Self {
        CurrentUser {
            id: UserId(record.id.into_string()),
            username: record.username,
            role: record.role.unwrap_or(Role::Customer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ShopRecord {
        serde_json::from_value(json).expect("record should deserialize")
    }

    #[test]
    fn string_coordinates_are_coerced() {
        let provider = record(serde_json::json!({
            "id": 4,
            "owner_id": 2,
            "name": "Bright Sparks",
            "service": "electrician",
            "lat": "31.4901",
            "lng": "74.3442",
            "rating": "4.5"
        }))
        .into_provider()
        .unwrap();

        assert_eq!(provider.id.as_str(), "4");
        assert_eq!(provider.owner_id, Some(UserId::from(2)));
        assert!((provider.lat - 31.4901).abs() < 1e-9);
        assert!((provider.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(provider.service, ServiceKind::Electrician);
    }

    #[test]
    fn missing_and_null_ratings_default_to_zero() {
        let absent = record(serde_json::json!({
            "id": "a", "name": "x", "service": "plumber", "lat": 31.0, "lng": 74.0
        }))
        .into_provider()
        .unwrap();
        let null = record(serde_json::json!({
            "id": "b", "name": "x", "service": "plumber", "lat": 31.0, "lng": 74.0,
            "rating": null, "description": null
        }))
        .into_provider()
        .unwrap();

        assert!(absent.rating.abs() < f64::EPSILON);
        assert!(null.rating.abs() < f64::EPSILON);
        assert_eq!(null.description, "");
    }

    #[test]
    fn camel_case_owner_is_accepted() {
        let provider = record(serde_json::json!({
            "id": 1, "ownerId": "9", "name": "x", "service": "carwash",
            "lat": 31.0, "lng": 74.0
        }))
        .into_provider()
        .unwrap();
        assert_eq!(provider.owner_id, Some(UserId::from("9")));
    }

    #[test]
    fn non_numeric_latitude_is_rejected() {
        let result = record(serde_json::json!({
            "id": 1, "name": "x", "service": "carwash", "lat": "n/a", "lng": 74.0
        }))
        .into_provider();
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_reviews_are_dropped() {
        let provider = record(serde_json::json!({
            "id": 1, "name": "x", "service": "plumber", "lat": 31.0, "lng": 74.0,
            "reviews": [
                {"author": "amna", "rating": 5, "text": "quick"},
                {"username": "omar", "rating": "9"}
            ]
        }))
        .into_provider()
        .unwrap();
        assert_eq!(provider.reviews.len(), 1);
        assert_eq!(provider.reviews[0].author, "amna");
    }

    #[test]
    fn shop_body_uses_camel_case_keys() {
        let draft = ShopDraft {
            name: "Pipe Pros".to_owned(),
            service: ServiceKind::Plumber,
            phone: "042".to_owned(),
            address: "Gulberg".to_owned(),
            description: String::new(),
            location: servicepro_core::LatLng::new(31.5, 74.35),
        };
        let owner = UserId::from(3);
        let json = serde_json::to_value(ShopBody::new(Some(&owner), &draft)).unwrap();
        assert_eq!(json["ownerId"], "3");
        assert_eq!(json["service"], "plumber");
        assert_eq!(json["lat"], 31.5);
    }
}
