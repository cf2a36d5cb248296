//! HTTP client for the ServicePro REST API.
//!
//! Wraps `reqwest` with base-URL handling, non-2xx error extraction and typed
//! response decoding. Every call is bounded by the configured timeout so a
//! stalled backend surfaces as [`ApiError::Http`] instead of hanging.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use servicepro_core::{CurrentUser, Provider, ProviderId, ShopDraft, UserId};

use crate::error::ApiError;
use crate::types::{
    Credentials, Registration, ServiceRequest, SessionRecord, ShopBody, ShopRecord, UserRecord,
};

/// Client for the ServicePro REST API.
///
/// Use [`ServiceProClient::new`] with the deployment's base URL; tests point
/// it at a wiremock server.
pub struct ServiceProClient {
    client: Client,
    base_url: Url,
}

impl ServiceProClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so relative joins append
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches every shop, coercing textual numeric fields.
    ///
    /// Records whose coordinates cannot be coerced are skipped with a
    /// warning rather than failing the whole listing.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or timeout.
    /// - [`ApiError::Status`] on a non-2xx response.
    /// - [`ApiError::Deserialize`] if the body is not a list of shops.
    pub async fn list_shops(&self) -> Result<Vec<Provider>, ApiError> {
        let records: Vec<ShopRecord> =
            Self::send_json(self.request(Method::GET, "api/shops")?, "GET /api/shops").await?;

        let providers = records
            .into_iter()
            .filter_map(|record| match record.into_provider() {
                Ok(provider) => Some(provider),
                Err(reason) => {
                    tracing::warn!(%reason, "skipping shop with unusable coordinates");
                    None
                }
            })
            .collect();
        Ok(providers)
    }

    /// Creates a shop owned by `owner`.
    ///
    /// # Errors
    ///
    /// See [`ServiceProClient::list_shops`].
    pub async fn create_shop(
        &self,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Provider, ApiError> {
        let request = self
            .request(Method::POST, "api/shops")?
            .json(&ShopBody::new(owner, draft));
        let record: ShopRecord = Self::send_json(request, "POST /api/shops").await?;
        record_to_provider(record)
    }

    /// Replaces a shop's fields.
    ///
    /// # Errors
    ///
    /// See [`ServiceProClient::list_shops`].
    pub async fn update_shop(
        &self,
        id: &ProviderId,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Provider, ApiError> {
        let path = format!("api/shops/{id}");
        let request = self
            .request(Method::PUT, &path)?
            .json(&ShopBody::new(owner, draft));
        let record: ShopRecord = Self::send_json(request, &format!("PUT /{path}")).await?;
        record_to_provider(record)
    }

    /// # Errors
    ///
    /// [`ApiError::Http`] or [`ApiError::Status`].
    pub async fn delete_shop(&self, id: &ProviderId) -> Result<(), ApiError> {
        Self::send_empty(self.request(Method::DELETE, &format!("api/shops/{id}"))?)
            .await
    }

    /// # Errors
    ///
    /// See [`ServiceProClient::list_shops`].
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        Self::send_json(self.request(Method::GET, "api/users")?, "GET /api/users")
            .await
    }

    /// # Errors
    ///
    /// [`ApiError::Http`] or [`ApiError::Status`].
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        Self::send_empty(self.request(Method::DELETE, &format!("api/users/{id}"))?)
            .await
    }

    /// Sends a service request to a provider.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] or [`ApiError::Status`].
    pub async fn submit_request(&self, request: &ServiceRequest) -> Result<(), ApiError> {
        Self::send_empty(self.request(Method::POST, "api/requests")?.json(request))
            .await
    }

    /// # Errors
    ///
    /// [`ApiError::Status`] carries the server's message for bad credentials.
    pub async fn login(&self, credentials: &Credentials) -> Result<CurrentUser, ApiError> {
        let request = self.request(Method::POST, "api/login")?.json(credentials);
        let session: SessionRecord = Self::send_json(request, "POST /api/login").await?;
        Ok(session.into())
    }

    /// # Errors
    ///
    /// [`ApiError::Status`] carries the server's message, e.g. a taken username.
    pub async fn register(&self, registration: &Registration) -> Result<CurrentUser, ApiError> {
        let request = self
            .request(Method::POST, "api/register")?
            .json(registration);
        let session: SessionRecord = Self::send_json(request, "POST /api/register").await?;
        Ok(session.into())
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        Ok(self.client.request(method, url))
    }

    async fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        check_status(response).await?;
        Ok(())
    }
}

fn record_to_provider(record: ShopRecord) -> Result<Provider, ApiError> {
    record.into_provider().map_err(ApiError::InvalidRecord)
}

/// Turns a non-2xx response into [`ApiError::Status`], preferring the JSON
/// body's `error` field as the message.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                body.trim().to_owned()
            }
        });
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
