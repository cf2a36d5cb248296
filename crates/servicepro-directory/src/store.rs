//! Authoritative in-memory shop collection, refreshed from the remote API.
//!
//! The store is the only writer of the provider list. Refreshes are
//! last-request-wins: every call takes a token from a monotonic counter, and a
//! completion is applied only if no newer refresh has already been applied.
//! The directory runs on a single-threaded event loop, so interior state is a
//! `RefCell` that is never borrowed across an `.await`.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use servicepro_api::{ApiError, ServiceProClient};
use servicepro_core::{Provider, ProviderId, ShopDraft, UserId};
use thiserror::Error;

/// The remote collection the store mirrors.
#[allow(async_fn_in_trait)]
pub trait ShopRepository {
    async fn list(&self) -> Result<Vec<Provider>, ApiError>;
    async fn create(&self, owner: Option<&UserId>, draft: &ShopDraft)
        -> Result<Provider, ApiError>;
    async fn update(
        &self,
        id: &ProviderId,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Provider, ApiError>;
    async fn delete(&self, id: &ProviderId) -> Result<(), ApiError>;
}

impl ShopRepository for ServiceProClient {
    async fn list(&self) -> Result<Vec<Provider>, ApiError> {
        self.list_shops().await
    }

    async fn create(
        &self,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Provider, ApiError> {
        self.create_shop(owner, draft).await
    }

    async fn update(
        &self,
        id: &ProviderId,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Provider, ApiError> {
        self.update_shop(id, owner, draft).await
    }

    async fn delete(&self, id: &ProviderId) -> Result<(), ApiError> {
        self.delete_shop(id).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// No refresh has completed yet.
    Loading,
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { count: usize },
    /// A newer refresh already landed; this result was dropped.
    Stale,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("shop list did not arrive within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A remote write that succeeded, with the refresh that followed it.
#[derive(Debug)]
pub struct Written<T> {
    pub value: T,
    pub refresh: Result<RefreshOutcome, FetchError>,
}

struct StoreState {
    providers: Vec<Provider>,
    status: StoreStatus,
    applied_token: u64,
}

pub struct ProviderStore<R> {
    repo: R,
    fetch_timeout: Duration,
    next_token: Cell<u64>,
    state: RefCell<StoreState>,
}

impl<R: ShopRepository> ProviderStore<R> {
    /// `fetch_timeout` bounds every `refresh`, on top of whatever the
    /// repository's own transport enforces.
    pub fn new(repo: R, fetch_timeout: Duration) -> Self {
        Self {
            repo,
            fetch_timeout,
            next_token: Cell::new(0),
            state: RefCell::new(StoreState {
                providers: Vec::new(),
                status: StoreStatus::Loading,
                applied_token: 0,
            }),
        }
    }

    /// Replaces the collection with the remote contents.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the fetch fails or times out. The store is
    /// then empty and [`StoreStatus::Offline`]. A failure that arrives after a
    /// newer refresh was applied is dropped as [`RefreshOutcome::Stale`].
    pub async fn refresh(&self) -> Result<RefreshOutcome, FetchError> {
        let token = self.next_token.get() + 1;
        self.next_token.set(token);

        let result = match tokio::time::timeout(self.fetch_timeout, self.repo.list()).await {
            Ok(Ok(providers)) => Ok(providers),
            Ok(Err(e)) => Err(FetchError::Api(e)),
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout)),
        };

        let mut state = self.state.borrow_mut();
        if token < state.applied_token {
            tracing::debug!(
                token,
                applied = state.applied_token,
                "discarding out-of-order refresh"
            );
            return Ok(RefreshOutcome::Stale);
        }
        state.applied_token = token;

        match result {
            Ok(providers) => {
                let count = providers.len();
                state.providers = providers;
                state.status = StoreStatus::Online;
                tracing::info!(token, count, "shop directory refreshed");
                Ok(RefreshOutcome::Applied { count })
            }
            Err(e) => {
                state.providers.clear();
                state.status = StoreStatus::Offline;
                tracing::warn!(token, error = %e, "shop directory offline");
                Err(e)
            }
        }
    }

    /// Creates a shop remotely, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns the repository error unchanged; the store is not touched. A
    /// refresh that fails after the write succeeded is carried in
    /// [`Written::refresh`] instead.
    pub async fn create(
        &self,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Written<Provider>, ApiError> {
        let created = self.repo.create(owner, draft).await?;
        Ok(self.refresh_after_write("create", created).await)
    }

    /// # Errors
    ///
    /// Returns the repository error unchanged; the store is not touched.
    pub async fn update(
        &self,
        id: &ProviderId,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Written<Provider>, ApiError> {
        let updated = self.repo.update(id, owner, draft).await?;
        Ok(self.refresh_after_write("update", updated).await)
    }

    /// # Errors
    ///
    /// Returns the repository error unchanged; the store is not touched.
    pub async fn delete(&self, id: &ProviderId) -> Result<Written<()>, ApiError> {
        self.repo.delete(id).await?;
        Ok(self.refresh_after_write("delete", ()).await)
    }

    async fn refresh_after_write<T>(&self, op: &'static str, value: T) -> Written<T> {
        let refresh = self.refresh().await;
        if let Err(e) = &refresh {
            tracing::warn!(op, error = %e, "refresh after write failed");
        }
        Written { value, refresh }
    }

    #[must_use]
    pub fn find_by_id(&self, id: &ProviderId) -> Option<Provider> {
        self.state
            .borrow()
            .providers
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Provider> {
        self.state.borrow().providers.clone()
    }

    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.state.borrow().status
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
