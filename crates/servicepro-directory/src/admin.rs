//! Admin panel: account listing and removal.

use servicepro_api::{ApiError, ServiceProClient, UserRecord};
use servicepro_core::{CurrentUser, UserId};

use crate::error::DirectoryError;

/// Username of the built-in administrator, which can never be deleted.
pub const BUILTIN_ADMIN: &str = "admin";

#[allow(async_fn_in_trait)]
pub trait UserRepository {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;
    async fn delete_user(&self, id: &UserId) -> Result<(), ApiError>;
}

impl UserRepository for ServiceProClient {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        ServiceProClient::list_users(self).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        ServiceProClient::delete_user(self, id).await
    }
}

#[derive(Debug, Clone)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_shops: usize,
    pub users: Vec<UserRecord>,
}

impl AdminStats {
    /// Users the panel offers a delete action for.
    pub fn deletable(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.iter().filter(|u| u.username != BUILTIN_ADMIN)
    }
}

fn require_admin(user: Option<&CurrentUser>) -> Result<(), DirectoryError> {
    match user {
        Some(u) if u.is_admin() => Ok(()),
        _ => Err(DirectoryError::Permission("admin access required")),
    }
}

/// Loads the panel figures. `total_shops` is the caller's current store size.
///
/// # Errors
///
/// [`DirectoryError::Permission`] for non-admins, before any request is
/// made; [`DirectoryError::Remote`] when the user list cannot be fetched.
pub async fn load<U: UserRepository>(
    repo: &U,
    user: Option<&CurrentUser>,
    total_shops: usize,
) -> Result<AdminStats, DirectoryError> {
    require_admin(user)?;
    let users = repo.list_users().await?;
    Ok(AdminStats {
        total_users: users.len(),
        total_shops,
        users,
    })
}

/// # Errors
///
/// [`DirectoryError::Permission`] for non-admins or when `target` is the
/// built-in admin; [`DirectoryError::Remote`] on API failure.
pub async fn delete_user<U: UserRepository>(
    repo: &U,
    user: Option<&CurrentUser>,
    target: &UserRecord,
) -> Result<(), DirectoryError> {
    require_admin(user)?;
    if target.username == BUILTIN_ADMIN {
        return Err(DirectoryError::Permission("the admin account cannot be deleted"));
    }
    repo.delete_user(&target.user_id()).await?;
    tracing::info!(user = %target.username, "user deleted");
    Ok(())
}
