use serde::{Deserialize, Serialize};

use crate::providers::Provider;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// Account role as issued at registration.
///
/// Unknown role strings map to `Customer`, the least-privileged role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Customer,
    Provider,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::Provider => "provider",
            Role::Admin => "admin",
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "provider" => Role::Provider,
            "admin" => Role::Admin,
            _ => Role::Customer,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

/// The signed-in account, handed to the directory by the session layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Providers and admins may place new shops on the map.
    #[must_use]
    pub fn can_add_shops(&self) -> bool {
        matches!(self.role, Role::Provider | Role::Admin)
    }

    /// Owners and admins may edit or delete a shop.
    #[must_use]
    pub fn can_manage(&self, provider: &Provider) -> bool {
        self.is_admin() || provider.is_owned_by(&self.id)
    }
}
