//! # Administration Resources
//!
//! Users and roles. The console shows these routes to admins only (see
//! [`atlas_core::access::Role::can_access_user_admin`]); the server
//! enforces the same rule with 403s.

use serde::{Deserialize, Serialize};

use atlas_core::types::UserAccount;
use atlas_core::validation;

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Create/update payload for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    /// Server-side role name (e.g., "admin", "tax_user").
    pub role: String,
    /// Only on create / password change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub active: bool,
}

impl UserInput {
    pub fn validate(&self) -> ApiResult<()> {
        validation::validate_name(&self.username)?;
        Ok(())
    }
}

/// A role record from `/roles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// `/users` endpoints.
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<UserAccount>> {
        self.client.get("/users").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<UserAccount> {
        self.client.get(&format!("/users/{}", id)).await
    }

    pub async fn create(&self, input: &UserInput) -> ApiResult<UserAccount> {
        input.validate()?;
        self.client.post("/users", input).await
    }

    pub async fn update(&self, id: &str, input: &UserInput) -> ApiResult<UserAccount> {
        input.validate()?;
        self.client.put(&format!("/users/{}", id), input).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("/users/{}", id)).await
    }
}

/// `/roles` endpoints.
pub struct RolesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RolesApi<'a> {
    pub async fn list(&self) -> ApiResult<Vec<RoleRecord>> {
        self.client.get("/roles").await
    }
}

impl ApiClient {
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    pub fn roles(&self) -> RolesApi<'_> {
        RolesApi { client: self }
    }
}
