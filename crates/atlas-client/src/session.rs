//! # Session Management
//!
//! Holds the authenticated session for API calls.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  login(credentials) ──► POST /auth/login ──► Session { token, user }   │
//! │                                                   │                     │
//! │                 every request: Authorization: Bearer <token>            │
//! │                                                   │                     │
//! │  logout() ────────────────────────────────────────┤                     │
//! │  any 401 response (expired/invalid token) ────────┴──► cleared         │
//! │                                                                         │
//! │  The session is an EXPLICIT object owned by the ApiClient - never an   │
//! │  ambient global. Whoever performs API calls is handed it.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use atlas_core::Role;

// =============================================================================
// Wire Types
// =============================================================================

/// Login request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The user identity embedded in a login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: String,
    pub username: String,
    /// Parsed leniently: unknown role names degrade to Staff.
    pub role: Role,
}

/// Login response body from `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthenticatedUser,
}

// =============================================================================
// Session
// =============================================================================

/// An authenticated session: bearer token plus who it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    user: AuthenticatedUser,
}

impl Session {
    pub fn new(token: impl Into<String>, user: AuthenticatedUser) -> Self {
        Session {
            token: token.into(),
            user,
        }
    }

    /// The bearer token attached to every request.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &AuthenticatedUser {
        &self.user
    }

    /// The caller's role for access-policy checks.
    pub fn role(&self) -> Role {
        self.user.role
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session {
            token: response.token,
            user: response.user,
        }
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Shared, mutable slot for the current session.
///
/// ## Thread Safety
/// Wrapped in `RwLock` because every in-flight request reads the token
/// while login/logout/forced-clear write it.
#[derive(Debug, Default)]
pub struct SessionStore {
    slot: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Installs a session (after a successful login).
    pub async fn set(&self, session: Session) {
        *self.slot.write().await = Some(session);
    }

    /// Clears the session (logout, or forced by a 401).
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }

    /// A clone of the current session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.slot.read().await.clone()
    }

    /// The current bearer token, if signed in.
    pub async fn token(&self) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.slot.read().await.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
