//! # API Client
//!
//! Thin wrapper over `reqwest` that owns the base URL, the session, and
//! the HTTP status → [`ApiError`] mapping.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One API Request                                    │
//! │                                                                         │
//! │  api.products().list()                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiClient::get("/products")                                           │
//! │       │  attach Authorization: Bearer <token> (when signed in)         │
//! │       ▼                                                                 │
//! │  send ──► transport error? ──► ApiError::Transport (outcome unknown)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2xx ──► decode JSON                                                   │
//! │  401 ──► clear session, ApiError::Auth (forced logout)                 │
//! │  4xx/5xx ──► mapped ApiError with the server's message                 │
//! │                                                                         │
//! │  Exactly ONE attempt. No silent retry, ever.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::session::{Credentials, LoginResponse, Session, SessionStore};

/// Error payload shape used by the external API. Parsed defensively;
/// anything unreadable falls back to the raw body or the status reason.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Client for the external ERP REST API.
///
/// Cheap to clone: the HTTP pool and session are shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g.
    /// `https://erp.example.com/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Arc::new(SessionStore::new()),
        }
    }

    /// The session store shared with this client.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Signs in via `POST /auth/login` and installs the session.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        debug!(username = %credentials.username, "login");

        let response = self
            .send(self.http.post(self.url("/auth/login")).json(credentials))
            .await?;
        let login: LoginResponse = response.json().await?;

        let session = Session::from(login);
        self.session.set(session.clone()).await;
        Ok(session)
    }

    /// Signs out: clears the local session.
    ///
    /// Purely local - the bearer token simply stops being used. Server-side
    /// token revocation is the API's concern.
    pub async fn logout(&self) {
        debug!("logout");
        self.session.clear().await;
    }

    // =========================================================================
    // Request Helpers
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "GET");
        let response = self.send(self.http.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "POST");
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    /// POST with an empty body - the shape of transition endpoints
    /// (`/sales-orders/{id}/approve` and friends).
    pub(crate) async fn post_action<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "POST (action)");
        let response = self.send(self.http.post(self.url(path))).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(path, "PUT");
        let response = self.send(self.http.put(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        debug!(path, "DELETE");
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    /// Sends one request: attaches the bearer token, maps failures.
    async fn send(&self, builder: RequestBuilder) -> ApiResult<reqwest::Response> {
        let builder = match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 401 {
            // Expired or invalid token: the session is gone, full stop.
            warn!("received 401, clearing session");
            self.session.clear().await;
            return Err(ApiError::Auth);
        }

        let message = Self::error_message(response).await;
        Err(match status.as_u16() {
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 | 422 => ApiError::Conflict(message),
            code => ApiError::Server {
                status: code,
                message,
            },
        })
    }

    /// Extracts the most useful human-readable message from an error
    /// response.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
            if let Some(message) = body.message.or(body.error) {
                return message;
            }
        }

        if text.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            text
        }
    }
}
