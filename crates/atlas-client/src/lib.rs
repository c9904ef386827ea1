//! # atlas-client: External API Access for Atlas ERP
//!
//! This crate is the only place network I/O happens. It turns the external
//! ERP REST API into typed resources, owns the session, and keeps one
//! cached list per entity kind with strict invalidation on mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Atlas ERP Client Layer                             │
//! │                                                                         │
//! │  Browser console                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  atlas-client (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  session  │  │ ApiClient │  │ resources │  │EntityStore│  │   │
//! │  │   │ bearer    │  │ reqwest + │  │ typed     │  │ caches +  │  │   │
//! │  │   │ token     │  │ error map │  │ endpoints │  │ workflows │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTPS                        │
//! │                                ▼                                        │
//! │               External ERP API (system of record)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Correctness Rules
//! - A `401` on any call clears the session and surfaces [`ApiError::Auth`]
//! - Exactly one attempt per request; a transport failure means the outcome
//!   is unknown and the caller refetches before retrying
//! - Mutating workflows are serialized and invalidate the affected caches;
//!   the client never flips a status optimistically
//!
//! ## Example
//! ```rust,no_run
//! use atlas_client::{ApiClient, Credentials, EntityStore};
//!
//! # async fn example() -> Result<(), atlas_client::ApiError> {
//! let api = ApiClient::new("https://erp.example.com/api");
//! api.login(&Credentials {
//!     username: "amir".into(),
//!     password: "secret".into(),
//! })
//! .await?;
//!
//! let store = EntityStore::new(api);
//! let products = store.products().await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod client;
pub mod error;
pub mod resources;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use session::{AuthenticatedUser, Credentials, Session, SessionStore};
pub use store::{EntityKind, EntityStore};
