//! Per-user contacts REST service.
//!
//! A request flows from the HTTP binding ([`routes`]) through the
//! [`service::ContactService`], which validates input, checks ownership via
//! [`guard`], and talks to a [`store::ContactStore`].

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod routes;
pub mod schema;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod validation;

use std::sync::Arc;

use axum::Router;

pub use auth::{Principal, PRINCIPAL_HEADER};
pub use error::{ContactError, ContactResult};
pub use model::{Contact, ContactId, ContactInput, ContactPatch, NewContact};
pub use routes::AppState;
pub use service::{ContactService, DELETE_PLACEHOLDER};
pub use store::{ContactStore, MemoryStore, PgStore, StorageError};

/// Builds the full application router on top of `store`.
pub fn app(store: Arc<dyn ContactStore>) -> Router {
    routes::router(AppState::new(ContactService::new(store)))
}
