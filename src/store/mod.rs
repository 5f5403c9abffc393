//! Storage interface for contacts and its implementations.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Contact, ContactId, ContactPatch, NewContact};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence operations the contact service relies on.
///
/// Implementations assign `id` and `created_at` on `create` and never change
/// `owner` afterwards.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Contacts owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &str) -> StorageResult<Vec<Contact>>;

    async fn create(&self, fields: NewContact, owner: &str) -> StorageResult<Contact>;

    async fn find_by_id(&self, id: ContactId) -> StorageResult<Option<Contact>>;

    /// Merges the supplied fields and returns the updated record, or `None`
    /// if no contact has this id.
    async fn update_fields(
        &self,
        id: ContactId,
        patch: &ContactPatch,
    ) -> StorageResult<Option<Contact>>;
}
