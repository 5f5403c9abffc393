use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::{ContactStore, StorageResult};
use crate::model::{Contact, ContactId, ContactPatch, NewContact};
use crate::schema;

const CONTACT_COLUMNS: &str = "id, owner, name, email, phone, type, created_at";

/// PostgreSQL-backed contact store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and makes sure the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        schema::ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ContactStore for PgStore {
    async fn list_by_owner(&self, owner: &str) -> StorageResult<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE owner = $1
             ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn create(&self, fields: NewContact, owner: &str) -> StorageResult<Contact> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "INSERT INTO contacts (id, owner, name, email, phone, type)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(fields.name)
        .bind(fields.email)
        .bind(fields.phone)
        .bind(fields.kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn find_by_id(&self, id: ContactId) -> StorageResult<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn update_fields(
        &self,
        id: ContactId,
        patch: &ContactPatch,
    ) -> StorageResult<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "UPDATE contacts SET
                name  = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                type  = COALESCE($5, type)
             WHERE id = $1
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.phone.as_deref())
        .bind(patch.kind.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }
}
