use sqlx::PgPool;

const CREATE_CONTACTS: &str = "CREATE TABLE IF NOT EXISTS contacts (
    id          UUID PRIMARY KEY,
    owner       TEXT NOT NULL,
    name        TEXT NOT NULL CHECK (name <> ''),
    email       TEXT,
    phone       TEXT,
    type        TEXT,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const CREATE_OWNER_INDEX: &str = "CREATE INDEX IF NOT EXISTS contacts_owner_created_at_idx
    ON contacts (owner, created_at DESC)";

/// Creates the `contacts` table and its index if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_CONTACTS).execute(pool).await?;
    sqlx::query(CREATE_OWNER_INDEX).execute(pool).await?;
    Ok(())
}
