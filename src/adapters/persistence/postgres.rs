use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    app_error::AppResult, domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::waitlist::EntryStore,
};

// Waitlist entry as stored in the db.
#[derive(sqlx::FromRow, Debug)]
struct WaitlistEntryRow {
    id: i64,
    name: String,
    email: String,
    category: String,
    category_label: String,
    category_specific: Option<String>,
    linkedin_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<WaitlistEntryRow> for WaitlistEntry {
    fn from(row: WaitlistEntryRow) -> Self {
        WaitlistEntry {
            id: row.id,
            name: row.name,
            email: row.email,
            category: row.category,
            category_label: row.category_label,
            category_specific: row.category_specific,
            linkedin_id: row.linkedin_id,
            created_at: row.created_at,
        }
    }
}

/// Relational entry store.
///
/// `get_all` orders by `id ASC` so the collection comes back in insertion
/// order like every other backend. The UNIQUE constraint on email also
/// closes the duplicate race across processes, which the in-process
/// create lock cannot see.
pub struct PostgresEntryStore {
    pool: PgPool,
}

impl PostgresEntryStore {
    pub async fn new(pool: PgPool) -> AppResult<Self> {
        // Ids are assigned by the application as count + 1, so the column
        // is a plain BIGINT rather than a serial.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS waitlist_entries (
                id BIGINT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL,
                category_label TEXT NOT NULL,
                category_specific TEXT,
                linkedin_id TEXT,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl EntryStore for PostgresEntryStore {
    async fn get_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        let rows: Vec<WaitlistEntryRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, category, category_label,
                   category_specific, linkedin_id, created_at
            FROM waitlist_entries
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WaitlistEntry::from).collect())
    }

    async fn save_all(&self, entries: Vec<WaitlistEntry>) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM waitlist_entries")
            .execute(&mut *tx)
            .await?;

        for entry in &entries {
            sqlx::query(
                r#"
                INSERT INTO waitlist_entries
                    (id, name, email, category, category_label,
                     category_specific, linkedin_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(entry.id)
            .bind(&entry.name)
            .bind(&entry.email)
            .bind(&entry.category)
            .bind(&entry.category_label)
            .bind(&entry.category_specific)
            .bind(&entry.linkedin_id)
            .bind(entry.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
