//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkRepository;

/// Name of the unique constraint on `links.short_code`.
const SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";

/// PostgreSQL repository for link storage.
///
/// `create` is a conditional insert (`ON CONFLICT DO NOTHING`) and
/// `record_click` a single `UPDATE ... RETURNING`, so no in-process locking is
/// needed.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    long_url: String,
    created_at: DateTime<Utc>,
    click_count: i64,
    last_clicked: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.short_code,
            r.long_url,
            r.created_at,
            r.click_count,
            r.last_clicked,
        )
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Maps a failed insert, turning a unique violation on the short code into
/// [`StoreError::DuplicateCode`].
fn map_insert_error(e: sqlx::Error, short_code: &str) -> StoreError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
        && matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
    {
        return StoreError::DuplicateCode(short_code.to_string());
    }

    e.into()
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (short_code, long_url)
            VALUES ($1, $2)
            ON CONFLICT (short_code) DO NOTHING
            RETURNING id, short_code, long_url, created_at, click_count, last_clicked
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.long_url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_insert_error(e, &new_link.short_code))?;

        row.map(Link::from)
            .ok_or(StoreError::DuplicateCode(new_link.short_code))
    }

    async fn get(&self, short_code: &str) -> Result<Option<Link>, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_code, long_url, created_at, click_count, last_clicked
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list(&self) -> Result<Vec<Link>, StoreError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_code, long_url, created_at, click_count, last_clicked
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn record_click(&self, short_code: &str) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET click_count = click_count + 1,
                last_clicked = NOW()
            WHERE short_code = $1
            RETURNING id, short_code, long_url, created_at, click_count, last_clicked
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from)
            .ok_or_else(|| StoreError::NotFound(short_code.to_string()))
    }

    async fn delete(&self, short_code: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM links WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(short_code.to_string()));
        }

        Ok(())
    }
}
