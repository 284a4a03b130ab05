use async_trait::async_trait;
use gambit_core::repository::{ReadRepository, Repository, Result, UrlRecord};
use gambit_core::{Fingerprint, Sequence, StorageError};
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::debug;

const SCHEMA: &str = include_str!("../ddl/mysql/chess_urls.sql");

/// MySQL implementation of the repository contract.
///
/// Uniqueness of `sequence` is enforced by a unique key, so a racing insert
/// surfaces as [`StorageError::Conflict`]. Soft delete is implemented with
/// `deleted_at`; reads only return active records (`deleted_at IS NULL` and
/// not expired). Inserts never reuse an existing sequence, including
/// soft-deleted rows.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `chess_urls` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("chess_urls schema ensured");
        Ok(())
    }
}

fn parse_timestamp(column: &str, seconds: Option<i64>) -> Result<Option<Timestamp>> {
    seconds
        .map(|value| {
            Timestamp::from_second(value).map_err(|e| {
                StorageError::InvalidData(format!("invalid {column} timestamp '{value}': {e}"))
            })
        })
        .transpose()
}

fn row_to_record(row: &MySqlRow) -> Result<UrlRecord> {
    let fingerprint: String = row.try_get("fingerprint").map_err(map_sqlx_error)?;
    let fingerprint: Fingerprint = fingerprint.parse().map_err(|e| {
        StorageError::InvalidData(format!("invalid fingerprint '{fingerprint}': {e}"))
    })?;

    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let created_at = Timestamp::from_second(created_at).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{created_at}': {e}"))
    })?;

    Ok(UrlRecord {
        original_url: row.try_get("original_url").map_err(map_sqlx_error)?,
        fingerprint,
        custom: row.try_get("custom_sequence").map_err(map_sqlx_error)?,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        description: row.try_get("description").map_err(map_sqlx_error)?,
        created_at,
        expire_at: parse_timestamp(
            "expire_at",
            row.try_get("expire_at").map_err(map_sqlx_error)?,
        )?,
        max_visits: row.try_get("max_visits").map_err(map_sqlx_error)?,
        visit_count: row.try_get("visit_count").map_err(map_sqlx_error)?,
        last_visited: parse_timestamp(
            "last_visited",
            row.try_get("last_visited").map_err(map_sqlx_error)?,
        )?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, sequence: &Sequence) -> Result<Option<UrlRecord>> {
        let now = Timestamp::now().as_second();

        let row = sqlx::query(
            r#"
            SELECT original_url, fingerprint, custom_sequence, title, description,
                   created_at, expire_at, max_visits, visit_count, last_visited
            FROM chess_urls
            WHERE sequence = ?
              AND deleted_at IS NULL
              AND (expire_at IS NULL OR expire_at > ?)
            LIMIT 1
            "#,
        )
        .bind(sequence.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn exists(&self, sequence: &Sequence) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM chess_urls
            WHERE sequence = ?
            LIMIT 1
            "#,
        )
        .bind(sequence.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, sequence: &Sequence, record: UrlRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO chess_urls (
                sequence, original_url, fingerprint, custom_sequence, title, description,
                created_at, expire_at, max_visits, visit_count, last_visited, deleted_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL)
            "#,
        )
        .bind(sequence.as_str())
        .bind(record.original_url)
        .bind(record.fingerprint.to_string())
        .bind(record.custom)
        .bind(record.title)
        .bind(record.description)
        .bind(record.created_at.as_second())
        .bind(record.expire_at.map(|ts| ts.as_second()))
        .bind(record.max_visits)
        .bind(record.visit_count)
        .bind(record.last_visited.map(|ts| ts.as_second()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(sequence.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn delete(&self, sequence: &Sequence) -> Result<bool> {
        let now = Timestamp::now().as_second();

        let result = sqlx::query(
            r#"
            UPDATE chess_urls
            SET deleted_at = ?
            WHERE sequence = ?
              AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(sequence.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_visit(&self, sequence: &Sequence, at: Timestamp) -> Result<bool> {
        let at = at.as_second();

        // The cap check and the increment are a single statement.
        let result = sqlx::query(
            r#"
            UPDATE chess_urls
            SET visit_count = visit_count + 1,
                last_visited = ?
            WHERE sequence = ?
              AND deleted_at IS NULL
              AND (expire_at IS NULL OR expire_at > ?)
              AND (max_visits IS NULL OR visit_count < max_visits)
            "#,
        )
        .bind(at)
        .bind(sequence.as_str())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
