use async_trait::async_trait;
use jiff::civil::Date;
use jiff::Timestamp;
use junction_core::error::Result;
use junction_core::{BookingRecord, BookingStore, Pnr, ReadStore, StorageError};
use sqlx::{MySqlPool, Row};

/// MySQL implementation of the booking store.
///
/// Expects a `bookings` table with a `UNIQUE` index on `pnr`; that index is
/// the storage-layer uniqueness constraint the issuer's commit path relies
/// on. Cancellation is a soft update of `cancelled_at`. Reads only return
/// active bookings, but `exists` scans all rows, so a cancelled booking's
/// PNR can never be issued again.
///
/// ```sql
/// CREATE TABLE bookings (
///     pnr            VARCHAR(32)  NOT NULL,
///     passenger_name VARCHAR(255) NOT NULL,
///     train_number   VARCHAR(8)   NOT NULL,
///     journey_date   CHAR(10)     NOT NULL,
///     cancelled_at   BIGINT       NULL,
///     UNIQUE KEY uniq_pnr (pnr)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn now_unix_seconds() -> i64 {
    Timestamp::now().as_second()
}

fn parse_journey_date(raw: &str) -> Result<Date> {
    raw.parse::<Date>()
        .map_err(|e| StorageError::InvalidData(format!("invalid journey_date '{}': {e}", raw)))
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
impl ReadStore for MySqlStore {
    async fn get(&self, pnr: &Pnr) -> Result<Option<BookingRecord>> {
        let row = sqlx::query(
            r#"
            SELECT passenger_name, train_number, journey_date
            FROM bookings
            WHERE pnr = ?
              AND cancelled_at IS NULL
            LIMIT 1
            "#,
        )
        .bind(pnr.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let passenger_name: String = row.try_get("passenger_name").map_err(map_sqlx_error)?;
        let train_number: String = row.try_get("train_number").map_err(map_sqlx_error)?;
        let journey_date_raw: String = row.try_get("journey_date").map_err(map_sqlx_error)?;
        let journey_date = parse_journey_date(&journey_date_raw)?;

        Ok(Some(BookingRecord {
            passenger_name,
            train_number,
            journey_date,
        }))
    }

    async fn exists(&self, pnr: &Pnr) -> Result<bool> {
        // No cancelled_at filter: cancelled PNRs are retired, not freed.
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM bookings
            WHERE pnr = ?
            LIMIT 1
            "#,
        )
        .bind(pnr.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl BookingStore for MySqlStore {
    async fn insert(&self, pnr: &Pnr, record: BookingRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO bookings (pnr, passenger_name, train_number, journey_date, cancelled_at)
            VALUES (?, ?, ?, ?, NULL)
            "#,
        )
        .bind(pnr.as_str())
        .bind(record.passenger_name)
        .bind(record.train_number)
        .bind(record.journey_date.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(pnr.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn cancel(&self, pnr: &Pnr) -> Result<bool> {
        let now = now_unix_seconds();

        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET cancelled_at = ?
            WHERE pnr = ?
              AND cancelled_at IS NULL
            "#,
        )
        .bind(now)
        .bind(pnr.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
