//! Persistence for nightly sleep records.
//!
//! Every write is a single autocommitted statement. `sleep_duration` is never
//! taken from the caller: it is derived from bedtime and wake-up time on each
//! create and update.

use sqlx::PgPool;

use crate::duration::duration_hours;
use crate::models::sleep_log::{SleepLog, SleepLogInput};

/// Column list for `sleep_log` queries.
const SLEEP_LOG_COLUMNS: &str = "\
    id, sleep_date, bedtime, wakeup_time, sleep_duration, \
    sleep_quality, stress_level, caffeine_intake, exercise, notes, \
    created_at, updated_at";

/// Most recent night first; within a night, the latest wake-up first.
const NEWEST_FIRST: &str = "ORDER BY sleep_date DESC, wakeup_time DESC, id DESC";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sleep log {0} does not exist")]
    NotFound(i64),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct SleepLogRepo;

impl SleepLogRepo {
    pub async fn create(pool: &PgPool, input: &SleepLogInput) -> StoreResult<SleepLog> {
        let query = format!(
            "INSERT INTO sleep_log (\
                sleep_date, bedtime, wakeup_time, sleep_duration, \
                sleep_quality, stress_level, caffeine_intake, exercise, notes\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {SLEEP_LOG_COLUMNS}"
        );
        let log = sqlx::query_as::<_, SleepLog>(&query)
            .bind(input.sleep_date)
            .bind(input.bedtime)
            .bind(input.wakeup_time)
            .bind(duration_hours(input.bedtime, input.wakeup_time))
            .bind(input.sleep_quality)
            .bind(input.stress_level)
            .bind(input.caffeine_intake)
            .bind(input.exercise)
            .bind(&input.notes)
            .fetch_one(pool)
            .await?;
        Ok(log)
    }

    pub async fn list_all(pool: &PgPool) -> StoreResult<Vec<SleepLog>> {
        let query = format!("SELECT {SLEEP_LOG_COLUMNS} FROM sleep_log {NEWEST_FIRST}");
        let logs = sqlx::query_as::<_, SleepLog>(&query)
            .fetch_all(pool)
            .await?;
        Ok(logs)
    }

    /// The `limit` most recent records, returned oldest to newest.
    pub async fn list_recent(pool: &PgPool, limit: u32) -> StoreResult<Vec<SleepLog>> {
        let query = format!("SELECT {SLEEP_LOG_COLUMNS} FROM sleep_log {NEWEST_FIRST} LIMIT $1");
        let mut logs = sqlx::query_as::<_, SleepLog>(&query)
            .bind(i64::from(limit))
            .fetch_all(pool)
            .await?;
        logs.reverse();
        Ok(logs)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> StoreResult<Option<SleepLog>> {
        let query = format!("SELECT {SLEEP_LOG_COLUMNS} FROM sleep_log WHERE id = $1");
        let log = sqlx::query_as::<_, SleepLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(log)
    }

    /// Overwrite every mutable field of record `id`.
    ///
    /// Fails with [`StoreError::NotFound`] when no such record exists.
    pub async fn update(pool: &PgPool, id: i64, input: &SleepLogInput) -> StoreResult<SleepLog> {
        let query = format!(
            "UPDATE sleep_log SET \
                sleep_date = $2, bedtime = $3, wakeup_time = $4, sleep_duration = $5, \
                sleep_quality = $6, stress_level = $7, caffeine_intake = $8, \
                exercise = $9, notes = $10, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SLEEP_LOG_COLUMNS}"
        );
        sqlx::query_as::<_, SleepLog>(&query)
            .bind(id)
            .bind(input.sleep_date)
            .bind(input.bedtime)
            .bind(input.wakeup_time)
            .bind(duration_hours(input.bedtime, input.wakeup_time))
            .bind(input.sleep_quality)
            .bind(input.stress_level)
            .bind(input.caffeine_intake)
            .bind(input.exercise)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Remove record `id`. Returns whether a row was deleted; a missing id is
    /// not an error.
    pub async fn delete(pool: &PgPool, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM sleep_log WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Confirm the database answers and the `sleep_log` table exists.
    pub async fn check_table(pool: &PgPool) -> StoreResult<()> {
        sqlx::query("SELECT 1 FROM sleep_log LIMIT 1")
            .fetch_optional(pool)
            .await?;
        Ok(())
    }
}
