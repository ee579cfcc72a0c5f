use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::duration::parse_time;
use crate::error::{AppError, AppResult};

/// Quality and stress score used when the form omits the field.
pub const DEFAULT_SCORE: i32 = 5;

#[derive(Debug, Clone, FromRow)]
pub struct SleepLog {
    pub id: i64,
    pub sleep_date: NaiveDate,
    pub bedtime: NaiveTime,
    pub wakeup_time: NaiveTime,
    pub sleep_duration: f64,
    pub sleep_quality: i32,
    pub stress_level: i32,
    pub caffeine_intake: bool,
    pub exercise: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw fields of the create/edit form, exactly as the browser posts them.
///
/// Checkboxes are only submitted when ticked, so `caffeine_intake` and
/// `exercise` carry meaning through presence alone.
#[derive(Debug, Default, Deserialize)]
pub struct SleepLogForm {
    pub sleep_date: Option<String>,
    pub bedtime: Option<String>,
    pub wakeup_time: Option<String>,
    pub sleep_quality: Option<String>,
    pub stress_level: Option<String>,
    pub caffeine_intake: Option<String>,
    pub exercise: Option<String>,
    pub notes: Option<String>,
}

/// Parsed, typed record fields. Duration is not part of the input; the store
/// derives it from the two times on every write.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepLogInput {
    pub sleep_date: NaiveDate,
    pub bedtime: NaiveTime,
    pub wakeup_time: NaiveTime,
    pub sleep_quality: i32,
    pub stress_level: i32,
    pub caffeine_intake: bool,
    pub exercise: bool,
    pub notes: String,
}

impl SleepLogForm {
    pub fn into_input(self) -> AppResult<SleepLogInput> {
        let sleep_date = required(self.sleep_date, "sleep_date")?;
        let sleep_date = NaiveDate::parse_from_str(sleep_date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::Validation("sleep_date must be a YYYY-MM-DD date".into()))?;

        let bedtime = required(self.bedtime, "bedtime")?;
        let bedtime = parse_time(&bedtime)
            .ok_or_else(|| AppError::Validation("bedtime must be an HH:MM time".into()))?;

        let wakeup_time = required(self.wakeup_time, "wakeup_time")?;
        let wakeup_time = parse_time(&wakeup_time)
            .ok_or_else(|| AppError::Validation("wakeup_time must be an HH:MM time".into()))?;

        Ok(SleepLogInput {
            sleep_date,
            bedtime,
            wakeup_time,
            sleep_quality: score(self.sleep_quality, "sleep_quality")?,
            stress_level: score(self.stress_level, "stress_level")?,
            caffeine_intake: self.caffeine_intake.is_some(),
            exercise: self.exercise.is_some(),
            notes: self.notes.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

/// Absent or blank scores fall back to [`DEFAULT_SCORE`].
fn score(value: Option<String>, field: &str) -> AppResult<i32> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(DEFAULT_SCORE),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Validation(format!("{field} must be an integer"))),
    }
}

/// Round hours to one decimal place, exact halves going to the even digit
/// (7.25 becomes 7.2).
pub fn round_tenths(hours: f64) -> f64 {
    (hours * 10.0).round_ties_even() / 10.0
}

/// Series for the trend chart, ordered oldest to newest.
#[derive(Debug, Serialize, PartialEq)]
pub struct ChartData {
    pub dates: Vec<String>,
    pub durations: Vec<f64>,
    pub qualities: Vec<i32>,
}

impl ChartData {
    pub fn from_logs(logs: &[SleepLog]) -> Self {
        Self {
            dates: logs
                .iter()
                .map(|log| log.sleep_date.format("%b %d").to_string())
                .collect(),
            durations: logs
                .iter()
                .map(|log| round_tenths(log.sleep_duration))
                .collect(),
            qualities: logs.iter().map(|log| log.sleep_quality).collect(),
        }
    }
}
