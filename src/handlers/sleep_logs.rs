use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Local;
use serde_json::json;

use crate::db::sleep_log_repo::StoreError;
use crate::db::SleepLogRepo;
use crate::error::{AppError, AppResult};
use crate::models::sleep_log::{ChartData, SleepLogForm};
use crate::views;
use crate::AppState;

/// Record id from the URL. Anything that is not an integer is treated as a
/// page that does not exist.
#[derive(Debug, Clone, Copy)]
pub struct LogId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for LogId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Log not found.".into()))?;
        Ok(Self(id))
    }
}

/// GET / — every record, newest night first, plus the entry form.
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let logs = SleepLogRepo::list_all(&state.db).await?;
    let today = Local::now().date_naive();
    Ok(Html(views::index_page(&logs, today)))
}

/// POST / — log a new night.
pub async fn create_log(
    State(state): State<AppState>,
    Form(form): Form<SleepLogForm>,
) -> AppResult<Redirect> {
    let input = form.into_input()?;
    let log = SleepLogRepo::create(&state.db, &input).await?;

    tracing::info!(id = log.id, sleep_date = %log.sleep_date, hours = log.sleep_duration, "Sleep log created");
    Ok(Redirect::to("/"))
}

/// Failure body for the chart endpoint, which speaks JSON rather than HTML.
#[derive(Debug)]
pub struct ChartError(AppError);

impl From<StoreError> for ChartError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Error fetching chart data");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Could not load chart data" })),
        )
            .into_response()
    }
}

/// GET /sleep-data — recent nights for the trend chart, oldest first.
pub async fn sleep_data(State(state): State<AppState>) -> Result<Json<ChartData>, ChartError> {
    let logs = SleepLogRepo::list_recent(&state.db, state.config.chart_limit).await?;
    Ok(Json(ChartData::from_logs(&logs)))
}

/// GET /edit_log/:id
pub async fn edit_form(
    State(state): State<AppState>,
    LogId(log_id): LogId,
) -> AppResult<Html<String>> {
    let log = SleepLogRepo::find_by_id(&state.db, log_id)
        .await?
        .ok_or(AppError::NotFound("Log not found.".into()))?;

    Ok(Html(views::edit_page(&log)))
}

/// POST /edit_log/:id
pub async fn update_log(
    State(state): State<AppState>,
    LogId(log_id): LogId,
    Form(form): Form<SleepLogForm>,
) -> AppResult<Redirect> {
    let input = form.into_input()?;
    let log = SleepLogRepo::update(&state.db, log_id, &input).await?;

    tracing::info!(id = log.id, hours = log.sleep_duration, "Sleep log updated");
    Ok(Redirect::to("/"))
}

/// POST /delete_log/:id — succeeds whether or not the record still exists.
pub async fn delete_log(
    State(state): State<AppState>,
    LogId(log_id): LogId,
) -> AppResult<Redirect> {
    let deleted = SleepLogRepo::delete(&state.db, log_id).await?;

    tracing::info!(id = log_id, deleted, "Sleep log delete requested");
    Ok(Redirect::to("/"))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("The page you requested does not exist.".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn chart_error_is_json_500_without_details() {
        let err = ChartError::from(StoreError::Database(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, json!({ "error": "Could not load chart data" }));
    }
}
