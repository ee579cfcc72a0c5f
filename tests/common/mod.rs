#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chrono::{NaiveDate, NaiveTime};
use http_body_util::BodyExt;
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use sleeplog_api::config::Config;
use sleeplog_api::models::sleep_log::SleepLogInput;
use sleeplog_api::{build_router, AppState};

pub fn test_config() -> Config {
    Config {
        database: PgConnectOptions::new_without_pgpass(),
        db_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: "test-secret".to_string(),
        chart_limit: 10,
    }
}

/// Full router over the given pool, as `main.rs` builds it.
pub fn build_test_app(pool: PgPool) -> Router {
    build_router(AppState {
        db: pool,
        config: Arc::new(test_config()),
    })
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn time(raw: &str) -> NaiveTime {
    NaiveTime::parse_from_str(raw, "%H:%M").unwrap()
}

pub fn input(sleep_date: &str, bedtime: &str, wakeup_time: &str) -> SleepLogInput {
    SleepLogInput {
        sleep_date: date(sleep_date),
        bedtime: time(bedtime),
        wakeup_time: time(wakeup_time),
        sleep_quality: 5,
        stress_level: 5,
        caffeine_intake: false,
        exercise: false,
        notes: String::new(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
