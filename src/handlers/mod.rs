pub mod health;
pub mod sleep_logs;
