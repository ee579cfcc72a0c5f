pub mod sleep_log;
