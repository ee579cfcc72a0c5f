pub mod pool;
pub mod sleep_log_repo;

pub use pool::create_pool;
pub use sleep_log_repo::SleepLogRepo;
