//! Repositories over the three inventory tables
//!
//! Each repository holds a clone of the shared pool and issues exactly one
//! statement per operation. Identifier-keyed operations report a miss as
//! [`DbError::NotFound`](crate::error::DbError::NotFound); everything else the
//! database rejects is passed through untouched.

mod computers;
mod maintenance;
mod stats;
mod users;

pub use computers::{ComputerRepository, COMPUTER_NOT_FOUND};
pub use maintenance::{MaintenanceRepository, MAINTENANCE_NOT_FOUND};
pub use stats::StatsRepository;
pub use users::{UserRepository, USER_NOT_FOUND};

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::sqlite::SqlitePool;
    use tempfile::NamedTempFile;

    use crate::config::Config;
    use crate::database::{create_pool, init_schema};

    /// Pool over a fresh temporary database with the schema applied
    pub async fn create_test_pool() -> (SqlitePool, NamedTempFile) {
        let temp_db = NamedTempFile::new().unwrap();
        let config = Config {
            database_url: format!("sqlite:{}", temp_db.path().display()),
            ..Config::default()
        };
        let pool = create_pool(&config).await.unwrap();
        init_schema(&pool).await.unwrap();
        (pool, temp_db)
    }
}
