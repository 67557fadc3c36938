//! Database initialization and table definitions
//!
//! This module builds the SQLite connection pool, defines the three tables, and
//! holds the application state shared with the request handlers.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::Config;
use crate::repository::{ComputerRepository, MaintenanceRepository, StatsRepository, UserRepository};

/// Employees. `email` is unique.
pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        department TEXT NOT NULL,
        position TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Computers. Deleting the owning user clears `user_id`.
pub const CREATE_COMPUTERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS computers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        hostname TEXT NOT NULL UNIQUE,
        brand TEXT NOT NULL,
        model TEXT NOT NULL,
        cpu TEXT NOT NULL,
        ram INTEGER NOT NULL,
        storage INTEGER NOT NULL,
        os TEXT NOT NULL,
        status TEXT DEFAULT 'Active',
        user_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Maintenance history. Deleting the computer deletes its logs.
pub const CREATE_MAINTENANCE_LOGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS maintenance_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        computer_id INTEGER REFERENCES computers(id) ON DELETE CASCADE,
        date TEXT NOT NULL,
        "type" TEXT NOT NULL,
        description TEXT NOT NULL,
        technician TEXT NOT NULL,
        status TEXT DEFAULT 'Scheduled',
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Application state shared across all request handlers
///
/// Every repository holds a clone of the same pool; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub computers: ComputerRepository,
    pub maintenance: MaintenanceRepository,
    pub stats: StatsRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            computers: ComputerRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool.clone()),
            stats: StatsRepository::new(pool),
        }
    }
}

/// Creates the connection pool described by `config`
///
/// Foreign-key enforcement is switched on for every connection, since the
/// nullify and cascade rules live in the schema.
///
/// # Example
///
/// ```no_run
/// # use inventory::config::Config;
/// # use inventory::database::create_pool;
/// # async fn run() -> Result<(), sqlx::Error> {
/// let pool = create_pool(&Config::default()).await?;
/// # Ok(())
/// # }
/// ```
#[tracing::instrument(skip(config), fields(max_connections = config.max_connections))]
pub async fn create_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::debug!("database pool created");
    Ok(pool)
}

/// Round-trips a trivial query to prove the database is reachable
pub async fn check_connection(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Creates any missing tables inside a single transaction
///
/// Existing tables are never dropped or altered. If any statement fails the
/// transaction is rolled back when it goes out of scope, so either all missing
/// tables are created or none are.
#[tracing::instrument(skip(pool))]
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for statement in [
        CREATE_USERS_TABLE,
        CREATE_COMPUTERS_TABLE,
        CREATE_MAINTENANCE_LOGS_TABLE,
    ] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    tracing::info!("database schema ready");
    Ok(())
}

/// Runs [`init_schema`] and logs a failure instead of returning it
///
/// Startup continues either way; requests hitting a missing table will fail
/// with a database error.
pub async fn ensure_schema(pool: &SqlitePool) {
    if let Err(e) = init_schema(pool).await {
        tracing::error!(error = %e, "failed to initialize database schema");
    }
}
