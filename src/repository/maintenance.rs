use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::model::{MaintenanceLog, MaintenanceLogEntry, MaintenancePayload, DEFAULT_MAINTENANCE_STATUS};

pub const MAINTENANCE_NOT_FOUND: &str = "Maintenance log not found";

/// Repository for the `maintenance_logs` table
#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: SqlitePool,
}

impl MaintenanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All logs, newest date first, each with its computer's hostname
    ///
    /// The left join keeps logs whose computer reference is empty; their
    /// `hostname` is `None`. Logs sharing a date are ordered by id, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MaintenanceLogEntry>, DbError> {
        let logs = sqlx::query_as::<_, MaintenanceLogEntry>(
            r#"
            SELECT m.id, m.computer_id, m.date, m."type", m.description, m.technician,
                   m.status, m.created_at, c.hostname
            FROM maintenance_logs m
            LEFT JOIN computers c ON m.computer_id = c.id
            ORDER BY m.date DESC, m.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<MaintenanceLog, DbError> {
        sqlx::query_as::<_, MaintenanceLog>(
            r#"
            SELECT id, computer_id, date, "type", description, technician, status, created_at
            FROM maintenance_logs
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(MAINTENANCE_NOT_FOUND))
    }

    /// Insert a log and return the stored row
    ///
    /// A missing `status` is stored as "Scheduled".
    #[tracing::instrument(skip(self, payload), fields(computer_id = ?payload.computer_id))]
    pub async fn create(&self, payload: &MaintenancePayload) -> Result<MaintenanceLog, DbError> {
        let status = payload
            .status
            .as_deref()
            .unwrap_or(DEFAULT_MAINTENANCE_STATUS);

        let log = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            INSERT INTO maintenance_logs (computer_id, date, "type", description, technician, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, computer_id, date, "type", description, technician, status, created_at
            "#,
        )
        .bind(payload.computer_id)
        .bind(payload.date)
        .bind(&payload.log_type)
        .bind(&payload.description)
        .bind(&payload.technician)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(log_id = log.id, "maintenance log created");
        Ok(log)
    }

    /// Replace every mutable field of a log
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: &MaintenancePayload) -> Result<MaintenanceLog, DbError> {
        let log = sqlx::query_as::<_, MaintenanceLog>(
            r#"
            UPDATE maintenance_logs
            SET computer_id = ?, date = ?, "type" = ?, description = ?, technician = ?, status = ?
            WHERE id = ?
            RETURNING id, computer_id, date, "type", description, technician, status, created_at
            "#,
        )
        .bind(payload.computer_id)
        .bind(payload.date)
        .bind(&payload.log_type)
        .bind(&payload.description)
        .bind(&payload.technician)
        .bind(&payload.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(MAINTENANCE_NOT_FOUND))?;

        tracing::debug!(log_id = id, "maintenance log updated");
        Ok(log)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM maintenance_logs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(MAINTENANCE_NOT_FOUND));
        }

        tracing::debug!(log_id = id, "maintenance log deleted");
        Ok(())
    }
}
