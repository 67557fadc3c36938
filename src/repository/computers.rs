use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::model::{Computer, ComputerPayload, DEFAULT_COMPUTER_STATUS};

pub const COMPUTER_NOT_FOUND: &str = "Computer not found";

/// Repository for the `computers` table
#[derive(Clone)]
pub struct ComputerRepository {
    pool: SqlitePool,
}

impl ComputerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All computers, ascending by id
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Computer>, DbError> {
        let computers = sqlx::query_as::<_, Computer>(
            r#"
            SELECT id, hostname, brand, model, cpu, ram, storage, os, status, user_id, created_at
            FROM computers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(computers)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Computer, DbError> {
        sqlx::query_as::<_, Computer>(
            r#"
            SELECT id, hostname, brand, model, cpu, ram, storage, os, status, user_id, created_at
            FROM computers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(COMPUTER_NOT_FOUND))
    }

    /// Insert a computer and return the stored row
    ///
    /// A missing `status` is stored as "Active" and a missing `user_id` as
    /// unassigned.
    ///
    /// # Errors
    /// Returns `DbError::Sqlx` on a duplicate hostname, a missing required
    /// field, or a `user_id` that references no user.
    #[tracing::instrument(skip(self, payload), fields(hostname = ?payload.hostname))]
    pub async fn create(&self, payload: &ComputerPayload) -> Result<Computer, DbError> {
        let status = payload
            .status
            .as_deref()
            .unwrap_or(DEFAULT_COMPUTER_STATUS);

        let computer = sqlx::query_as::<_, Computer>(
            r#"
            INSERT INTO computers (hostname, brand, model, cpu, ram, storage, os, status, user_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, hostname, brand, model, cpu, ram, storage, os, status, user_id, created_at
            "#,
        )
        .bind(&payload.hostname)
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(&payload.cpu)
        .bind(payload.ram)
        .bind(payload.storage)
        .bind(&payload.os)
        .bind(status)
        .bind(payload.user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(computer_id = computer.id, "computer created");
        Ok(computer)
    }

    /// Replace every mutable field of a computer
    ///
    /// Omitted fields are written as `NULL`, including `status` and `user_id`.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: &ComputerPayload) -> Result<Computer, DbError> {
        let computer = sqlx::query_as::<_, Computer>(
            r#"
            UPDATE computers
            SET hostname = ?, brand = ?, model = ?, cpu = ?, ram = ?, storage = ?, os = ?,
                status = ?, user_id = ?
            WHERE id = ?
            RETURNING id, hostname, brand, model, cpu, ram, storage, os, status, user_id, created_at
            "#,
        )
        .bind(&payload.hostname)
        .bind(&payload.brand)
        .bind(&payload.model)
        .bind(&payload.cpu)
        .bind(payload.ram)
        .bind(payload.storage)
        .bind(&payload.os)
        .bind(&payload.status)
        .bind(payload.user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(COMPUTER_NOT_FOUND))?;

        tracing::debug!(computer_id = id, "computer updated");
        Ok(computer)
    }

    /// Delete a computer together with its maintenance logs
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM computers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(COMPUTER_NOT_FOUND));
        }

        tracing::debug!(computer_id = id, "computer deleted");
        Ok(())
    }
}
