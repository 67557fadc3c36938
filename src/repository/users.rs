use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::model::{User, UserPayload};

pub const USER_NOT_FOUND: &str = "User not found";

/// Repository for the `users` table
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All users, ascending by id
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, department, position, created_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, department, position, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(USER_NOT_FOUND))
    }

    /// Insert a user and return the stored row
    ///
    /// # Errors
    /// Returns `DbError::Sqlx` if a required field is missing or the email is
    /// already taken.
    #[tracing::instrument(skip(self, payload), fields(email = ?payload.email))]
    pub async fn create(&self, payload: &UserPayload) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, department, position, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, email, department, position, created_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.department)
        .bind(&payload.position)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = user.id, "user created");
        Ok(user)
    }

    /// Replace every mutable field of a user
    #[tracing::instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: &UserPayload) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = ?, email = ?, department = ?, position = ?
            WHERE id = ?
            RETURNING id, name, email, department, position, created_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.department)
        .bind(&payload.position)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound(USER_NOT_FOUND))?;

        tracing::debug!(user_id = id, "user updated");
        Ok(user)
    }

    /// Delete a user; their computers keep existing with `user_id` cleared
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(USER_NOT_FOUND));
        }

        tracing::debug!(user_id = id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::create_test_pool;

    fn payload(name: &str, email: &str) -> UserPayload {
        UserPayload {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            department: Some("IT".to_string()),
            position: Some("Engineer".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let (pool, _temp_db) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let created = repo.create(&payload("Ada", "ada@example.com")).await.unwrap();
        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.name, "Ada");
    }

    #[tokio::test]
    async fn test_list_is_ascending_by_id() {
        let (pool, _temp_db) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        for i in 0..3 {
            repo.create(&payload("User", &format!("u{i}@example.com"))).await.unwrap();
        }

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|u| u.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_database_error() {
        let (pool, _temp_db) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        repo.create(&payload("Ada", "same@example.com")).await.unwrap();
        let err = repo.create(&payload("Bob", "same@example.com")).await.unwrap_err();

        assert!(matches!(err, DbError::Sqlx(_)));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_required_field_is_database_error() {
        let (pool, _temp_db) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let mut incomplete = payload("Ada", "ada@example.com");
        incomplete.department = None;

        assert!(matches!(repo.create(&incomplete).await, Err(DbError::Sqlx(_))));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_is_idempotent() {
        let (pool, _temp_db) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        let created = repo.create(&payload("Ada", "ada@example.com")).await.unwrap();
        let change = payload("Ada King", "ada.king@example.com");

        let first = repo.update(created.id, &change).await.unwrap();
        let second = repo.update(created.id, &change).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.name, "Ada King");
        assert_eq!(first.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let (pool, _temp_db) = create_test_pool().await;
        let repo = UserRepository::new(pool);

        assert!(matches!(repo.get(42).await, Err(DbError::NotFound(USER_NOT_FOUND))));
        assert!(matches!(
            repo.update(42, &payload("x", "x@example.com")).await,
            Err(DbError::NotFound(_))
        ));
        assert!(matches!(repo.delete(42).await, Err(DbError::NotFound(_))));
    }
}
