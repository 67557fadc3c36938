use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::model::Stats;

/// Whole-table counts across the inventory
///
/// The three counts are read independently, so under concurrent writes they
/// may reflect slightly different moments.
#[derive(Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self))]
    pub async fn summary(&self) -> Result<Stats, DbError> {
        let (computers, users, maintenance) = tokio::try_join!(
            self.count("SELECT COUNT(*) FROM computers"),
            self.count("SELECT COUNT(*) FROM users"),
            self.count("SELECT COUNT(*) FROM maintenance_logs"),
        )?;

        Ok(Stats {
            computers,
            users,
            maintenance,
        })
    }

    async fn count(&self, sql: &'static str) -> Result<i64, DbError> {
        let n = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::create_test_pool;

    #[tokio::test]
    async fn test_empty_inventory_counts_zero() {
        let (pool, _temp_db) = create_test_pool().await;

        let stats = StatsRepository::new(pool).summary().await.unwrap();

        assert_eq!(
            stats,
            Stats {
                computers: 0,
                users: 0,
                maintenance: 0
            }
        );
    }

    #[tokio::test]
    async fn test_counts_each_table() {
        let (pool, _temp_db) = create_test_pool().await;

        for i in 0..2 {
            sqlx::query("INSERT INTO users (name, email, department, position) VALUES ('u', ?, 'd', 'p')")
                .bind(format!("u{i}@example.com"))
                .execute(&pool)
                .await
                .unwrap();
        }
        sqlx::query("INSERT INTO computers (hostname, brand, model, cpu, ram, storage, os) VALUES ('h', 'b', 'm', 'c', 1, 1, 'o')")
            .execute(&pool)
            .await
            .unwrap();

        let stats = StatsRepository::new(pool).summary().await.unwrap();

        assert_eq!(stats.users, 2);
        assert_eq!(stats.computers, 1);
        assert_eq!(stats.maintenance, 0);
    }
}
