//! Manager repository: a single row with id = 1

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::ManagerRepository;
use crate::{
    error::{AppError, AppResult},
    models::manager::Manager,
};

#[derive(Clone)]
pub struct PgManagerRepository {
    pool: Pool<Postgres>,
}

impl PgManagerRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagerRepository for PgManagerRepository {
    async fn get(&self) -> AppResult<Option<Manager>> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT username, password, modif_date FROM manager WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(manager)
    }

    async fn create_if_missing(&self, username: &str, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO manager (id, username, password, modif_date)
            VALUES (1, $1, $2, NOW())
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn update_password(&self, password_hash: &str) -> AppResult<Manager> {
        sqlx::query_as::<_, Manager>(
            r#"
            UPDATE manager SET password = $1, modif_date = NOW()
            WHERE id = 1
            RETURNING username, password, modif_date
            "#,
        )
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Manager not found".to_string()))
    }
}
