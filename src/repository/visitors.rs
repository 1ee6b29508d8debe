//! Visitors repository for database operations

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use super::VisitorsRepository;
use crate::{
    error::{AppError, AppResult},
    models::visitor::{CreateVisitor, Visitor},
};

#[derive(Clone)]
pub struct PgVisitorsRepository {
    pool: Pool<Postgres>,
}

impl PgVisitorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitorsRepository for PgVisitorsRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Visitor>> {
        let visitor = sqlx::query_as::<_, Visitor>(
            "SELECT id, username, balance FROM visitors WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(visitor)
    }

    async fn list(&self) -> AppResult<Vec<Visitor>> {
        let visitors = sqlx::query_as::<_, Visitor>(
            "SELECT id, username, balance FROM visitors ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(visitors)
    }

    async fn create(&self, data: &CreateVisitor) -> AppResult<Visitor> {
        sqlx::query_as::<_, Visitor>(
            r#"
            INSERT INTO visitors (username, balance)
            VALUES ($1, $2)
            RETURNING id, username, balance
            "#,
        )
        .bind(&data.username)
        .bind(data.balance.unwrap_or(Decimal::ZERO))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Username is already taken"))
    }

    async fn update_balance(&self, username: &str, balance: Decimal) -> AppResult<Visitor> {
        sqlx::query_as::<_, Visitor>(
            "UPDATE visitors SET balance = $2 WHERE username = $1 RETURNING id, username, balance",
        )
        .bind(username)
        .bind(balance)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Visitor {} not found", username)))
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM visitors WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_constraint(e, "Visitor still has loans"))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Visitor {} not found", username)));
        }
        Ok(())
    }
}
