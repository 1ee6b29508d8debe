//! Open days repository for database operations

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use super::OpenDaysRepository;
use crate::{
    error::{AppError, AppResult},
    models::open_day::OpenDay,
};

#[derive(Clone)]
pub struct PgOpenDaysRepository {
    pool: Pool<Postgres>,
}

impl PgOpenDaysRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OpenDaysRepository for PgOpenDaysRepository {
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<OpenDay>> {
        let day = sqlx::query_as::<_, OpenDay>("SELECT id, date FROM open_days WHERE date = $1")
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(day)
    }

    async fn first_on_or_after(&self, date: NaiveDate) -> AppResult<Option<OpenDay>> {
        let day = sqlx::query_as::<_, OpenDay>(
            "SELECT id, date FROM open_days WHERE date >= $1 ORDER BY date LIMIT 1",
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(day)
    }

    async fn list(&self) -> AppResult<Vec<OpenDay>> {
        let days = sqlx::query_as::<_, OpenDay>("SELECT id, date FROM open_days ORDER BY date")
            .fetch_all(&self.pool)
            .await?;
        Ok(days)
    }

    async fn create(&self, date: NaiveDate) -> AppResult<OpenDay> {
        sqlx::query_as::<_, OpenDay>("INSERT INTO open_days (date) VALUES ($1) RETURNING id, date")
            .bind(date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_constraint(e, &format!("Open day {} already exists", date)))
    }

    async fn delete(&self, date: NaiveDate) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM open_days WHERE date = $1")
            .bind(date)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_constraint(e, "Loans are due on this open day"))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Open day {} not found", date)));
        }
        Ok(())
    }
}
