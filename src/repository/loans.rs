//! Loans repository for database operations

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use super::LoansRepository;
use crate::{
    error::{AppError, AppResult},
    models::{enums::ExchangeStatus, loan::Loan},
};

const LOAN_COLUMNS: &str = r#"
    SELECT l.id, l.visitor_id, v.username AS visitor_username,
           l.artefact_id, a.name AS artefact_name,
           l.submitted_date, l.due_date, l.status
"#;

const LOAN_JOINS: &str = r#"
    JOIN visitors v ON v.id = l.visitor_id
    JOIN artefacts a ON a.id = l.artefact_id
"#;

#[derive(Clone)]
pub struct PgLoansRepository {
    pool: Pool<Postgres>,
}

impl PgLoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn select(filter: &str) -> String {
        format!("{} FROM loans l {} {} ORDER BY l.id", LOAN_COLUMNS, LOAN_JOINS, filter)
    }
}

#[async_trait]
impl LoansRepository for PgLoansRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(&Self::select("WHERE l.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(loan)
    }

    async fn list(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(&Self::select(""))
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    async fn list_by_status(&self, status: ExchangeStatus) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(&Self::select("WHERE l.status = $1"))
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    async fn list_by_due_date(&self, due_date: NaiveDate) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(&Self::select("WHERE l.due_date = $1"))
            .bind(due_date)
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    async fn list_by_submitted_date(&self, submitted_date: NaiveDate) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(&Self::select("WHERE l.submitted_date = $1"))
            .bind(submitted_date)
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    async fn list_by_visitor(&self, visitor_id: i32) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(&Self::select("WHERE l.visitor_id = $1"))
            .bind(visitor_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    async fn create(&self, visitor_id: i32, artefact_id: i32, submitted_date: NaiveDate) -> AppResult<Loan> {
        let query = format!(
            r#"
            WITH l AS (
                INSERT INTO loans (visitor_id, artefact_id, submitted_date, status)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            {} FROM l {}
            "#,
            LOAN_COLUMNS, LOAN_JOINS
        );

        let loan = sqlx::query_as::<_, Loan>(&query)
            .bind(visitor_id)
            .bind(artefact_id)
            .bind(submitted_date)
            .bind(ExchangeStatus::Pending)
            .fetch_one(&self.pool)
            .await?;
        Ok(loan)
    }

    async fn approve(&self, id: i32, due_date: NaiveDate) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let artefact_id: i32 = sqlx::query_scalar(
            "UPDATE loans SET status = $2, due_date = $3 WHERE id = $1 RETURNING artefact_id",
        )
        .bind(id)
        .bind(ExchangeStatus::Approved)
        .bind(due_date)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))?;

        let marked = sqlx::query(
            "UPDATE artefacts SET currently_on_loan = TRUE WHERE id = $1 AND NOT currently_on_loan",
        )
        .bind(artefact_id)
        .execute(&mut *tx)
        .await?;

        // Dropping the transaction rolls back the status change
        if marked.rows_affected() == 0 {
            return Err(AppError::Validation(
                "This item is unavailable for loan.".to_string(),
            ));
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let (artefact_id, status) = sqlx::query_as::<_, (i32, ExchangeStatus)>(
            "DELETE FROM loans WHERE id = $1 RETURNING artefact_id, status",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))?;

        if status == ExchangeStatus::Approved {
            sqlx::query("UPDATE artefacts SET currently_on_loan = FALSE WHERE id = $1")
                .bind(artefact_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
