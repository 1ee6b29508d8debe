//! Visitor service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::visitor::{CreateVisitor, Visitor},
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
}

impl VisitorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Visitor>> {
        self.repository.visitors.list().await
    }

    pub async fn get(&self, username: &str) -> AppResult<Visitor> {
        self.repository
            .visitors
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visitor {} not found", username)))
    }

    pub async fn create(&self, data: &CreateVisitor) -> AppResult<Visitor> {
        data.validate()?;
        if let Some(balance) = data.balance {
            check_balance(balance)?;
        }
        let visitor = self.repository.visitors.create(data).await?;
        tracing::info!("Created visitor {}", visitor.username);
        Ok(visitor)
    }

    /// Set the outstanding balance, e.g. after a payment
    pub async fn update_balance(&self, username: &str, balance: Decimal) -> AppResult<Visitor> {
        check_balance(balance)?;
        self.repository.visitors.update_balance(username, balance).await
    }

    pub async fn delete(&self, username: &str) -> AppResult<()> {
        self.repository.visitors.delete(username).await
    }
}

fn check_balance(balance: Decimal) -> AppResult<()> {
    if balance < Decimal::ZERO {
        return Err(AppError::Validation("Balance cannot be negative".to_string()));
    }
    Ok(())
}
