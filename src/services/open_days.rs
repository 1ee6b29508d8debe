//! Open day calendar service

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::open_day::OpenDay,
    repository::Repository,
};

#[derive(Clone)]
pub struct OpenDaysService {
    repository: Repository,
}

impl OpenDaysService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<OpenDay>> {
        self.repository.open_days.list().await
    }

    pub async fn get(&self, date: NaiveDate) -> AppResult<OpenDay> {
        self.repository
            .open_days
            .find_by_date(date)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Open day {} not found", date)))
    }

    pub async fn create(&self, date: NaiveDate) -> AppResult<OpenDay> {
        let day = self.repository.open_days.create(date).await?;
        tracing::info!("Added open day {}", day.date);
        Ok(day)
    }

    pub async fn delete(&self, date: NaiveDate) -> AppResult<()> {
        self.repository.open_days.delete(date).await
    }
}
