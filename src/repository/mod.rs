//! Repository layer for database operations
//!
//! Each entity has a data-access trait; the PostgreSQL implementations live
//! in the submodules. Services only see the traits, so they can be tested
//! against mocks.

pub mod artefacts;
pub mod loans;
pub mod manager;
pub mod open_days;
pub mod visitors;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        artefact::{Artefact, CreateArtefact, UpdateArtefact},
        enums::ExchangeStatus,
        loan::Loan,
        manager::Manager,
        open_day::OpenDay,
        visitor::{CreateVisitor, Visitor},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoansRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Loan>>;

    async fn list(&self) -> AppResult<Vec<Loan>>;

    async fn list_by_status(&self, status: ExchangeStatus) -> AppResult<Vec<Loan>>;

    async fn list_by_due_date(&self, due_date: NaiveDate) -> AppResult<Vec<Loan>>;

    async fn list_by_submitted_date(&self, submitted_date: NaiveDate) -> AppResult<Vec<Loan>>;

    async fn list_by_visitor(&self, visitor_id: i32) -> AppResult<Vec<Loan>>;

    /// Insert a pending loan
    async fn create(&self, visitor_id: i32, artefact_id: i32, submitted_date: NaiveDate) -> AppResult<Loan>;

    /// Mark a loan approved with its due date and flag the artefact as on loan
    async fn approve(&self, id: i32, due_date: NaiveDate) -> AppResult<Loan>;

    /// Remove a loan, releasing its artefact if the loan was approved
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitorsRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Visitor>>;

    async fn list(&self) -> AppResult<Vec<Visitor>>;

    async fn create(&self, data: &CreateVisitor) -> AppResult<Visitor>;

    async fn update_balance(&self, username: &str, balance: Decimal) -> AppResult<Visitor>;

    async fn delete(&self, username: &str) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtefactsRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Artefact>>;

    async fn list(&self) -> AppResult<Vec<Artefact>>;

    async fn create(&self, data: &CreateArtefact) -> AppResult<Artefact>;

    async fn update(&self, id: i32, data: &UpdateArtefact) -> AppResult<Artefact>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpenDaysRepository: Send + Sync {
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<OpenDay>>;

    /// Earliest open day falling on or after `date`
    async fn first_on_or_after(&self, date: NaiveDate) -> AppResult<Option<OpenDay>>;

    async fn list(&self) -> AppResult<Vec<OpenDay>>;

    async fn create(&self, date: NaiveDate) -> AppResult<OpenDay>;

    async fn delete(&self, date: NaiveDate) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerRepository: Send + Sync {
    async fn get(&self) -> AppResult<Option<Manager>>;

    /// Insert the manager record unless it already exists
    async fn create_if_missing(&self, username: &str, password_hash: &str) -> AppResult<bool>;

    async fn update_password(&self, password_hash: &str) -> AppResult<Manager>;
}

/// Main repository struct holding one handle per entity
#[derive(Clone)]
pub struct Repository {
    pub loans: Arc<dyn LoansRepository>,
    pub visitors: Arc<dyn VisitorsRepository>,
    pub artefacts: Arc<dyn ArtefactsRepository>,
    pub open_days: Arc<dyn OpenDaysRepository>,
    pub manager: Arc<dyn ManagerRepository>,
}

impl Repository {
    /// Create PostgreSQL-backed repositories sharing the given pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            loans: Arc::new(loans::PgLoansRepository::new(pool.clone())),
            visitors: Arc::new(visitors::PgVisitorsRepository::new(pool.clone())),
            artefacts: Arc::new(artefacts::PgArtefactsRepository::new(pool.clone())),
            open_days: Arc::new(open_days::PgOpenDaysRepository::new(pool.clone())),
            manager: Arc::new(manager::PgManagerRepository::new(pool)),
        }
    }
}

#[cfg(test)]
impl Repository {
    /// Repository wired to mocks; unset mocks fail on any call
    pub fn mocked(
        loans: MockLoansRepository,
        visitors: MockVisitorsRepository,
        artefacts: MockArtefactsRepository,
        open_days: MockOpenDaysRepository,
        manager: MockManagerRepository,
    ) -> Self {
        Self {
            loans: Arc::new(loans),
            visitors: Arc::new(visitors),
            artefacts: Arc::new(artefacts),
            open_days: Arc::new(open_days),
            manager: Arc::new(manager),
        }
    }
}
