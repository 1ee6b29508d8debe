//! Loan model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::ExchangeStatus;

/// Loan row joined with its visitor and artefact
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: i32,
    pub visitor_id: i32,
    pub visitor_username: String,
    pub artefact_id: i32,
    pub artefact_name: String,
    pub submitted_date: NaiveDate,
    /// Open day the artefact must be returned by, set on approval
    pub due_date: Option<NaiveDate>,
    pub status: ExchangeStatus,
}

impl Loan {
    /// Whether this is an approved loan whose due date has passed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == ExchangeStatus::Approved
            && self.due_date.map(|due| due < today).unwrap_or(false)
    }
}

/// Loan as exposed over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanDto {
    pub id: i32,
    pub username: String,
    pub artefact_id: i32,
    pub artefact_name: String,
    pub submitted_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: ExchangeStatus,
}

impl From<Loan> for LoanDto {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id,
            username: loan.visitor_username,
            artefact_id: loan.artefact_id,
            artefact_name: loan.artefact_name,
            submitted_date: loan.submitted_date,
            due_date: loan.due_date,
            status: loan.status,
        }
    }
}

/// Loan request parameters
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CreateLoanQuery {
    /// Username of the requesting visitor
    pub username: String,
    /// Artefact to borrow
    pub artefact_id: i32,
}

/// Loan list filters; at most one may be given
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LoanQuery {
    pub status: Option<ExchangeStatus>,
    pub due_date: Option<NaiveDate>,
    pub submitted_date: Option<NaiveDate>,
    pub username: Option<String>,
}

/// Status change parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpdateStatusQuery {
    pub status: ExchangeStatus,
}
