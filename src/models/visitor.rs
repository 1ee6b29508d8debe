//! Visitor model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Museum visitor able to request loans
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Visitor {
    #[serde(skip)]
    pub id: i32,
    pub username: String,
    /// Outstanding amount owed to the museum
    pub balance: Decimal,
}

/// Create visitor request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVisitor {
    #[validate(length(min = 3, max = 64, message = "Username must be between 3 and 64 characters"))]
    pub username: String,
    pub balance: Option<Decimal>,
}

/// Update balance request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBalance {
    pub balance: Decimal,
}
