//! Open day model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Calendar day the museum is open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OpenDay {
    pub id: i32,
    pub date: NaiveDate,
}

/// Create open day request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOpenDay {
    pub date: NaiveDate,
}
