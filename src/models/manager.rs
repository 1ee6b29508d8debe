//! Manager account model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// The single administrative account
#[derive(Debug, Clone, FromRow)]
pub struct Manager {
    pub username: String,
    /// Hashed password (argon2)
    pub password: String,
    pub modif_date: DateTime<Utc>,
}

/// Manager as exposed over the API (no password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ManagerDto {
    pub username: String,
    pub modif_date: DateTime<Utc>,
}

impl From<Manager> for ManagerDto {
    fn from(manager: Manager) -> Self {
        Self {
            username: manager.username,
            modif_date: manager.modif_date,
        }
    }
}

/// Password change parameters
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UpdatePasswordQuery {
    pub old_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}
