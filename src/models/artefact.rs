//! Artefact model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Collection object
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Artefact {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Whether the museum lends this artefact out at all
    pub can_loan: bool,
    pub currently_on_loan: bool,
}

impl Artefact {
    /// A loan request is refused only for an artefact that is both not
    /// loanable and currently out.
    pub fn is_available_for_loan(&self) -> bool {
        self.can_loan || !self.currently_on_loan
    }
}

/// Create artefact request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateArtefact {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub can_loan: bool,
}

/// Update artefact request
///
/// The on-loan flag is not settable here; it follows loan approval and
/// deletion.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateArtefact {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub can_loan: Option<bool>,
}
