//! Data models for the museum server

pub mod artefact;
pub mod enums;
pub mod loan;
pub mod manager;
pub mod open_day;
pub mod visitor;

// Re-export commonly used types
pub use artefact::Artefact;
pub use enums::ExchangeStatus;
pub use loan::{Loan, LoanDto};
pub use manager::{Manager, ManagerDto};
pub use open_day::OpenDay;
pub use visitor::Visitor;
