//! Business logic services

pub mod artefacts;
pub mod loans;
pub mod manager;
pub mod open_days;
pub mod visitors;

use crate::{config::LoansConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub loans: loans::LoansService,
    pub visitors: visitors::VisitorsService,
    pub artefacts: artefacts::ArtefactsService,
    pub open_days: open_days::OpenDaysService,
    pub manager: manager::ManagerService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, loans_config: LoansConfig) -> Self {
        Self {
            loans: loans::LoansService::new(repository.clone(), loans_config),
            visitors: visitors::VisitorsService::new(repository.clone()),
            artefacts: artefacts::ArtefactsService::new(repository.clone()),
            open_days: open_days::OpenDaysService::new(repository.clone()),
            manager: manager::ManagerService::new(repository),
        }
    }
}
