//! Artefact service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::artefact::{Artefact, CreateArtefact, UpdateArtefact},
    repository::Repository,
};

#[derive(Clone)]
pub struct ArtefactsService {
    repository: Repository,
}

impl ArtefactsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Artefact>> {
        self.repository.artefacts.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Artefact> {
        self.repository
            .artefacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artefact {} not found", id)))
    }

    pub async fn create(&self, data: &CreateArtefact) -> AppResult<Artefact> {
        data.validate()?;
        self.repository.artefacts.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateArtefact) -> AppResult<Artefact> {
        data.validate()?;
        self.repository.artefacts.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.artefacts.delete(id).await
    }
}
