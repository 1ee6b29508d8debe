//! Manager account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::manager::{Manager, ManagerDto, UpdatePasswordQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct ManagerService {
    repository: Repository,
}

impl ManagerService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Seed the manager account if it does not exist yet
    pub async fn ensure_manager(&self, username: &str, password: &str) -> AppResult<()> {
        let hash = hash_password(password)?;
        if self.repository.manager.create_if_missing(username, &hash).await? {
            tracing::info!("Created manager account '{}'", username);
        }
        Ok(())
    }

    async fn find_manager(&self) -> AppResult<Manager> {
        self.repository
            .manager
            .get()
            .await?
            .ok_or_else(|| AppError::NotFound("Manager not found".to_string()))
    }

    pub async fn get_manager(&self) -> AppResult<ManagerDto> {
        self.find_manager().await.map(ManagerDto::from)
    }

    /// Replace the manager password after checking the current one
    pub async fn update_password(&self, request: &UpdatePasswordQuery) -> AppResult<ManagerDto> {
        request.validate()?;

        let manager = self.find_manager().await?;
        if !verify_password(&manager.password, &request.old_password)? {
            tracing::warn!("Rejected manager password change: incorrect password");
            return Err(AppError::Validation("Incorrect password.".to_string()));
        }
        if request.old_password == request.new_password {
            return Err(AppError::Validation(
                "The new password must differ from the old one.".to_string(),
            ));
        }

        let hash = hash_password(&request.new_password)?;
        let updated = self.repository.manager.update_password(&hash).await?;
        tracing::info!("Manager password updated");
        Ok(updated.into())
    }
}

/// Hash a password using Argon2
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
