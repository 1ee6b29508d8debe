//! Artefacts repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::ArtefactsRepository;
use crate::{
    error::{AppError, AppResult},
    models::artefact::{Artefact, CreateArtefact, UpdateArtefact},
};

#[derive(Clone)]
pub struct PgArtefactsRepository {
    pool: Pool<Postgres>,
}

impl PgArtefactsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtefactsRepository for PgArtefactsRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Artefact>> {
        let artefact = sqlx::query_as::<_, Artefact>("SELECT * FROM artefacts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(artefact)
    }

    async fn list(&self) -> AppResult<Vec<Artefact>> {
        let rows = sqlx::query_as::<_, Artefact>("SELECT * FROM artefacts ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, data: &CreateArtefact) -> AppResult<Artefact> {
        let row = sqlx::query_as::<_, Artefact>(
            r#"
            INSERT INTO artefacts (name, description, can_loan, currently_on_loan)
            VALUES ($1, $2, $3, FALSE)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.can_loan)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateArtefact) -> AppResult<Artefact> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.description, "description");
        add_field!(data.can_loan, "can_loan");

        if sets.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Artefact {} not found", id)));
        }

        let query = format!("UPDATE artefacts SET {} WHERE id = $1 RETURNING *", sets.join(", "));

        let mut builder = sqlx::query_as::<_, Artefact>(&query).bind(id);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.description);
        bind_field!(data.can_loan);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artefact {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM artefacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_constraint(e, "Artefact is referenced by loans"))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Artefact {} not found", id)));
        }
        Ok(())
    }
}
