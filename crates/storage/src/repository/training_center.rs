use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::{Result, StorageError};
use crate::models::TrainingCenter;

/// Repository for TrainingCenter database operations
pub struct TrainingCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all training centers
    pub async fn list(&self) -> Result<Vec<TrainingCenter>> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT training_center_id, id, name, address, owner
            FROM training_centers
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(centers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<TrainingCenter> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT training_center_id, id, name, address, owner
            FROM training_centers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| {
            StorageError::NotFound(format!("Centro de treinamento não encontrado no id: {id}"))
        })?;

        Ok(center)
    }

    /// Create a new training center
    pub async fn create(&self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            INSERT INTO training_centers (id, name, address, owner)
            VALUES ($1, $2, $3, $4)
            RETURNING training_center_id, id, name, address, owner
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.address)
        .bind(&req.owner)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(|| {
                format!(
                    "Já existe um centro de treinamento cadastrado com o nome: {}",
                    req.name
                )
            })
        })?;

        Ok(center)
    }
}
