use sqlx::PgPool;
use storage::{
    dto::training_center::CreateTrainingCenterRequest, error::Result, models::TrainingCenter,
    repository::training_center::TrainingCenterRepository,
};
use uuid::Uuid;

/// List all training centers
pub async fn list_training_centers(pool: &PgPool) -> Result<Vec<TrainingCenter>> {
    let repo = TrainingCenterRepository::new(pool);
    repo.list().await
}

/// Get training center by ID
pub async fn get_training_center(pool: &PgPool, id: Uuid) -> Result<TrainingCenter> {
    let repo = TrainingCenterRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new training center
pub async fn create_training_center(
    pool: &PgPool,
    request: &CreateTrainingCenterRequest,
) -> Result<TrainingCenter> {
    let repo = TrainingCenterRepository::new(pool);
    repo.create(request).await
}
