use sqlx::PgPool;
use storage::{
    dto::{
        athlete::{AthleteFilter, CreateAthleteRequest, UpdateAthleteRequest},
        common::LimitOffsetParams,
    },
    error::{Result, StorageError},
    models::AthleteRecord,
    repository::athlete::AthleteRepository,
};
use uuid::Uuid;

/// One page of athletes and the total count. An empty collection is an error.
pub async fn list_athletes_paginated(
    pool: &PgPool,
    params: &LimitOffsetParams,
) -> Result<(Vec<AthleteRecord>, i64)> {
    let repo = AthleteRepository::new(pool);
    let (athletes, total_items) = repo.list_paginated(params).await?;

    if total_items == 0 {
        return Err(StorageError::NotFound("Nenhum atleta encontrado".to_string()));
    }

    Ok((athletes, total_items))
}

/// Athletes matching the filter. No matches is an error.
pub async fn search_athletes(pool: &PgPool, filter: &AthleteFilter) -> Result<Vec<AthleteRecord>> {
    let repo = AthleteRepository::new(pool);
    let athletes = repo.search(filter).await?;

    if athletes.is_empty() {
        return Err(StorageError::NotFound(
            "Nenhum atleta encontrado com os critérios fornecidos".to_string(),
        ));
    }

    Ok(athletes)
}

/// Create a new athlete
pub async fn create_athlete(pool: &PgPool, request: &CreateAthleteRequest) -> Result<AthleteRecord> {
    let repo = AthleteRepository::new(pool);
    let athlete = repo.create(request).await?;

    tracing::info!(athlete_id = %athlete.id, "Athlete created");
    Ok(athlete)
}

/// Update an athlete
pub async fn update_athlete(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<AthleteRecord> {
    let repo = AthleteRepository::new(pool);
    repo.update(id, request).await
}

/// Delete an athlete
pub async fn delete_athlete(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.delete(id).await?;

    tracing::info!(athlete_id = %id, "Athlete deleted");
    Ok(())
}
