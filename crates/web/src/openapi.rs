use utoipa::OpenApi;

use crate::features;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workout API",
        description = "Athletes, categories and training centers"
    ),
    paths(
        features::athletes::handlers::create_athlete,
        features::athletes::handlers::list_athletes_paginated,
        features::athletes::handlers::list_athletes,
        features::athletes::handlers::update_athlete,
        features::athletes::handlers::delete_athlete,
        features::categories::handlers::list_categories,
        features::categories::handlers::get_category,
        features::categories::handlers::create_category,
        features::training_centers::handlers::list_training_centers,
        features::training_centers::handlers::get_training_center,
        features::training_centers::handlers::create_training_center,
        features::health::health,
    ),
    components(
        schemas(
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteResponse,
            storage::dto::athlete::AthleteSummary,
            storage::dto::athlete::ReferenceName,
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::training_center::CreateTrainingCenterRequest,
            storage::dto::training_center::TrainingCenterResponse,
            storage::dto::common::PaginationMeta,
        )
    ),
    tags(
        (name = "atletas", description = "Athlete endpoints"),
        (name = "categorias", description = "Category endpoints"),
        (name = "centros_treinamento", description = "Training center endpoints"),
        (name = "health", description = "Liveness check"),
    )
)]
pub struct ApiDoc;
