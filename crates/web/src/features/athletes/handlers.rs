use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        athlete::{
            AthleteFilter, AthleteResponse, AthleteSummary, CreateAthleteRequest,
            UpdateAthleteRequest,
        },
        common::{LimitOffsetParams, PaginatedResponse},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, PathParams, QueryParams};

use super::services;

#[utoipa::path(
    post,
    path = "/atletas",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 400, description = "Validation error, or category / training center not found"),
        (status = 303, description = "An athlete with this CPF already exists"),
        (status = 500, description = "Unexpected database error")
    ),
    tag = "atletas"
)]
pub async fn create_athlete(
    State(db): State<Database>,
    JsonBody(req): JsonBody<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = services::create_athlete(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(AthleteResponse::from(athlete))).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/all",
    params(LimitOffsetParams),
    responses(
        (status = 200, description = "Page of athletes", body = PaginatedResponse<AthleteResponse>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "No athletes registered")
    ),
    tag = "atletas"
)]
pub async fn list_athletes_paginated(
    State(db): State<Database>,
    QueryParams(params): QueryParams<LimitOffsetParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (athletes, total_items) = services::list_athletes_paginated(db.pool(), &params).await?;

    let items: Vec<AthleteResponse> = athletes.into_iter().map(AthleteResponse::from).collect();
    let response = PaginatedResponse::new(items, params, total_items);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas",
    params(AthleteFilter),
    responses(
        (status = 200, description = "Athletes matching the filters", body = Vec<AthleteSummary>),
        (status = 404, description = "No athlete matches the filters")
    ),
    tag = "atletas"
)]
pub async fn list_athletes(
    State(db): State<Database>,
    QueryParams(filter): QueryParams<AthleteFilter>,
) -> Result<Response, WebError> {
    let athletes = services::search_athletes(db.pool(), &filter).await?;

    let response: Vec<AthleteSummary> = athletes.into_iter().map(AthleteSummary::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    patch,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete ID")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error, or category / training center not found"),
        (status = 303, description = "Another athlete already uses this CPF"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn update_athlete(
    State(db): State<Database>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(update_req): JsonBody<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_athlete(db.pool(), id, &update_req).await?;

    Ok(Json(AthleteResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete ID")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn delete_athlete(
    State(db): State<Database>,
    PathParams(id): PathParams<Uuid>,
) -> Result<Response, WebError> {
    services::delete_athlete(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
