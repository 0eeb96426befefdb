use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::category::{CategoryResponse, CreateCategoryRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{JsonBody, PathParams};

use super::services;

#[utoipa::path(
    get,
    path = "/categorias",
    responses(
        (status = 200, description = "List all categories", body = Vec<CategoryResponse>)
    ),
    tag = "categorias"
)]
pub async fn list_categories(State(db): State<Database>) -> Result<Response, WebError> {
    let categories = services::list_categories(db.pool()).await?;

    let response: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_category(
    State(db): State<Database>,
    PathParams(id): PathParams<Uuid>,
) -> Result<Response, WebError> {
    let category = services::get_category(db.pool(), id).await?;

    Ok(Json(CategoryResponse::from(category)).into_response())
}

#[utoipa::path(
    post,
    path = "/categorias",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 303, description = "A category with this name already exists")
    ),
    tag = "categorias"
)]
pub async fn create_category(
    State(db): State<Database>,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let category = services::create_category(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response())
}
