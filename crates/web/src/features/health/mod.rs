use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use storage::Database;

use crate::error::WebError;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are reachable"),
        (status = 500, description = "Database unreachable")
    ),
    tag = "health"
)]
pub async fn health(State(db): State<Database>) -> Result<Response, WebError> {
    db.ping().await?;

    Ok(Json(json!({ "status": "ok" })).into_response())
}

pub fn routes() -> Router<Database> {
    Router::new().route("/health", get(health))
}
