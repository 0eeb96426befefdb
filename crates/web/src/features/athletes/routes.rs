use axum::{
    Router,
    routing::{get, patch},
};
use storage::Database;

use super::handlers::{
    create_athlete, delete_athlete, list_athletes, list_athletes_paginated, update_athlete,
};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_athletes).post(create_athlete))
        .route("/all", get(list_athletes_paginated))
        .route("/:id", patch(update_athlete).delete(delete_athlete))
}
