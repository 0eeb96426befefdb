use std::time::Duration;

use axum::Router;
use storage::Database;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{athletes, categories, health, training_centers};
use crate::openapi::ApiDoc;

/// Build the application router with every feature mounted
pub fn router(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health::routes())
        .nest("/atletas", athletes::routes::routes())
        .nest("/categorias", categories::routes::routes())
        .nest("/centros_treinamento", training_centers::routes::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(db)
}
