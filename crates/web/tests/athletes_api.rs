//! Router-level tests for requests rejected before any database access.
//!
//! The router runs over a lazily-connected pool, so these tests pass without
//! a PostgreSQL server.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use axum::response::Response;
use common::{athlete_payload, body_json, build_offline_app, delete, get, patch_json, post_json};
use serde_json::json;

const SOME_ID: &str = "0b6f5f0e-1111-4222-8333-444455556666";

/// Rejections carry the same JSON error body as every other failure.
async fn assert_detail_body(response: Response) -> String {
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let json = body_json(response).await;
    json["detail"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_with_invalid_profile_returns_400_with_field_errors() {
    let mut payload = athlete_payload("Joao", "123", "CrossFit", "CT Alpha");
    payload["sexo"] = json!("X");

    let response = post_json(build_offline_app(), "/atletas", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_with_empty_category_name_returns_400() {
    let payload = athlete_payload("Joao", "111.111.111-11", "", "CT Alpha");

    let response = post_json(build_offline_app(), "/atletas", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected() {
    let response = post_json(build_offline_app(), "/atletas", json!({ "nome": "Joao" })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = assert_detail_body(response).await;
    assert!(detail.contains("cpf"));
}

#[tokio::test]
async fn create_without_json_content_type_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/atletas")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("nome=Joao"))
        .unwrap();

    let response = common::send(build_offline_app(), request).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_detail_body(response).await;
}

#[tokio::test]
async fn create_with_malformed_json_returns_detail() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/atletas")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"nome\": "))
        .unwrap();

    let response = common::send(build_offline_app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_detail_body(response).await;
}

#[tokio::test]
async fn paginated_list_rejects_out_of_range_limit() {
    let response = get(build_offline_app(), "/atletas/all?limit=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_offline_app(), "/atletas/all?limit=500").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_offline_app(), "/atletas/all?offset=-3").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn paginated_list_rejects_non_numeric_params() {
    let response = get(build_offline_app(), "/atletas/all?limit=ten").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let detail = assert_detail_body(response).await;
    assert!(detail.contains("query string"));
}

#[tokio::test]
async fn patch_with_malformed_id_returns_400() {
    let response = patch_json(
        build_offline_app(),
        "/atletas/not-a-uuid",
        json!({ "nome": "Maria" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let detail = assert_detail_body(response).await;
    assert!(detail.contains("UUID"));
}

#[tokio::test]
async fn patch_cannot_touch_id_or_created_at() {
    let uri = format!("/atletas/{SOME_ID}");

    let response = patch_json(build_offline_app(), &uri, json!({ "id": SOME_ID })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = assert_detail_body(response).await;
    assert!(detail.contains("unknown field"));

    let response = patch_json(
        build_offline_app(),
        &uri,
        json!({ "created_at": "2024-01-01T00:00:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn patch_with_invalid_values_returns_400() {
    let uri = format!("/atletas/{SOME_ID}");

    let response = patch_json(build_offline_app(), &uri, json!({ "nome": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch_json(build_offline_app(), &uri, json!({ "peso": -1 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_with_malformed_id_returns_400() {
    let response = delete(build_offline_app(), "/atletas/123").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_detail_body(response).await;
}

#[tokio::test]
async fn category_lookup_with_malformed_id_returns_detail() {
    let response = get(build_offline_app(), "/categorias/not-a-uuid").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_detail_body(response).await;
}

#[tokio::test]
async fn category_create_validates_name_length() {
    let response = post_json(
        build_offline_app(),
        "/categorias",
        json!({ "nome": "Levantamento Olimpico" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn training_center_create_validates_fields() {
    let response = post_json(
        build_offline_app(),
        "/centros_treinamento",
        json!({ "nome": "CT Alpha", "endereco": "", "proprietario": "Marcos" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_lists_athlete_routes() {
    let response = get(build_offline_app(), "/api-docs/openapi.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let paths = json["paths"].as_object().unwrap();
    assert!(paths.contains_key("/atletas"));
    assert!(paths.contains_key("/atletas/all"));
    assert!(paths.contains_key("/atletas/{id}"));
    assert!(paths.contains_key("/categorias"));
    assert!(paths.contains_key("/centros_treinamento"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(build_offline_app(), "/treinos").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
