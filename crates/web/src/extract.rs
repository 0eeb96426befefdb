//! Request extractors whose rejections are reported as `WebError`, so a
//! malformed body, path or query string gets the same `{ "detail": ... }`
//! body as every other error.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::WebError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(WebError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(WebError))]
pub struct PathParams<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(WebError))]
pub struct QueryParams<T>(pub T);
