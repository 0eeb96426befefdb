use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::{ValidationErrors, ValidationErrorsKind};

const INTERNAL_ERROR_MESSAGE: &str = "Ocorreu um erro interno no servidor";

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    /// The request could not be extracted (body, path or query string)
    Rejected { status: StatusCode, message: String },
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Rejected { message, .. } => write!(f, "Rejected request: {}", message),
        }
    }
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ReferenceNotFound(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::ConstraintViolation { .. }) => StatusCode::SEE_OTHER,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(StorageError::NotFound(msg))
            | Self::Storage(StorageError::ReferenceNotFound(msg)) => {
                json!({
                    "detail": msg
                })
            }
            Self::Storage(StorageError::ConstraintViolation { message, source }) => {
                tracing::error!(error = ?source, "Constraint violation: {}", message);
                json!({
                    "detail": message
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "detail": INTERNAL_ERROR_MESSAGE
                })
            }
            Self::Validation(errors) => {
                let mut field_errors = Vec::new();
                collect_validation_messages("", errors, &mut field_errors);
                field_errors.sort();

                json!({
                    "detail": "Falha na validação dos dados",
                    "errors": field_errors
                })
            }
            Self::BadRequest(msg) | Self::Rejected { message: msg, .. } => {
                json!({
                    "detail": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

/// Flatten nested validation errors into `path.to.field: message` lines
fn collect_validation_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                out.extend(errors.iter().map(|e| {
                    format!(
                        "{}: {}",
                        path,
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    )
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(&path, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
