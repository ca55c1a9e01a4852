//! Error handling module for the gateway.
//!
//! Provides centralized error types with mapping to HTTP status codes and problem bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::{EntityKind, FieldError};

/// Error keys, as carried in `errorKey` and `message` of the error body.
pub mod codes {
    pub const NOT_FOUND: &str = "notfound";
    pub const VALIDATION_ERROR: &str = "validation";
    pub const ID_EXISTS: &str = "idexists";
    pub const ID_NULL: &str = "idnull";
    pub const ID_INVALID: &str = "idinvalid";
    pub const ID_NOT_FOUND: &str = "idnotfound";
    pub const INTERNAL_ERROR: &str = "internal";
    pub const DATABASE_ERROR: &str = "database";
    pub const SEARCH_ERROR: &str = "search";
    pub const BAD_REQUEST: &str = "badrequest";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Entity failed field validation
    Validation {
        entity: EntityKind,
        errors: Vec<FieldError>,
    },
    /// Request rejected for an entity-specific reason (id checks)
    BadRequestAlert {
        entity: EntityKind,
        key: &'static str,
        message: String,
    },
    /// Database error
    Database(String),
    /// Search index error
    Search(String),
    /// Internal server error
    Internal(String),
    /// Malformed request
    BadRequest(String),
}

impl AppError {
    pub fn id_exists(entity: EntityKind) -> Self {
        AppError::BadRequestAlert {
            entity,
            key: codes::ID_EXISTS,
            message: format!("A new {} cannot already have an ID", entity),
        }
    }

    pub fn id_null(entity: EntityKind) -> Self {
        AppError::BadRequestAlert {
            entity,
            key: codes::ID_NULL,
            message: "Invalid id".to_string(),
        }
    }

    pub fn id_invalid(entity: EntityKind) -> Self {
        AppError::BadRequestAlert {
            entity,
            key: codes::ID_INVALID,
            message: "Invalid ID".to_string(),
        }
    }

    pub fn id_not_found(entity: EntityKind) -> Self {
        AppError::BadRequestAlert {
            entity,
            key: codes::ID_NOT_FOUND,
            message: "Entity not found".to_string(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequestAlert { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error key for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation { .. } => codes::VALIDATION_ERROR,
            AppError::BadRequestAlert { key, .. } => key,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Search(_) => codes::SEARCH_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation { errors, .. } => errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
            AppError::BadRequestAlert { message, .. } => message.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::Search(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }

    fn entity(&self) -> Option<EntityKind> {
        match self {
            AppError::Validation { entity, .. } | AppError::BadRequestAlert { entity, .. } => {
                Some(*entity)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<tantivy::TantivyError> for AppError {
    fn from(err: tantivy::TantivyError) -> Self {
        tracing::error!("Search error: {:?}", err);
        AppError::Search(format!("Search error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

/// Field-level detail in a validation error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldErrorBody {
    pub field: String,
    pub message: String,
}

/// Problem type carried by every error body.
pub const PROBLEM_TYPE: &str = "about:blank";

/// Problem-style error body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(rename = "type", default)]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    /// Translation key, `error.{errorKey}`.
    pub message: String,
    pub error_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldErrorBody>,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let field_errors = match error {
            AppError::Validation { errors, .. } => errors
                .iter()
                .map(|e| FieldErrorBody {
                    field: e.field.to_string(),
                    message: e.message.clone(),
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            problem_type: PROBLEM_TYPE.to_string(),
            title: error.message(),
            status: error.status_code().as_u16(),
            message: format!("error.{}", error.error_code()),
            error_key: error.error_code().to_string(),
            entity_name: error.entity().map(|e| e.as_str().to_string()),
            field_errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (status, Json(ErrorResponse::new(&self))).into_response()
    }
}
