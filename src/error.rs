use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DeskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Login required")]
    Unauthenticated,

    #[error("Action requires the admin role")]
    Forbidden,

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<JsonRejection> for DeskError {
    fn from(rejection: JsonRejection) -> Self {
        DeskError::InvalidValue(rejection.body_text())
    }
}

impl From<PathRejection> for DeskError {
    fn from(rejection: PathRejection) -> Self {
        DeskError::InvalidValue(rejection.body_text())
    }
}

impl IntoResponse for DeskError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            DeskError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Folder or file not found.".to_string(),
            ),
            DeskError::DatabaseError(_)
            | DeskError::Io(_)
            | DeskError::Config(_)
            | DeskError::UnexpectedError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred.".to_string(),
            ),
            DeskError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                self.to_string(),
            ),
            DeskError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", self.to_string())
            }
            DeskError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", self.to_string()),
            DeskError::SectionNotFound(_)
            | DeskError::FileNotFound(_)
            | DeskError::SheetNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            DeskError::Workbook(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNREADABLE_WORKBOOK",
                "The workbook could not be read.".to_string(),
            ),
            DeskError::InvalidValue(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
