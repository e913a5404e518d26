use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ShowError {
    #[error("Show {0} not found")]
    NotFound(String),

    #[error("Invalid show id: {0}")]
    InvalidId(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Show {id} could not be decoded: {reason}")]
    Decode { id: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ShowError {
    pub fn decode(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type ShowResult<T> = Result<T, ShowError>;

/// Convert ShowError to AppError for standardized error responses
impl From<ShowError> for AppError {
    fn from(err: ShowError) -> Self {
        match err {
            ShowError::NotFound(id) => AppError::NotFound(format!("Show {} not found", id)),
            ShowError::InvalidId(raw) => AppError::InvalidObjectId(raw),
            ShowError::Validation(errors) => AppError::ValidationError(errors),
            ShowError::Decode { id, reason } => {
                AppError::DocumentDecode(format!("show {}: {}", id, reason))
            }
            ShowError::Database(DatabaseError::Mongo(e)) => AppError::Database(e),
            ShowError::Database(other) => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for ShowError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
