use axum::http::StatusCode;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use bruteguard_core::error::GuardError;
use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    fn get_error_msg(&self) -> (StatusCode, String) {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string())
    }

    pub fn invalid_ip(ip: &str) -> Self {
        AppError::InvalidInput(format!("'{ip}' is not a valid IP address"))
    }
}

impl From<GuardError> for AppError {
    fn from(e: GuardError) -> Self {
        match e {
            GuardError::NotFound(_) => AppError::NotFound(e.to_string()),
            GuardError::AlreadyExists(_) | GuardError::AlreadyExistsIn { .. } => {
                AppError::Conflict(e.to_string())
            }
            GuardError::InvalidPrefix(_) => AppError::InvalidInput(e.to_string()),
            GuardError::Infrastructure(_) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.get_error_msg();
        let body = serde_json::json!({ "error": true, "message": body });
        (status, Json(body)).into_response()
    }
}
