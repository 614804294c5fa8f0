use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ValidationError;
use crate::services::mailer::DispatchError;
use crate::services::NotifyError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::MissingCredential => {
                AppError::Configuration(NotifyError::MissingCredential.to_string())
            }
            NotifyError::Dispatch(e) => AppError::Dispatch(e),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(e) => {
                warn!(error = %e, "Rejected reservation");
            }
            AppError::Configuration(msg) => {
                error!(message = %msg, "Configuration error");
            }
            AppError::Dispatch(e) => {
                error!(error = ?e, "Failed to dispatch reservation emails");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        match self {
            AppError::Validation(e) => error_response(status, e.to_string(), None),
            AppError::Configuration(msg) => error_response(status, msg, None),
            AppError::Dispatch(e) => error_response(
                status,
                "failed to send reservation",
                Some(e.to_string()),
            ),
        }
    }
}
