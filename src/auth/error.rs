use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything the auth endpoints can report to a client. Wire bodies are
/// fixed `{"error": "..."}` shapes; internal failure detail stays in the
/// server log.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    DuplicateEmail,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Error creating user")]
    SignupFailed(#[source] anyhow::Error),
    #[error("Error logging in")]
    LoginFailed(#[source] anyhow::Error),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            AuthError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::SignupFailed(_) | AuthError::LoginFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            AuthError::SignupFailed(source) | AuthError::LoginFailed(source) => {
                error!(error = %source, "internal auth failure");
            }
            _ => {}
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
