use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::recover::RecoverError;
use crate::validate::ValidationError;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid signature")]
    InvalidSignature(#[source] RecoverError),

    #[error("Invalid signature")]
    SignerMismatch,

    #[error("proof not found")]
    NotFound,
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
            RegistryError::InvalidSignature(_) => StatusCode::BAD_REQUEST,
            RegistryError::SignerMismatch => StatusCode::BAD_REQUEST,
            RegistryError::NotFound => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
