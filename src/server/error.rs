use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use tally::OperationError;

pub(crate) enum ServerError {
    NotFound(String),
    InvalidInput(String),
    InternalError(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::NotFound(msg) => format!("Resource not found: {}", msg),
            Self::InvalidInput(msg) => msg,
            Self::InternalError(msg) => format!("Internal error: {}", msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<OperationError> for ServerError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::InvalidInput(_) => Self::InvalidInput(err.to_string()),
            OperationError::PersistenceFailed(_) => Self::InternalError(err.to_string()),
        }
    }
}
