use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use contracts::shared::catalogue::CatalogueError;

/// Ошибки HTTP API; тело ответа всегда `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown catalogue: {0}")]
    UnknownEntity(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Catalogue is not initialized")]
    NotInitialized,

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownEntity(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Catalogue(CatalogueError::UnknownField { .. })
            | ApiError::Catalogue(CatalogueError::InvalidFieldPath(_)) => StatusCode::BAD_REQUEST,
            ApiError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Catalogue(CatalogueError::Serialization(_)) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::UnknownEntity("users".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidId("x".into()).status(), StatusCode::BAD_REQUEST);
        let unknown_field = CatalogueError::UnknownField {
            entity: "test_tiles".into(),
            field: "secret".into(),
        };
        assert_eq!(ApiError::from(unknown_field).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(anyhow::anyhow!("disk")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::NotFound("tile".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
