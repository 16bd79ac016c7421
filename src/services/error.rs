use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

use crate::utils::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Locked(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Locked(_) | ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Never leak driver messages to clients
        let message = match self {
            ServiceError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": message
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let validation = ServiceError::from(ValidationError::NegativeScore(-1));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::Locked("kicked off".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ServiceError::Forbidden("no".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ServiceError::Unauthorized("no".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ServiceError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_auth_errors_use_the_envelope() {
        let response = ServiceError::Unauthorized("Invalid token".into()).error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Invalid token");
    }
}
