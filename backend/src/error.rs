use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use common::res::ErrorResponse;

use crate::db::StoreError;

/// Failure of a request, rendered as the `{result: "nok", message}` envelope.
///
/// Client errors carry their message verbatim. [`ApiError::Internal`] keeps the
/// cause for the log only, the response says nothing about it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    NotFound(String),
    #[error("username already exists")]
    DuplicateUsername,
    #[error("internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateUsername | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Internal(cause) = self {
            log::error!("request failed: {cause:#}");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound("not found".into()),
            StoreError::DuplicateUsername => Self::DuplicateUsername,
            other => Self::Internal(other.into()),
        }
    }
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        Self::Internal(anyhow::anyhow!("blocking task failed: {err}"))
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::Internal(anyhow::Error::new(err).context("password hashing"))
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(anyhow::Error::new(err).context("token signing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.error_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn internal_details_are_not_leaked() {
        let err = ApiError::Internal(anyhow::anyhow!("disk I/O error at /var/lib/db"));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({"result": "nok", "message": "internal server error"})
        );
    }

    #[actix_web::test]
    async fn store_not_found_maps_to_404() {
        let (status, body) = body_of(StoreError::NotFound.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["result"], "nok");
    }

    #[actix_web::test]
    async fn duplicate_username_stays_server_class() {
        let (status, body) = body_of(StoreError::DuplicateUsername.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "username already exists");
    }
}
