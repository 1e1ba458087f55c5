use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};

use super::{Claims, TokenIssuer};
use crate::error::ApiError;

/// Extractor for authenticated requests, carries the verified token claims.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    pub fn username(&self) -> &str {
        &self.0.sub
    }
}

impl FromRequest for Auth {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Auth))
    }
}

fn authenticate(req: &HttpRequest) -> Result<Claims, ApiError> {
    let tokens = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("token issuer not configured")))?;
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::Unauthorized("missing authorization header"))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized("invalid authorization format"))?;

    tokens.verify(token.trim()).map_err(|e| {
        log::debug!("rejected bearer token: {e}");
        ApiError::Unauthorized("invalid or expired token")
    })
}
