//! Bearer-token extractor for Axum handlers.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::{AuthError, Identity};
use crate::errors::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from the `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        match state.authenticator.authenticate(token).await {
            Ok(identity) => Ok(AuthUser(identity)),
            Err(AuthError::Lookup(e)) => Err(AppError::Database(e)),
            Err(_) => Err(AppError::Unauthorized),
        }
    }
}
