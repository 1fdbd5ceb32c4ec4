//! Authentication and authorization primitives.
//!
//! - [`jwt`] -- HS256 access-token issuance and validation.
//! - [`extractor`] -- Axum extractor for bearer-authenticated HTTP handlers.
//!
//! Tokens are minted by the identity provider with a shared secret. The subject is a
//! username; the role stored in `users` is authoritative over the role claim.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;

use crate::models::user::find_by_username;

pub mod extractor;
pub mod jwt;

use jwt::{validate_token, JwtConfig};

/// Capability attached to an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Job seeker. Legacy rows store this as `student`.
    #[serde(alias = "student")]
    Candidate,
    Employer,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "candidate" | "student" => Some(Role::Candidate),
            "employer" => Some(Role::Employer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Employer => "employer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl Identity {
    /// Fails with [`AuthError::Forbidden`] unless the identity carries `role`.
    pub fn require(&self, role: Role) -> Result<(), AuthError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                required: role,
                actual: self.role,
            })
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Unknown user")]
    UnknownUser,

    #[error("Unauthorized: {required} role required, got {actual}")]
    Forbidden { required: Role, actual: Role },

    #[error("Identity lookup failed: {0}")]
    Lookup(#[from] sqlx::Error),
}

/// Resolves an opaque bearer token to an [`Identity`].
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Production authenticator: JWT signature/expiry check followed by a user lookup.
#[derive(Clone)]
pub struct JwtAuthenticator {
    jwt: JwtConfig,
    db: PgPool,
}

impl JwtAuthenticator {
    pub fn new(jwt: JwtConfig, db: PgPool) -> Self {
        Self { jwt, db }
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = validate_token(token, &self.jwt).map_err(|_| AuthError::InvalidToken)?;

        let user = find_by_username(&self.db, &claims.sub)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        let role = Role::parse(&user.role).ok_or(AuthError::UnknownUser)?;

        Ok(Identity {
            user_id: user.id,
            username: user.username,
            role,
        })
    }
}
