//! Authentication extractor
//!
//! Extracts and verifies bearer tokens issued by the hosted auth provider.
//! The token carries the caller's id and role; this API never issues tokens
//! itself.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use lectern_common::Role;
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The caller's uuid at the auth provider
    pub user_id: Uuid,
    /// The caller's role
    pub role: Role,
}

impl AuthUser {
    /// Reject callers that do not hold the lecturer role
    pub fn require_lecturer(&self) -> Result<(), ApiError> {
        if self.role == Role::Lecturer {
            Ok(())
        } else {
            Err(ApiError::WrongRole("lecturer"))
        }
    }

    /// Reject callers that do not hold the student role
    pub fn require_student(&self) -> Result<(), ApiError> {
        if self.role == Role::Student {
            Ok(())
        } else {
            Err(ApiError::WrongRole("student"))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        // Verify the token
        let claims = app_state
            .token_verifier()
            .verify(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::InvalidAuthFormat
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid subject in token");
            ApiError::InvalidAuthFormat
        })?;

        Ok(AuthUser {
            user_id,
            role: claims.role,
        })
    }
}
