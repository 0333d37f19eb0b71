//! Authentication middleware and extractors.
//!
//! This module provides extractors for:
//! - `AuthUser` - End-user authentication via JWT bearer token
//! - `ServiceAuth` - Service-to-service authentication via API key

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use glint_coins_core::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated user extracted from a JWT bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user ID.
    pub user_id: UserId,
    /// The raw subject claim from the token.
    pub subject: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let Some(secret) = state.config.auth_secret.as_ref() else {
            // Dev mode: no secret configured, accept "test-token:<user-uuid>".
            let user_id_str = token
                .strip_prefix("test-token:")
                .ok_or(ApiError::Unauthorized)?;
            let user_id = user_id_str
                .parse::<UserId>()
                .map_err(|_| ApiError::Unauthorized)?;

            return Ok(AuthUser {
                user_id,
                subject: user_id_str.to_string(),
            });
        };

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[state.config.auth_audience.as_str()]);

        let data = jsonwebtoken::decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            ApiError::Unauthorized
        })?;

        let user_id = data
            .claims
            .sub
            .parse::<UserId>()
            .map_err(|_| ApiError::Unauthorized)?;

        Ok(AuthUser {
            user_id,
            subject: data.claims.sub,
        })
    }
}

/// Service authentication via API key.
///
/// Used for admin routes and service-to-service requests (e.g., from the
/// streaming or messaging backends).
#[derive(Debug, Clone)]
pub struct ServiceAuth {
    /// The service name or identifier.
    pub service_name: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ServiceAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let expected_key = state
            .config
            .service_api_key
            .as_ref()
            .ok_or(ApiError::Unauthorized)?;

        if api_key != expected_key {
            return Err(ApiError::Unauthorized);
        }

        let service_name = parts
            .headers
            .get("x-service-name")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        Ok(ServiceAuth { service_name })
    }
}

/// JWT claims for user tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID).
    pub sub: String,
    /// Audience.
    pub aud: String,
    /// Issuer.
    pub iss: String,
    /// Expiration time.
    pub exp: i64,
    /// Issued at.
    pub iat: i64,
}
