// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::user::ROLE_EDITOR, state::AppState};

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    pub username: String,
    /// User's role (e.g., 'student', 'editor').
    pub role: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// The raw bearer token of the current request, kept so logout can revoke it.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Signs a new JWT for the user.
///
/// Arguments:
/// * `id`: User ID.
/// * `username`: Login name, echoed back by `/users/me`.
/// * `role`: User role.
pub fn sign_jwt(
    id: i64,
    username: &str,
    role: &str,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    // Calculate expiration: current time + expiration_seconds
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: id.to_string(),
        username: username.to_owned(),
        role: role.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a JWT string.
///
/// Returns the `Claims` if valid, otherwise returns an `AppError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

/// Axum Middleware: Authentication.
///
/// Intercepts requests, validates the 'Authorization: Bearer <token>' header
/// and rejects tokens that were revoked by logout.
/// If valid, injects `Claims` and the raw token into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token.to_owned(),
        None => {
            return Err(AppError::AuthError(
                "No authorization value provided".to_string(),
            ));
        }
    };

    let claims = verify_jwt(&token, &state.config.jwt_secret)?;

    if state.revoked.is_revoked(&token).await {
        tracing::warn!("Rejected revoked token for '{}'", claims.username);
        return Err(AppError::AuthError("JWT token is revoked".to_string()));
    }

    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(BearerToken(token));
    Ok(next.run(req).await)
}

/// Axum Middleware: Editor Authorization.
///
/// Must be used AFTER `auth_middleware`. Checks if the injected `Claims` has 'editor' role.
pub async fn editor_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or(AppError::AuthError("Missing credentials".to_string()))?;

    if claims.role != ROLE_EDITOR {
        return Err(AppError::Forbidden(
            "Only editors are allowed to view statistics".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_token_round_trips_claims() {
        let token = sign_jwt(7, "ed", "editor", "secret", 60).unwrap();
        let claims = verify_jwt(&token, "secret").unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "ed");
        assert_eq!(claims.role, "editor");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = sign_jwt(7, "ed", "editor", "secret", 60).unwrap();
        assert!(matches!(
            verify_jwt(&token, "other"),
            Err(AppError::AuthError(_))
        ));
    }
}
