// src/handlers/auth.rs

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginRequest, LoginResponse, ROLE_EDITOR},
    state::AppState,
    utils::{
        hash::verify_password,
        jwt::{BearerToken, Claims, sign_jwt},
    },
};

/// Authenticates an editor and returns a JWT token.
///
/// Unknown users and wrong passwords yield 401; users that are not editors yield 403.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = state
        .engine
        .store()
        .find_user(&payload.username)
        .await?
        .ok_or(AppError::AuthError("Invalid username".to_string()))?;

    if !verify_password(&payload.password, &user.password) {
        tracing::warn!("Failed login attempt for '{}'", user.username);
        return Err(AppError::AuthError("Invalid password".to_string()));
    }

    if user.role != ROLE_EDITOR {
        return Err(AppError::Forbidden(
            "Only editors are allowed to login".to_string(),
        ));
    }

    let token = sign_jwt(
        user.id,
        &user.username,
        &user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    tracing::info!("Editor '{}' logged in", user.username);

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
    }))
}

/// Revokes the token used for this request.
pub async fn logout(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> impl IntoResponse {
    state.revoked.revoke(&token, claims.exp).await;
    tracing::info!("Editor '{}' logged out", claims.username);
    StatusCode::NO_CONTENT
}
