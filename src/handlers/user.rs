// src/handlers/user.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::user::UserProfile,
    stats::StatsEngine,
    utils::jwt::Claims,
};

/// Profile of the logged-in user.
pub async fn get_me(
    State(engine): State<StatsEngine>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = engine
        .store()
        .find_user(&claims.username)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserProfile::from(user)))
}
