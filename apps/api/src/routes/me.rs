use axum::{extract::State, Json};

use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::models::user::{find_by_username, User};
use crate::state::AppState;

/// GET /me
pub async fn me_handler(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<User>, AppError> {
    let user = find_by_username(&state.db, &identity.username)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(user))
}
