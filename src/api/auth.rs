//! Caller identity. Token issuance lives outside this service; we trust the
//! identity forwarded in the X-User-Id header and only check it resolves to a
//! known user.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::api::routes::ApiState;
use crate::db::models::UserRow;
use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller, resolved against the user directory.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<ApiState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let user: UserRow = sqlx::query_as(
            "SELECT id, name, email, country, onboarding, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }
}
