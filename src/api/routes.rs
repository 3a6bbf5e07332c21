use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::db::models::UserRow;
use crate::error::AppError;
use crate::service::{
    InvestmentReceipt, LeaderboardEntry, TournamentService, TournamentSummary, UserStats,
};
use crate::types::now_ms;

#[derive(Clone)]
pub struct ApiState {
    pub pool: sqlx::SqlitePool,
    pub service: TournamentService,
}

impl ApiState {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        let service = TournamentService::new(pool.clone());
        Self { pool, service }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/verify", get(verify))
        .route("/api/onboarding", post(save_onboarding))
        .route("/api/onboarding/:user_id", get(get_onboarding))
        .route("/api/tournament", get(get_current_tournament))
        .route("/api/tournament/leaderboard", get(get_leaderboard))
        .route("/api/tournament/invest", post(make_investment))
        .route("/api/tournament/user-stats", get(get_user_stats))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub country: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub country: String,
}

#[derive(Deserialize)]
pub struct InvestRequest {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn register(
    State(state): State<ApiState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO users (id, name, email, country, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(req.name.trim())
    .bind(req.email.trim())
    .bind(req.country.trim())
    .bind(now_ms())
    .execute(&state.pool)
    .await
    .map_err(|e| AppError::on_unique_violation(e, AppError::DuplicateEmail))?;

    Ok(Json(UserResponse {
        id,
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        country: req.country.trim().to_string(),
    }))
}

async fn verify(user: AuthUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
    }))
}

async fn save_onboarding(
    State(state): State<ApiState>,
    user: AuthUser,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    sqlx::query("UPDATE users SET onboarding = ? WHERE id = ?")
        .bind(payload.to_string())
        .bind(&user.id)
        .execute(&state.pool)
        .await?;
    Ok(Json(payload))
}

/// Looks up onboarding data by user id, or by email when the path segment
/// contains an '@'.
async fn get_onboarding(
    State(state): State<ApiState>,
    _caller: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let column = if user_id.contains('@') { "email" } else { "id" };
    let user: UserRow = sqlx::query_as(&format!(
        "SELECT id, name, email, country, onboarding, created_at FROM users WHERE {column} = ?"
    ))
    .bind(&user_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("User"))?;

    let data = match user.onboarding {
        Some(raw) => serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null),
        None => serde_json::Value::Null,
    };
    Ok(Json(data))
}

async fn get_current_tournament(
    State(state): State<ApiState>,
    _caller: AuthUser,
) -> Result<Json<TournamentSummary>, AppError> {
    Ok(Json(state.service.current_tournament().await?))
}

async fn get_leaderboard(
    State(state): State<ApiState>,
    caller: AuthUser,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    Ok(Json(
        state.service.leaderboard(&caller.id, params.limit).await?,
    ))
}

async fn make_investment(
    State(state): State<ApiState>,
    caller: AuthUser,
    Json(req): Json<InvestRequest>,
) -> Result<Json<InvestmentReceipt>, AppError> {
    Ok(Json(
        state.service.make_investment(&caller.id, req.amount).await?,
    ))
}

async fn get_user_stats(
    State(state): State<ApiState>,
    caller: AuthUser,
) -> Result<Json<UserStats>, AppError> {
    Ok(Json(state.service.user_stats(&caller.id).await?))
}
