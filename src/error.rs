use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No active tournament available")]
    NoActiveTournament,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Investment amount must be between ₦25 and ₦1000")]
    InvalidAmount,

    #[error("You have already invested in this tournament")]
    DuplicateInvestment,

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::NoActiveTournament | AppError::NotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::InvalidAmount
            | AppError::DuplicateInvestment
            | AppError::DuplicateEmail => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            // Infrastructure failures: log the detail, return a generic message.
            AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Config(_)
            | AppError::Io(_) => {
                error!("Request failed: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        let body = serde_json::json!({ "success": false, "message": message });
        (status, Json(body)).into_response()
    }
}

impl AppError {
    /// Maps a UNIQUE-constraint failure from the given insert into a domain error.
    /// Any other database error passes through unchanged.
    pub fn on_unique_violation(err: sqlx::Error, mapped: AppError) -> AppError {
        match &err {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                mapped
            }
            _ => AppError::Database(err),
        }
    }
}
