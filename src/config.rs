use crate::error::{AppError, Result};

/// Investment bounds in minor units (kobo). ₦25–₦1000 inclusive.
pub const MIN_INVESTMENT_MINOR: i64 = 2_500;
pub const MAX_INVESTMENT_MINOR: i64 = 100_000;

/// Leaderboard rows returned when the caller does not supply ?limit.
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

/// Badge thresholds on current_rank (inclusive upper bounds).
/// Ranks past STEADY_MAX fall through to Marathon.
pub mod badge_thresholds {
    pub const HERO_MAX: i64 = 3;
    pub const BUILDER_MAX: i64 = 10;
    pub const RISING_MAX: i64 = 25;
    pub const STEADY_MAX: i64 = 50;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub db_path: String,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "tournament.db".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
        })
    }
}
