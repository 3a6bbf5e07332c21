//! Database row types matching migrations/0001_init.sql.
//! Used by sqlx for typed queries; monetary columns are minor units.

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub country: String,
    pub onboarding: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TournamentRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: i64,
    pub end_date: i64,
    pub status: String,
    pub total_invested: i64,
    pub player_count: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantStatsRow {
    pub tournament_id: String,
    pub user_id: String,
    pub total_invested: i64,
    pub current_rank: i64,
    pub streak_days: i64,
    pub badge: String,
    pub last_investment: Option<i64>,
}

/// Leaderboard read: stats joined with the user directory for display names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaderboardRow {
    pub user_id: String,
    pub name: String,
    pub total_invested: i64,
    pub streak_days: i64,
    pub badge: String,
}
