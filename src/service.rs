//! Tournament service: orchestrates the tournament store, investment ledger,
//! participant stats and the ranking engine behind the HTTP surface.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::config::{DEFAULT_LEADERBOARD_LIMIT, MAX_INVESTMENT_MINOR, MIN_INVESTMENT_MINOR};
use crate::db::models::{LeaderboardRow, ParticipantStatsRow, TournamentRow};
use crate::error::{AppError, Result};
use crate::money::{decimal_from_minor, minor_from_decimal};
use crate::ranking::recalculate_ranks;
use crate::types::{format_time_left, now_ms, Badge, TournamentStatus};

// ---------------------------------------------------------------------------
// Service outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TournamentSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: i64,
    pub end_date: i64,
    pub status: TournamentStatus,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_invested: Decimal,
    pub player_count: i64,
    pub time_left: String,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub streak: i64,
    pub badge: Badge,
    #[serde(rename = "isCurrentUser")]
    pub is_current_user: bool,
}

#[derive(Debug, Serialize)]
pub struct InvestmentReceipt {
    pub success: bool,
    pub message: String,
    pub new_rank: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_invested: Decimal,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub current_rank: i64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_invested: Decimal,
    pub streak_days: i64,
    pub badge: Badge,
    pub last_investment: Option<i64>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub monthly_invested: Decimal,
    pub tournaments_joined: i64,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct TournamentService {
    pool: SqlitePool,
}

impl TournamentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The active tournament. If more than one is marked active the latest
    /// start date wins — the single-active invariant is a convention, not a
    /// storage constraint.
    async fn active_tournament(&self) -> Result<TournamentRow> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            SELECT id, name, description, start_date, end_date, status,
                   total_invested, player_count, created_at
            FROM tournaments
            WHERE status = 'active'
            ORDER BY start_date DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NoActiveTournament)
    }

    pub async fn current_tournament(&self) -> Result<TournamentSummary> {
        let row = self.active_tournament().await?;
        let time_left = format_time_left(row.end_date, now_ms());
        Ok(TournamentSummary {
            id: row.id,
            name: row.name,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            status: TournamentStatus::from_db(&row.status),
            total_invested: decimal_from_minor(row.total_invested),
            player_count: row.player_count,
            time_left,
        })
    }

    /// Top participants of the active tournament, ordered by total invested.
    /// Display rank is the list position; it matches the persisted rank
    /// because a ranking pass commits with every accepted investment.
    pub async fn leaderboard(
        &self,
        caller_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let tournament = self.active_tournament().await?;
        let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT).max(0);

        let rows: Vec<LeaderboardRow> = sqlx::query_as(
            r#"
            SELECT s.user_id, u.name, s.total_invested, s.streak_days, s.badge
            FROM participant_stats s
            JOIN users u ON u.id = s.user_id
            WHERE s.tournament_id = ?
            ORDER BY s.total_invested DESC, s.last_investment ASC, s.user_id ASC
            LIMIT ?
            "#,
        )
        .bind(&tournament.id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| LeaderboardEntry {
                rank: index as i64 + 1,
                is_current_user: row.user_id == caller_id,
                name: row.name,
                amount: decimal_from_minor(row.total_invested),
                streak: row.streak_days,
                badge: Badge::from_db(&row.badge),
            })
            .collect())
    }

    /// Records the caller's single investment in the active tournament.
    ///
    /// Ledger insert, stats upsert, tournament aggregates and the ranking
    /// pass all commit in one transaction; the aggregates use in-database
    /// increments so concurrent investments never lose updates.
    pub async fn make_investment(
        &self,
        caller_id: &str,
        amount: Decimal,
    ) -> Result<InvestmentReceipt> {
        let minor = minor_from_decimal(amount).ok_or(AppError::InvalidAmount)?;
        if !(MIN_INVESTMENT_MINOR..=MAX_INVESTMENT_MINOR).contains(&minor) {
            return Err(AppError::InvalidAmount);
        }

        let tournament = self.active_tournament().await?;
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM investments WHERE tournament_id = ? AND user_id = ?",
        )
        .bind(&tournament.id)
        .bind(caller_id)
        .fetch_optional(&mut *tx)
        .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateInvestment);
        }

        let now = now_ms();
        sqlx::query(
            r#"
            INSERT INTO investments (tournament_id, user_id, amount, invested_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&tournament.id)
        .bind(caller_id)
        .bind(minor)
        .bind(now)
        .execute(&mut *tx)
        .await
        // Lost the race with a concurrent duplicate: the unique constraint
        // on (tournament_id, user_id) is the authority.
        .map_err(|e| AppError::on_unique_violation(e, AppError::DuplicateInvestment))?;

        sqlx::query(
            r#"
            INSERT INTO participant_stats (tournament_id, user_id, total_invested, last_investment)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (tournament_id, user_id) DO UPDATE SET
                total_invested = total_invested + excluded.total_invested,
                last_investment = excluded.last_investment
            "#,
        )
        .bind(&tournament.id)
        .bind(caller_id)
        .bind(minor)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE tournaments
            SET total_invested = total_invested + ?, player_count = player_count + 1
            WHERE id = ?
            "#,
        )
        .bind(minor)
        .bind(&tournament.id)
        .execute(&mut *tx)
        .await?;

        recalculate_ranks(&mut tx, &tournament.id).await?;

        let stats: ParticipantStatsRow = sqlx::query_as(
            r#"
            SELECT tournament_id, user_id, total_invested, current_rank, streak_days,
                   badge, last_investment
            FROM participant_stats
            WHERE tournament_id = ? AND user_id = ?
            "#,
        )
        .bind(&tournament.id)
        .bind(caller_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(InvestmentReceipt {
            success: true,
            message: "Investment successful".to_string(),
            new_rank: stats.current_rank,
            total_invested: decimal_from_minor(stats.total_invested),
        })
    }

    /// The caller's stats for the active tournament, or the zero-value
    /// default when they have not invested yet. Requires an active
    /// tournament either way.
    pub async fn user_stats(&self, caller_id: &str) -> Result<UserStats> {
        let tournament = self.active_tournament().await?;

        let row: Option<ParticipantStatsRow> = sqlx::query_as(
            r#"
            SELECT tournament_id, user_id, total_invested, current_rank, streak_days,
                   badge, last_investment
            FROM participant_stats
            WHERE tournament_id = ? AND user_id = ?
            "#,
        )
        .bind(&tournament.id)
        .bind(caller_id)
        .fetch_optional(&self.pool)
        .await?;

        let tournaments_joined: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM participant_stats WHERE user_id = ?")
                .bind(caller_id)
                .fetch_one(&self.pool)
                .await?;

        let stats = match row {
            Some(row) => UserStats {
                current_rank: row.current_rank,
                total_invested: decimal_from_minor(row.total_invested),
                streak_days: row.streak_days,
                badge: Badge::from_db(&row.badge),
                last_investment: row.last_investment,
                // Simplified: mirrors the current tournament total.
                monthly_invested: decimal_from_minor(row.total_invested),
                tournaments_joined,
            },
            None => UserStats {
                current_rank: 0,
                total_invested: Decimal::ZERO,
                streak_days: 0,
                badge: Badge::Marathon,
                last_investment: None,
                monthly_invested: Decimal::ZERO,
                tournaments_joined,
            },
        };

        Ok(stats)
    }
}
