use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::badge_thresholds;

// ---------------------------------------------------------------------------
// Tournament lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Active,
    Completed,
}

impl TournamentStatus {
    pub fn from_db(s: &str) -> Self {
        match s {
            "active" => TournamentStatus::Active,
            "completed" => TournamentStatus::Completed,
            _ => TournamentStatus::Upcoming,
        }
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TournamentStatus::Upcoming => "upcoming",
            TournamentStatus::Active => "active",
            TournamentStatus::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

/// Cosmetic tier derived purely from current_rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    /// rank 1–3
    Hero,
    /// rank 4–10
    Builder,
    /// rank 11–25
    Rising,
    /// rank 26–50
    Steady,
    /// rank 51+, and the default for unranked participants
    Marathon,
}

impl Badge {
    pub fn from_rank(rank: i64) -> Self {
        use badge_thresholds::*;
        if rank <= HERO_MAX {
            Badge::Hero
        } else if rank <= BUILDER_MAX {
            Badge::Builder
        } else if rank <= RISING_MAX {
            Badge::Rising
        } else if rank <= STEADY_MAX {
            Badge::Steady
        } else {
            Badge::Marathon
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "Hero" => Badge::Hero,
            "Builder" => Badge::Builder,
            "Rising" => Badge::Rising,
            "Steady" => Badge::Steady,
            _ => Badge::Marathon,
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Badge::Hero => "Hero",
            Badge::Builder => "Builder",
            Badge::Rising => "Rising",
            Badge::Steady => "Steady",
            Badge::Marathon => "Marathon",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Time helpers — all timestamps are UTC epoch milliseconds
// ---------------------------------------------------------------------------

pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Remaining tournament time as "{d}d {h}h", floored, never negative.
pub fn format_time_left(end_ms: i64, now_ms: i64) -> String {
    let left = (end_ms - now_ms).max(0);
    let days = left / MS_PER_DAY;
    let hours = (left % MS_PER_DAY) / MS_PER_HOUR;
    format!("{days}d {hours}h")
}
