//! One-shot seeding tool: creates a sample active tournament unless one
//! already exists. Standalone on purpose — it talks to the same database the
//! server uses and nothing else.
//!
//! Overridable via env: DB_PATH, SEED_NAME, SEED_DESCRIPTION, SEED_DURATION_DAYS.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

const MS_PER_DAY: i64 = 24 * 3_600_000;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Seed error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), sqlx::Error> {
    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "tournament.db".to_string());
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    let existing: Option<String> =
        sqlx::query_scalar("SELECT name FROM tournaments WHERE status = 'active' LIMIT 1")
            .fetch_optional(&pool)
            .await?;
    if let Some(name) = existing {
        println!("Active tournament already exists: {name}");
        return Ok(());
    }

    let name = std::env::var("SEED_NAME")
        .unwrap_or_else(|_| "December Investment Challenge".to_string());
    let description = std::env::var("SEED_DESCRIPTION").unwrap_or_else(|_| {
        "Compete to build wealth, not lose it. Invest ₦25-₦1000 to climb the leaderboard!"
            .to_string()
    });
    let duration_days: i64 = std::env::var("SEED_DURATION_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64;
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO tournaments
            (id, name, description, start_date, end_date, status, total_invested, player_count, created_at)
        VALUES (?, ?, ?, ?, ?, 'active', 0, 0, ?)
        "#,
    )
    .bind(&id)
    .bind(&name)
    .bind(&description)
    .bind(now)
    .bind(now + duration_days * MS_PER_DAY)
    .bind(now)
    .execute(&pool)
    .await?;

    println!("Sample tournament created");
    println!("  id:   {id}");
    println!("  name: {name}");
    Ok(())
}
