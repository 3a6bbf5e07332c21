//! Ranking engine: resequences every participant of a tournament by total
//! invested and reassigns badges. Runs inside the caller's transaction so a
//! failed pass never leaves a half-ranked table.

use sqlx::SqliteConnection;

use crate::db::models::ParticipantStatsRow;
use crate::error::Result;
use crate::types::Badge;

/// Whole-table rank rewrite for one tournament.
///
/// Ordering is total_invested descending with a deterministic tie-break:
/// earlier last_investment first, then user_id. Ranks are assigned 1-based
/// in that order and badges follow from the new rank.
///
/// O(n log n) per call, triggered by every accepted investment. Fine for
/// bounded-size contests; an order-statistics index would be the incremental
/// alternative at larger n.
pub async fn recalculate_ranks(conn: &mut SqliteConnection, tournament_id: &str) -> Result<()> {
    let stats: Vec<ParticipantStatsRow> = sqlx::query_as(
        r#"
        SELECT tournament_id, user_id, total_invested, current_rank, streak_days,
               badge, last_investment
        FROM participant_stats
        WHERE tournament_id = ?
        ORDER BY total_invested DESC, last_investment ASC, user_id ASC
        "#,
    )
    .bind(tournament_id)
    .fetch_all(&mut *conn)
    .await?;

    for (index, row) in stats.iter().enumerate() {
        let rank = index as i64 + 1;
        let badge = Badge::from_rank(rank).to_string();
        sqlx::query(
            r#"
            UPDATE participant_stats SET current_rank = ?, badge = ?
            WHERE tournament_id = ? AND user_id = ?
            "#,
        )
        .bind(rank)
        .bind(badge)
        .bind(tournament_id)
        .bind(&row.user_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use sqlx::SqlitePool;

    const TID: &str = "t-1";

    async fn seed_tournament(pool: &SqlitePool) {
        sqlx::query(
            r#"
            INSERT INTO tournaments (id, name, start_date, end_date, status, created_at)
            VALUES (?, 'Test Cup', 0, 1000, 'active', 0)
            "#,
        )
        .bind(TID)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn seed_stat(pool: &SqlitePool, user_id: &str, total: i64, last_investment: i64) {
        // participant_stats.user_id references users(id); seed the user first.
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, country, created_at)
            VALUES (?, ?, ?, 'NG', 0)
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(format!("{user_id}@example.com"))
        .execute(pool)
        .await
        .unwrap();
        sqlx::query(
            r#"
            INSERT INTO participant_stats
                (tournament_id, user_id, total_invested, last_investment)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(TID)
        .bind(user_id)
        .bind(total)
        .bind(last_investment)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn load_stats(pool: &SqlitePool) -> Vec<ParticipantStatsRow> {
        sqlx::query_as(
            r#"
            SELECT tournament_id, user_id, total_invested, current_rank, streak_days,
                   badge, last_investment
            FROM participant_stats
            WHERE tournament_id = ?
            ORDER BY current_rank ASC
            "#,
        )
        .bind(TID)
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn ranks_are_gapless_and_ordered_by_total() {
        let pool = db::test_pool().await;
        seed_tournament(&pool).await;
        // 55 participants so every badge tier is exercised.
        for i in 0..55i64 {
            seed_stat(&pool, &format!("user-{i:02}"), (i + 1) * 100, i).await;
        }

        let mut conn = pool.acquire().await.unwrap();
        recalculate_ranks(&mut conn, TID).await.unwrap();
        drop(conn);

        let stats = load_stats(&pool).await;
        assert_eq!(stats.len(), 55);
        for (index, row) in stats.iter().enumerate() {
            assert_eq!(row.current_rank, index as i64 + 1);
            if index > 0 {
                assert!(stats[index - 1].total_invested >= row.total_invested);
            }
        }

        // Badge tiers at the persisted ranks.
        assert_eq!(stats[0].badge, "Hero");
        assert_eq!(stats[2].badge, "Hero");
        assert_eq!(stats[3].badge, "Builder");
        assert_eq!(stats[9].badge, "Builder");
        assert_eq!(stats[10].badge, "Rising");
        assert_eq!(stats[24].badge, "Rising");
        assert_eq!(stats[25].badge, "Steady");
        assert_eq!(stats[49].badge, "Steady");
        assert_eq!(stats[50].badge, "Marathon");
        assert_eq!(stats[54].badge, "Marathon");
    }

    #[tokio::test]
    async fn equal_totals_break_ties_by_earlier_investment() {
        let pool = db::test_pool().await;
        seed_tournament(&pool).await;
        seed_stat(&pool, "late", 50_000, 200).await;
        seed_stat(&pool, "early", 50_000, 100).await;

        let mut conn = pool.acquire().await.unwrap();
        recalculate_ranks(&mut conn, TID).await.unwrap();
        drop(conn);

        let stats = load_stats(&pool).await;
        assert_eq!(stats[0].user_id, "early");
        assert_eq!(stats[0].current_rank, 1);
        assert_eq!(stats[1].user_id, "late");
        assert_eq!(stats[1].current_rank, 2);
    }

    #[tokio::test]
    async fn pass_is_idempotent() {
        let pool = db::test_pool().await;
        seed_tournament(&pool).await;
        seed_stat(&pool, "a", 30_000, 1).await;
        seed_stat(&pool, "b", 70_000, 2).await;

        let mut conn = pool.acquire().await.unwrap();
        recalculate_ranks(&mut conn, TID).await.unwrap();
        recalculate_ranks(&mut conn, TID).await.unwrap();
        drop(conn);

        let stats = load_stats(&pool).await;
        assert_eq!(stats[0].user_id, "b");
        assert_eq!(stats[0].badge, "Hero");
        assert_eq!(stats[1].user_id, "a");
        assert_eq!(stats[1].badge, "Hero");
    }
}
