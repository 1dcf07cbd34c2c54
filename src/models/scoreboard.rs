//! Leaderboard positions and highscore aggregates.
//!
//! Boards are precomputed, ordered views maintained by the scoring pass;
//! this module only reads them. Position resolution is one routine applied
//! uniformly to every board: scan the ordered names and report the 0-based
//! rank.

use crate::constants::boards;
use crate::error::Result;
use crate::query::Query;
use sqlx::PgPool;

/// Sentinel rank for a key that is absent from its board.
pub const UNPLACED: i64 = -1;

/// 0-based rank of `key` in an ordered sequence, or [`UNPLACED`] when the
/// key is absent or the sequence is empty. Ordering is the caller's
/// responsibility.
pub fn find_place<S: AsRef<str>>(rows: &[S], key: &str) -> i64 {
    rows.iter()
        .position(|row| row.as_ref() == key)
        .map_or(UNPLACED, |index| index as i64)
}

/// The player column of a board view, in board order.
async fn standings(pool: &PgPool, board: &str) -> Result<Vec<String>> {
    Query::new(format!("SELECT player FROM {board}"))
        .scalars(pool)
        .await
}

pub async fn fastest_realtime_pos(pool: &PgPool, player: &str) -> Result<i64> {
    Ok(find_place(
        &standings(pool, boards::FASTEST_REALTIME).await?,
        player,
    ))
}

pub async fn fastest_turncount_pos(pool: &PgPool, player: &str) -> Result<i64> {
    Ok(find_place(
        &standings(pool, boards::FASTEST_TURNCOUNT).await?,
        player,
    ))
}

pub async fn combo_highscore_pos(pool: &PgPool, player: &str) -> Result<i64> {
    Ok(find_place(
        &standings(pool, boards::COMBO_HIGHSCORES).await?,
        player,
    ))
}

pub async fn streak_pos(pool: &PgPool, player: &str) -> Result<i64> {
    Ok(find_place(&standings(pool, boards::STREAKS).await?, player))
}

/// Number of combo highscores currently held by the player.
pub async fn combo_highscores(pool: &PgPool, player: &str) -> Result<i64> {
    Query::new("SELECT COUNT(*) FROM game_combo_highscores")
        .filter(" WHERE player = ", player.to_string())
        .count(pool)
        .await
}

/// Number of winning combo highscores currently held by the player.
pub async fn combo_win_highscores(pool: &PgPool, player: &str) -> Result<i64> {
    Query::new("SELECT COUNT(*) FROM game_combo_win_highscores")
        .filter(" WHERE player = ", player.to_string())
        .count(pool)
        .await
}

/// Number of species highscores currently held by the player.
pub async fn species_highscores(pool: &PgPool, player: &str) -> Result<i64> {
    Query::new("SELECT COUNT(*) FROM game_species_highscores")
        .filter(" WHERE player = ", player.to_string())
        .count(pool)
        .await
}

/// Number of class highscores currently held by the player.
pub async fn class_highscores(pool: &PgPool, player: &str) -> Result<i64> {
    Query::new("SELECT COUNT(*) FROM game_class_highscores")
        .filter(" WHERE player = ", player.to_string())
        .count(pool)
        .await
}

/// The top scorers by base score, highest first.
pub async fn top_players(pool: &PgPool, how_many: i64) -> Result<Vec<(String, i64)>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT name, score_base FROM players ORDER BY score_base DESC LIMIT $1",
    )
    .bind(how_many)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
