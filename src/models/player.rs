//! Player rows: score lookups, point assignment, and per-player aggregates.
//!
//! Scores only move in one direction. `assign_points` and
//! `assign_team_points` add; no decrement path exists anywhere, so a
//! player's base scores are monotonically non-decreasing for the life of
//! the tournament. Corrections happen out of band.

use crate::error::Result;
use crate::query::Query;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use tracing::debug;

/// Mutable aggregate row keyed by unique player name. `team_captain` is the
/// membership back-reference: it names the owner of the team this player
/// belongs to, or is NULL for unaffiliated players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub name: String,
    pub score_base: i64,
    pub team_score_base: i64,
    pub team_captain: Option<String>,
}

/// Create the player row if it does not exist yet. Safe inside a
/// transaction; existing rows are left untouched.
pub async fn ensure_exists<'e, E>(executor: E, name: &str) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO players (name, score_base, team_score_base) VALUES ($1, 0, 0) \
         ON CONFLICT (name) DO NOTHING",
    )
    .bind(name)
    .execute(executor)
    .await?;
    Ok(())
}

/// The unchanging part of a player's score. Missing players are an error.
pub async fn base_score(pool: &PgPool, name: &str) -> Result<i64> {
    Query::new("SELECT score_base FROM players")
        .filter(" WHERE name = ", name.to_string())
        .first_scalar(pool, &format!("Player not found: {name}"))
        .await
}

/// The unchanging part of a player's team score contribution.
pub async fn base_team_score(pool: &PgPool, name: &str) -> Result<i64> {
    Query::new("SELECT team_score_base FROM players")
        .filter(" WHERE name = ", name.to_string())
        .first_scalar(pool, &format!("Player not found: {name}"))
        .await
}

pub async fn all_names(pool: &PgPool) -> Result<Vec<String>> {
    Query::new("SELECT name FROM players").scalars(pool).await
}

/// Add points to a player's base score. Zero points is a no-op.
pub async fn assign_points<'e, E>(
    executor: E,
    point_source: &str,
    name: &str,
    points: u32,
) -> Result<()>
where
    E: PgExecutor<'e>,
{
    if points == 0 {
        return Ok(());
    }
    debug!("{}: {} points [{}]", name, points, point_source);
    sqlx::query("UPDATE players SET score_base = score_base + $1 WHERE name = $2")
        .bind(i64::from(points))
        .bind(name)
        .execute(executor)
        .await?;
    Ok(())
}

/// Add points to a player's team contribution. The name refers to the
/// player, not the team.
pub async fn assign_team_points<'e, E>(
    executor: E,
    point_source: &str,
    name: &str,
    points: u32,
) -> Result<()>
where
    E: PgExecutor<'e>,
{
    if points == 0 {
        return Ok(());
    }
    debug!("TEAM {}: {} points [{}]", name, points, point_source);
    sqlx::query("UPDATE players SET team_score_base = team_score_base + $1 WHERE name = $2")
        .bind(i64::from(points))
        .bind(name)
        .execute(executor)
        .await?;
    Ok(())
}

/// Number of distinct uniques the player has ever killed.
pub async fn uniques_killed(pool: &PgPool, name: &str) -> Result<i64> {
    Query::new("SELECT COUNT(DISTINCT monster) FROM kills_of_uniques")
        .filter(" WHERE player = ", name.to_string())
        .count(pool)
        .await
}

/// Whether the player has killed the given unique at least once.
pub async fn killed_unique(pool: &PgPool, name: &str, monster: &str) -> Result<bool> {
    let row = Query::new("SELECT monster FROM kills_of_uniques")
        .filter(" WHERE player = ", name.to_string())
        .filter(" AND monster = ", monster.to_string())
        .push(" LIMIT 1")
        .optional_row(pool)
        .await?;
    Ok(row.is_some())
}

/// Number of rune finds recorded for the player, optionally narrowed to one
/// rune.
pub async fn rune_count(pool: &PgPool, name: &str, rune: Option<&str>) -> Result<i64> {
    let mut query = Query::new("SELECT COUNT(rune) FROM rune_finds")
        .filter(" WHERE player = ", name.to_string());
    if let Some(rune) = rune {
        query = query.filter(" AND rune = ", rune.to_string());
    }
    query.count(pool).await
}
