//! Completed-game records and win-history queries.
//!
//! The `games` table is append-only: rows are written once by the ingestion
//! pipeline and never touched again here. Everything in this module is a
//! read.

use crate::error::Result;
use crate::query::Query;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

const GAME_COLUMNS: &str =
    "player, start_time, end_time, race, class, charabbrev, runes, killertype, source_file";

/// One completed game, identified in practice by (player, start_time,
/// end_time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub player: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub race: String,
    #[sqlx(rename = "class")]
    #[serde(rename = "class")]
    pub class_name: String,
    pub charabbrev: String,
    pub runes: i32,
    pub killertype: String,
    pub source_file: String,
}

/// Optional selectors for win queries. Any combination of filters may be
/// present; absent filters simply do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct WinFilter {
    pub player: Option<String>,
    pub race: Option<String>,
    pub class_name: Option<String>,
    pub runes_min: Option<i32>,
    pub before: Option<NaiveDateTime>,
    pub limit: Option<i64>,
}

/// Compose a win query selecting `selected`, constrained by whichever
/// filters are present, in declaration order.
pub fn win_query(selected: &str, order_by: Option<&str>, filter: &WinFilter) -> Query {
    let mut query = Query::new(format!(
        "SELECT {selected} FROM games WHERE killertype = 'winning'"
    ));
    if let Some(player) = &filter.player {
        query = query.filter(" AND player = ", player.clone());
    }
    if let Some(race) = &filter.race {
        query = query.filter(" AND race = ", race.clone());
    }
    if let Some(class_name) = &filter.class_name {
        query = query.filter(" AND class = ", class_name.clone());
    }
    if let Some(runes_min) = filter.runes_min {
        query = query.filter(" AND runes >= ", runes_min);
    }
    if let Some(before) = filter.before {
        query = query.filter(" AND end_time < ", before);
    }
    if let Some(order_by) = order_by {
        query = query.push(order_by);
    }
    if let Some(limit) = filter.limit {
        query = query.filter(" LIMIT ", limit);
    }
    query
}

/// Number of wins matching the filter.
pub async fn count_wins(pool: &PgPool, filter: &WinFilter) -> Result<i64> {
    win_query("COUNT(start_time)", None, filter).count(pool).await
}

/// Combo codes of matching wins, earliest win first.
pub async fn win_combos(pool: &PgPool, filter: &WinFilter) -> Result<Vec<String>> {
    win_query("charabbrev", Some(" ORDER BY end_time"), filter)
        .scalars(pool)
        .await
}

/// Sortable game columns for [`find_games`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOrder {
    StartTime,
    EndTime,
}

impl GameOrder {
    fn column(self) -> &'static str {
        match self {
            GameOrder::StartTime => "start_time",
            GameOrder::EndTime => "end_time",
        }
    }
}

/// Equality selectors over game columns, ANDed together.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    pub player: Option<String>,
    pub race: Option<String>,
    pub class_name: Option<String>,
    pub charabbrev: Option<String>,
    pub killertype: Option<String>,
    pub runes: Option<i32>,
    /// Sort ascending by this column; takes precedence over `sort_max`.
    pub sort_min: Option<GameOrder>,
    /// Sort descending by this column.
    pub sort_max: Option<GameOrder>,
    pub limit: Option<i64>,
}

fn games_query(filter: &GameFilter) -> Query {
    let mut query = Query::new(format!("SELECT {GAME_COLUMNS} FROM games"));
    let mut joiner = " WHERE ";

    let text_selectors = [
        ("player", &filter.player),
        ("race", &filter.race),
        ("class", &filter.class_name),
        ("charabbrev", &filter.charabbrev),
        ("killertype", &filter.killertype),
    ];
    for (column, value) in text_selectors {
        if let Some(value) = value {
            query = query.filter(&format!("{joiner}{column} = "), value.clone());
            joiner = " AND ";
        }
    }
    if let Some(runes) = filter.runes {
        query = query.filter(&format!("{joiner}runes = "), runes);
    }

    if let Some(order) = filter.sort_min {
        query = query.push(&format!(" ORDER BY {}", order.column()));
    } else if let Some(order) = filter.sort_max {
        query = query.push(&format!(" ORDER BY {} DESC", order.column()));
    }
    if let Some(limit) = filter.limit {
        query = query.filter(" LIMIT ", limit);
    }
    query
}

/// Find games matching all supplied selectors.
pub async fn find_games(pool: &PgPool, filter: &GameFilter) -> Result<Vec<Game>> {
    games_query(filter).rows_as(pool).await
}

/// The (race, class) of the player's most recent game, if that game was a
/// win.
///
/// "Most recent" requires the greatest start time *and* the greatest end
/// time, so a win finished early on one server cannot be replayed under a
/// still-running game elsewhere to stretch a streak.
pub async fn was_last_game_win(pool: &PgPool, player: &str) -> Result<Option<(String, String)>> {
    let last_win: Option<(NaiveDateTime, NaiveDateTime, String, String)> = sqlx::query_as(
        "SELECT start_time, end_time, race, class FROM games \
         WHERE killertype = 'winning' AND player = $1 \
         ORDER BY end_time DESC LIMIT 1",
    )
    .bind(player)
    .fetch_optional(pool)
    .await?;

    let Some((win_start, win_end, race, class_name)) = last_win else {
        return Ok(None);
    };

    let last_start: Option<(NaiveDateTime, NaiveDateTime)> = sqlx::query_as(
        "SELECT start_time, end_time FROM games WHERE player = $1 \
         ORDER BY start_time DESC LIMIT 1",
    )
    .bind(player)
    .fetch_optional(pool)
    .await?;

    Ok(match last_start {
        Some((start, end)) if start == win_start && end == win_end => {
            Some((race, class_name))
        }
        _ => None,
    })
}

fn streak_query(player: &str, before: NaiveDateTime) -> Query {
    Query::new("SELECT charabbrev FROM games")
        .filter(" WHERE player = ", player.to_string())
        .filter(
            " AND end_time > (SELECT MAX(end_time) FROM games WHERE player = ",
            player.to_string(),
        )
        .filter(" AND end_time < ", before)
        .push(" AND killertype != 'winning')")
        .filter(" AND end_time < ", before)
        .push(" ORDER BY end_time")
}

/// Combo codes of the consecutive wins leading up to `before`, earliest
/// first. The caller must ensure a non-winning game exists before `before`
/// for the player.
pub async fn wins_in_streak_before(
    pool: &PgPool,
    player: &str,
    before: NaiveDateTime,
) -> Result<Vec<String>> {
    streak_query(player, before).scalars(pool).await
}
