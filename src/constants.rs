//! System constants shared across scoring and reporting.

/// Number of distinct uniques a player can ever be credited for.
pub const MAX_UNIQUES: i64 = 43;

/// Number of distinct runes a player can ever find.
pub const MAX_RUNES: i64 = 15;

/// Materialized scoreboard views consumed by the position resolver. Each is
/// an ordered view whose leading column is the player name.
pub mod boards {
    pub const FASTEST_REALTIME: &str = "fastest_realtime";
    pub const FASTEST_TURNCOUNT: &str = "fastest_turncount";
    pub const COMBO_HIGHSCORES: &str = "combo_hs_scoreboard";
    pub const STREAKS: &str = "streak_scoreboard";
}
