//! # Tourney Core
//!
//! Scoring and query core for a competitive game tournament: per-player
//! win/loss history, score accumulation, team membership, and time-scoped
//! banner eligibility over a shared PostgreSQL store.
//!
//! ## Overview
//!
//! Raw game data arrives through an external ingestion pipeline and is
//! append-mostly: completed games, unique kills, and rune finds are written
//! once and only ever read here. This crate supplies the pieces that sit on
//! top of that dataset:
//!
//! - **Composable queries**: [`query::Query`] builds parameterized read
//!   statements from optional filter fragments without ever splicing values
//!   into SQL text.
//! - **Banner rotation**: [`banners::BannerRotation`] partitions time into
//!   half-open intervals and answers which combo held the banner at any
//!   instant.
//! - **Transactional writes**: [`transaction::run_in_transaction`]
//!   demarcates multi-step mutations (team creation and joining) so
//!   concurrent readers see all of a change or none of it.
//! - **Standings**: [`models::scoreboard`] resolves leaderboard positions
//!   and highscore counts uniformly across every board.
//!
//! ## Module Organization
//!
//! - [`models`] - Data layer over games, players, teams, and scoreboards
//! - [`query`] - Parameterized query composition and execution
//! - [`banners`] - Temporal banner-eligibility index and nomination feed
//! - [`transaction`] - Multi-step write demarcation
//! - [`database`] - Connection management
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tourney_core::config::TourneyConfig;
//! use tourney_core::models::{game, scoreboard};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = TourneyConfig::from_env()?.connect().await?;
//!
//! let wins = game::count_wins(&pool, &game::WinFilter {
//!     player: Some("rax".to_string()),
//!     runes_min: Some(3),
//!     ..Default::default()
//! }).await?;
//!
//! let place = scoreboard::streak_pos(&pool, "rax").await?;
//! println!("{wins} three-rune wins, streak rank {place}");
//! # Ok(())
//! # }
//! ```

pub mod banners;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod query;
pub mod transaction;

pub use banners::{BannerIndex, BannerRotation, Nomination, NominationFeed, Timestamp};
pub use config::TourneyConfig;
pub use database::DatabaseConnection;
pub use error::{Result, TourneyError};
pub use query::Query;
pub use transaction::run_in_transaction;
