//! Database-backed behavior tests.
//!
//! These exercise the transactional team protocol, required-lookup
//! failures, and empty-result semantics against a live PostgreSQL store.
//! They create their own tables and use per-run player names, so any
//! scratch database works. Without `DATABASE_URL` set, every test skips
//! cleanly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::OnceCell;
use tourney_core::error::TourneyError;
use tourney_core::models::{game, player, team};
use tourney_core::transaction::run_in_transaction;

static SCHEMA: OnceCell<()> = OnceCell::const_new();
static NAME_COUNTER: AtomicUsize = AtomicUsize::new(0);

async fn create_schema(pool: &PgPool) -> anyhow::Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS players (
             name TEXT PRIMARY KEY,
             score_base BIGINT NOT NULL DEFAULT 0,
             team_score_base BIGINT NOT NULL DEFAULT 0,
             team_captain TEXT
         )",
        "CREATE TABLE IF NOT EXISTS teams (
             owner TEXT PRIMARY KEY,
             name TEXT NOT NULL
         )",
        "CREATE TABLE IF NOT EXISTS games (
             player TEXT NOT NULL,
             start_time TIMESTAMP NOT NULL,
             end_time TIMESTAMP NOT NULL,
             race TEXT NOT NULL,
             class TEXT NOT NULL,
             charabbrev TEXT NOT NULL,
             runes INT NOT NULL DEFAULT 0,
             killertype TEXT NOT NULL,
             source_file TEXT NOT NULL DEFAULT ''
         )",
        "CREATE TABLE IF NOT EXISTS kills_of_uniques (
             player TEXT NOT NULL,
             monster TEXT NOT NULL
         )",
        "CREATE TABLE IF NOT EXISTS rune_finds (
             player TEXT NOT NULL,
             rune TEXT NOT NULL
         )",
    ];
    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Connect and prepare the schema, or `None` when no database is
/// configured for this environment.
async fn test_pool() -> Option<PgPool> {
    tourney_core::logging::init_logging();
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.ok()?;
    SCHEMA
        .get_or_init(|| async {
            create_schema(&pool)
                .await
                .expect("failed to create test schema");
        })
        .await;
    Some(pool)
}

/// A name no other test (or prior run) will collide with.
fn unique_name(prefix: &str) -> String {
    let n = NAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{}_{n}", std::process::id())
}

macro_rules! require_pool {
    () => {
        match test_pool().await {
            Some(pool) => pool,
            None => {
                eprintln!("DATABASE_URL not set; skipping");
                return;
            }
        }
    };
}

#[tokio::test]
async fn database_connection_reports_healthy() {
    let _ = require_pool!();

    let db = tourney_core::DatabaseConnection::new()
        .await
        .expect("failed to connect");
    assert!(db.health_check().await.expect("health check failed"));
    db.close().await;
}

#[tokio::test]
async fn created_team_lists_its_owner_first() {
    let pool = require_pool!();
    let owner = unique_name("alice");

    team::create(&pool, None, &owner, "Ogres").await.unwrap();

    let roster = team::roster(&pool, &owner).await.unwrap();
    assert_eq!(roster.first(), Some(&owner));
    assert_eq!(team::find_by_owner(&pool, &owner).await.unwrap(), Some("Ogres".into()));
}

#[tokio::test]
async fn recreating_a_team_renames_it() {
    let pool = require_pool!();
    let owner = unique_name("bob");

    team::create(&pool, None, &owner, "Ogres").await.unwrap();
    team::create(&pool, None, &owner, "Trolls").await.unwrap();

    assert_eq!(
        team::find_by_owner(&pool, &owner).await.unwrap(),
        Some("Trolls".into())
    );
    let owners = team::owners_of(&pool, "Trolls").await.unwrap();
    assert!(owners.contains(&owner));
}

#[tokio::test]
async fn joined_player_appears_on_the_roster() {
    let pool = require_pool!();
    let owner = unique_name("carol");
    let member = unique_name("dave");

    team::create(&pool, None, &owner, "Hill Giants").await.unwrap();
    team::add_player(&pool, None, &owner, &member).await.unwrap();

    let roster = team::roster(&pool, &owner).await.unwrap();
    assert_eq!(roster.first(), Some(&owner));
    assert!(roster.contains(&member));
}

#[tokio::test]
async fn failed_second_step_rolls_back_the_first() {
    let pool = require_pool!();
    let name = unique_name("ghost");

    let probe = name.clone();
    let outcome: Result<(), TourneyError> =
        run_in_transaction(&pool, None, move |conn: &mut sqlx::PgConnection| {
            Box::pin(async move {
                player::ensure_exists(&mut *conn, &probe).await?;
                // Second step: violate the primary key to force a failure.
                sqlx::query("INSERT INTO teams (owner, name) VALUES ($1, 'x')")
                    .bind(&probe)
                    .execute(&mut *conn)
                    .await?;
                sqlx::query("INSERT INTO teams (owner, name) VALUES ($1, 'y')")
                    .bind(&probe)
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .await;

    assert!(outcome.is_err());
    // No effect of step 1 is observable after the rollback.
    let err = player::base_score(&pool, &name).await.unwrap_err();
    assert!(matches!(err, TourneyError::NotFound(_)));
}

#[tokio::test]
async fn overrunning_transaction_times_out_and_rolls_back() {
    let pool = require_pool!();
    let name = unique_name("slow");

    let probe = name.clone();
    let outcome: Result<(), TourneyError> = run_in_transaction(
        &pool,
        Some(Duration::from_millis(50)),
        move |conn: &mut sqlx::PgConnection| {
            Box::pin(async move {
                player::ensure_exists(&mut *conn, &probe).await?;
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
        },
    )
    .await;

    assert!(matches!(outcome, Err(TourneyError::TransactionTimeout(50))));
    let err = player::base_score(&pool, &name).await.unwrap_err();
    assert!(matches!(err, TourneyError::NotFound(_)));
}

#[tokio::test]
async fn missing_player_lookup_carries_the_supplied_message() {
    let pool = require_pool!();
    let name = unique_name("nosuch");

    let err = player::base_score(&pool, &name).await.unwrap_err();
    assert_eq!(err.to_string(), format!("Player not found: {name}"));
}

#[tokio::test]
async fn win_queries_over_nothing_are_empty_not_errors() {
    let pool = require_pool!();
    let name = unique_name("idle");

    let filter = game::WinFilter {
        player: Some(name.clone()),
        ..Default::default()
    };
    assert_eq!(game::count_wins(&pool, &filter).await.unwrap(), 0);
    assert!(game::win_combos(&pool, &filter).await.unwrap().is_empty());
    assert!(game::was_last_game_win(&pool, &name).await.unwrap().is_none());
}

#[tokio::test]
async fn assigned_points_accumulate() {
    let pool = require_pool!();
    let name = unique_name("scorer");

    player::ensure_exists(&pool, &name).await.unwrap();
    player::assign_points(&pool, "banner bonus", &name, 25).await.unwrap();
    player::assign_points(&pool, "rune bonus", &name, 0).await.unwrap();
    player::assign_points(&pool, "win", &name, 5).await.unwrap();

    assert_eq!(player::base_score(&pool, &name).await.unwrap(), 30);
}

#[tokio::test]
async fn rune_and_unique_aggregates_count_per_player() {
    let pool = require_pool!();
    let name = unique_name("hunter");

    player::ensure_exists(&pool, &name).await.unwrap();
    for monster in ["Sigmund", "Sigmund", "Grinder"] {
        sqlx::query("INSERT INTO kills_of_uniques (player, monster) VALUES ($1, $2)")
            .bind(&name)
            .bind(monster)
            .execute(&pool)
            .await
            .unwrap();
    }
    sqlx::query("INSERT INTO rune_finds (player, rune) VALUES ($1, 'barnacled')")
        .bind(&name)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(player::uniques_killed(&pool, &name).await.unwrap(), 2);
    assert!(player::killed_unique(&pool, &name, "Sigmund").await.unwrap());
    assert!(!player::killed_unique(&pool, &name, "Boris").await.unwrap());
    assert_eq!(player::rune_count(&pool, &name, None).await.unwrap(), 1);
    assert_eq!(
        player::rune_count(&pool, &name, Some("barnacled")).await.unwrap(),
        1
    );
    assert_eq!(player::rune_count(&pool, &name, Some("slimy")).await.unwrap(), 0);
}
