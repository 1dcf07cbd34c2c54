//! Teams and membership.
//!
//! A team is keyed by its owner; recreating a team under the same owner
//! renames it rather than erroring. Membership is the `team_captain`
//! back-reference on each member's player row, and the owner is always a
//! member of their own team: creation installs that membership in the same
//! transaction, so a team with zero members is never observable.

use crate::error::Result;
use crate::models::player;
use crate::query::Query;
use crate::transaction::run_in_transaction;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgExecutor, PgPool};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub owner: String,
    pub name: String,
}

async fn set_captain<'e, E>(executor: E, team_owner: &str, member: &str) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query("UPDATE players SET team_captain = $1 WHERE name = $2")
        .bind(team_owner)
        .bind(member)
        .execute(executor)
        .await?;
    Ok(())
}

/// Create (or rename) the team owned by `owner` and enroll the owner as its
/// first member. All steps commit together or not at all.
pub async fn create(
    pool: &PgPool,
    deadline: Option<Duration>,
    owner: &str,
    team_name: &str,
) -> Result<()> {
    let owner = owner.to_string();
    let team_name = team_name.to_string();
    run_in_transaction(pool, deadline, move |conn: &mut PgConnection| {
        Box::pin(async move {
            player::ensure_exists(&mut *conn, &owner).await?;
            sqlx::query(
                "INSERT INTO teams (owner, name) VALUES ($1, $2) \
                 ON CONFLICT (owner) DO UPDATE SET name = EXCLUDED.name",
            )
            .bind(&owner)
            .bind(&team_name)
            .execute(&mut *conn)
            .await?;
            set_captain(&mut *conn, &owner, &owner).await
        })
    })
    .await
}

/// Add `member` to the team owned by `team_owner`, creating the member's
/// player row if needed. Referential integrity is the database's concern.
pub async fn add_player(
    pool: &PgPool,
    deadline: Option<Duration>,
    team_owner: &str,
    member: &str,
) -> Result<()> {
    let team_owner = team_owner.to_string();
    let member = member.to_string();
    run_in_transaction(pool, deadline, move |conn: &mut PgConnection| {
        Box::pin(async move {
            player::ensure_exists(&mut *conn, &member).await?;
            set_captain(&mut *conn, &team_owner, &member).await
        })
    })
    .await
}

/// Every registered team.
pub async fn all(pool: &PgPool) -> Result<Vec<Team>> {
    Query::new("SELECT owner, name FROM teams ORDER BY owner")
        .rows_as(pool)
        .await
}

/// The name of the team owned by `owner`, or `None` when there is none.
pub async fn find_by_owner(pool: &PgPool, owner: &str) -> Result<Option<String>> {
    Query::new("SELECT name FROM teams")
        .filter(" WHERE owner = ", owner.to_string())
        .optional_scalar(pool)
        .await
}

/// Owners of every team carrying the given name.
pub async fn owners_of(pool: &PgPool, team_name: &str) -> Result<Vec<String>> {
    Query::new("SELECT owner FROM teams")
        .filter(" WHERE name = ", team_name.to_string())
        .scalars(pool)
        .await
}

/// Every member of the team owned by `team_owner`, with the owner first.
/// An owner with no team yields an empty roster.
pub async fn roster(pool: &PgPool, team_owner: &str) -> Result<Vec<String>> {
    let mut members: Vec<String> = Query::new("SELECT name FROM players")
        .filter(" WHERE team_captain = ", team_owner.to_string())
        .scalars(pool)
        .await?;

    if let Some(position) = members.iter().position(|name| name == team_owner) {
        members.remove(position);
        members.insert(0, team_owner.to_string());
    }
    Ok(members)
}
