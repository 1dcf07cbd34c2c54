//! Composable parameterized read queries.
//!
//! [`Query`] accumulates a statement from a base text plus filter fragments,
//! applied strictly in call order. Parameters are bound at the position they
//! are supplied and never spliced into the statement text, so placeholder
//! and parameter counts cannot drift apart. Nothing touches the database
//! until one of the execution methods runs.
//!
//! Typical use is an optional-filter search: start from the base statement,
//! add one [`Query::filter`] per selector the caller actually supplied, then
//! execute.

use crate::error::{Result, TourneyError};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct Query {
    builder: QueryBuilder<'static, Postgres>,
}

impl Query {
    /// Begin a query from a base statement.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            builder: QueryBuilder::new(base),
        }
    }

    /// Append a raw SQL fragment with no parameters.
    pub fn push(mut self, fragment: &str) -> Self {
        self.builder.push(fragment);
        self
    }

    /// Append a fragment immediately followed by one bound parameter.
    ///
    /// The fragment carries everything up to the value position, e.g.
    /// `.filter(" AND player = ", name)`. Fragments and their parameters are
    /// appended in call order.
    pub fn filter<T>(mut self, fragment: &str, value: T) -> Self
    where
        T: 'static + sqlx::Encode<'static, Postgres> + sqlx::Type<Postgres>,
    {
        self.builder.push(fragment);
        self.builder.push_bind(value);
        self
    }

    /// The statement text as composed so far.
    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    /// Execute and return every row. A filter matching nothing yields an
    /// empty vec, not an error.
    pub async fn rows(mut self, pool: &PgPool) -> Result<Vec<PgRow>> {
        let rows = self.builder.build().fetch_all(pool).await?;
        Ok(rows)
    }

    /// Execute and return the first row, or `None` when nothing matched.
    pub async fn optional_row(mut self, pool: &PgPool) -> Result<Option<PgRow>> {
        let row = self.builder.build().fetch_optional(pool).await?;
        Ok(row)
    }

    /// Execute and decode every row into `T`.
    pub async fn rows_as<T>(mut self, pool: &PgPool) -> Result<Vec<T>>
    where
        T: Send + Unpin + for<'r> sqlx::FromRow<'r, PgRow>,
    {
        let rows = self.builder.build_query_as::<T>().fetch_all(pool).await?;
        Ok(rows)
    }

    /// Execute and return the leading column of every row.
    pub async fn scalars<T>(mut self, pool: &PgPool) -> Result<Vec<T>>
    where
        T: Send + Unpin + for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
    {
        let values = self.builder.build_query_scalar::<T>().fetch_all(pool).await?;
        Ok(values)
    }

    /// Execute and return the first column of the first row, or `None` when
    /// nothing matched.
    pub async fn optional_scalar<T>(mut self, pool: &PgPool) -> Result<Option<T>>
    where
        T: Send + Unpin + for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
    {
        let value = self
            .builder
            .build_query_scalar::<T>()
            .fetch_optional(pool)
            .await?;
        Ok(value)
    }

    /// Execute and return the first column of the first row, failing with
    /// [`TourneyError::NotFound`] carrying `not_found` when there is no row.
    ///
    /// This is the one place absence becomes a hard failure; use it for
    /// required lookups.
    pub async fn first_scalar<T>(mut self, pool: &PgPool, not_found: &str) -> Result<T>
    where
        T: Send + Unpin + for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
    {
        self.builder
            .build_query_scalar::<T>()
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| TourneyError::NotFound(not_found.to_string()))
    }

    /// Execute a single-column aggregate, yielding 0 when nothing matched.
    ///
    /// COUNT over an empty match set still returns one row holding 0, so
    /// this never takes the not-found path; the 0 default covers grouped
    /// aggregates that can legitimately produce no row at all.
    pub async fn count(mut self, pool: &PgPool) -> Result<i64> {
        let value = self
            .builder
            .build_query_scalar::<i64>()
            .fetch_optional(pool)
            .await?;
        Ok(value.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_concatenate_in_call_order() {
        let query = Query::new("SELECT charabbrev FROM games WHERE killertype = 'winning'")
            .filter(" AND player = ", "rax".to_string())
            .filter(" AND runes >= ", 3i32)
            .push(" ORDER BY end_time");

        assert_eq!(
            query.sql(),
            "SELECT charabbrev FROM games WHERE killertype = 'winning' \
             AND player = $1 AND runes >= $2 ORDER BY end_time"
        );
    }

    #[test]
    fn placeholder_count_matches_supplied_parameters() {
        let query = Query::new("SELECT player FROM games")
            .filter(" WHERE race = ", "Mi".to_string())
            .filter(" AND class = ", "Fi".to_string())
            .filter(" AND end_time < ", "20100201000000".to_string());

        let placeholders = (1..=3).filter(|n| query.sql().contains(&format!("${n}"))).count();
        assert_eq!(placeholders, 3);
        assert!(!query.sql().contains("$4"));
    }

    #[test]
    fn base_statement_alone_is_executable_text() {
        let query = Query::new("SELECT COUNT(*) FROM players");
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM players");
    }

    #[test]
    fn multi_parameter_fragments_interleave() {
        // A subquery fragment split across filter calls keeps text and
        // parameters aligned positionally.
        let query = Query::new("SELECT charabbrev FROM games")
            .filter(" WHERE player = ", "rax".to_string())
            .filter(
                " AND end_time > (SELECT MAX(end_time) FROM games WHERE player = ",
                "rax".to_string(),
            )
            .filter(" AND end_time < ", "20100301000000".to_string())
            .push(" AND killertype != 'winning')");

        assert!(query.sql().ends_with("killertype != 'winning')"));
        assert!(query.sql().contains("$3"));
    }
}
