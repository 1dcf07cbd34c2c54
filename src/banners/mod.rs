//! Time-scoped banner eligibility.
//!
//! An external nomination feed hands this module a time-ascending sequence
//! of (combo, activation time) pairs. [`BannerRotation`] turns the sequence
//! into a partition of time: nomination `i` owns the half-open interval from
//! its activation to the next activation, and the final nomination owns an
//! open-ended interval. Point-in-time lookups then answer which combo earned
//! banner recognition for a game that ended at a given instant.
//!
//! The rotation is an explicitly constructed value. Processes that want a
//! shared, reloadable copy wrap it in [`BannerIndex`].

mod feed;
mod timestamp;

pub use feed::{BannerIndex, NominationFeed};
pub use timestamp::{parse_compact, Timestamp};

use crate::error::{Result, TourneyError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry in the nomination feed: a combo and the instant its banner
/// interval begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nomination {
    pub combo: String,
    pub starts_at: NaiveDateTime,
}

impl Nomination {
    pub fn new(combo: impl Into<String>, starts_at: NaiveDateTime) -> Self {
        Self {
            combo: combo.into(),
            starts_at,
        }
    }
}

/// The derived interval partition over a nomination sequence.
///
/// Immutable after construction, so concurrent readers need no
/// synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerRotation {
    nominations: Vec<Nomination>,
    combos: HashSet<String>,
}

impl BannerRotation {
    /// Build the partition from a feed-ordered nomination sequence.
    ///
    /// Activation times must be strictly increasing; anything else is feed
    /// corruption and fails with [`TourneyError::NominationOrder`] rather
    /// than producing undefined intervals.
    pub fn new(nominations: Vec<Nomination>) -> Result<Self> {
        for pair in nominations.windows(2) {
            if pair[1].starts_at <= pair[0].starts_at {
                return Err(TourneyError::NominationOrder(format!(
                    "'{}' at {} does not advance past '{}' at {}",
                    pair[1].combo, pair[1].starts_at, pair[0].combo, pair[0].starts_at
                )));
            }
        }

        let combos = nominations.iter().map(|n| n.combo.clone()).collect();
        Ok(Self {
            nominations,
            combos,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.nominations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nominations.len()
    }

    /// The currently active nomination: owner of the open-ended final
    /// interval. `None` for an empty feed.
    pub fn current(&self) -> Option<&Nomination> {
        self.nominations.last()
    }

    /// Every nominated combo except the currently active one, in feed
    /// order. A combo nominated more than once appears once per occurrence.
    pub fn previous_combos(&self) -> Vec<&str> {
        let settled = self.nominations.len().saturating_sub(1);
        self.nominations[..settled]
            .iter()
            .map(|n| n.combo.as_str())
            .collect()
    }

    /// The nomination whose interval contains `at`, if any. Instants before
    /// the first activation belong to no interval.
    pub fn active_at(&self, at: NaiveDateTime) -> Option<&Nomination> {
        let upcoming = self.nominations.partition_point(|n| n.starts_at <= at);
        upcoming.checked_sub(1).map(|i| &self.nominations[i])
    }

    /// Whether `combo` was the banner choice at instant `at`.
    ///
    /// Combos never nominated are rejected without touching the intervals.
    pub fn is_active(&self, combo: &str, at: NaiveDateTime) -> bool {
        if !self.combos.contains(combo) {
            return false;
        }
        self.active_at(at).is_some_and(|n| n.combo == combo)
    }
}
