//! Nomination feed boundary and the shared, reloadable index handle.

use super::{BannerRotation, Nomination};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::RwLock;

/// Source of the time-ascending nomination sequence. The feed's own format
/// (file, table, admin command) is the implementor's concern.
#[async_trait]
pub trait NominationFeed: Send + Sync {
    async fn nominations(&self) -> Result<Vec<Nomination>>;
}

/// Process-wide banner index: a [`BannerRotation`] behind a read/write lock
/// so long-lived services can rebuild it from the feed without restarting.
///
/// Reads never block each other; [`BannerIndex::reload`] swaps in a freshly
/// validated rotation atomically.
pub struct BannerIndex {
    rotation: RwLock<BannerRotation>,
}

impl BannerIndex {
    /// Build the index by pulling the feed once.
    pub async fn load(feed: &dyn NominationFeed) -> Result<Self> {
        let rotation = BannerRotation::new(feed.nominations().await?)?;
        Ok(Self {
            rotation: RwLock::new(rotation),
        })
    }

    pub fn from_rotation(rotation: BannerRotation) -> Self {
        Self {
            rotation: RwLock::new(rotation),
        }
    }

    /// Re-pull the feed and replace the rotation. A feed that fails to
    /// produce a valid rotation leaves the current one untouched.
    pub async fn reload(&self, feed: &dyn NominationFeed) -> Result<()> {
        let rotation = BannerRotation::new(feed.nominations().await?)?;
        *self.rotation.write() = rotation;
        Ok(())
    }

    pub fn current(&self) -> Option<Nomination> {
        self.rotation.read().current().cloned()
    }

    pub fn previous_combos(&self) -> Vec<String> {
        self.rotation
            .read()
            .previous_combos()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn active_at(&self, at: NaiveDateTime) -> Option<Nomination> {
        self.rotation.read().active_at(at).cloned()
    }

    pub fn is_active(&self, combo: &str, at: NaiveDateTime) -> bool {
        self.rotation.read().is_active(combo, at)
    }
}
