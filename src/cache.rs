//! In-memory caching using moka
//!
//! The admin and driver dashboards poll on a fixed interval rather than
//! receiving push updates, so daily manifests and stats are cached with a
//! short TTL and invalidated on every write.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache;
use serde::Serialize;
use tracing::debug;

use crate::trips::{DailyStats, TripSlot};

/// Application cache holding per-day trip manifests and stats
#[derive(Clone)]
pub struct AppCache {
    /// Trip slots per travel date
    pub trips: Cache<NaiveDate, Arc<Vec<TripSlot>>>,
    /// Daily income figures per travel date
    pub stats: Cache<NaiveDate, Arc<DailyStats>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Manifests: dashboards poll every few seconds, 5s TTL absorbs
            // repeated reads between polls
            trips: Cache::builder()
                .max_capacity(64)
                .time_to_live(Duration::from_secs(5))
                .build(),

            stats: Cache::builder()
                .max_capacity(64)
                .time_to_live(Duration::from_secs(5))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats_snapshot(&self) -> CacheStats {
        CacheStats {
            trips_size: self.trips.entry_count(),
            stats_size: self.stats.entry_count(),
        }
    }

    /// Invalidate all caches. Called after every booking mutation.
    pub fn invalidate_all(&self) {
        self.trips.invalidate_all();
        self.stats.invalidate_all();
        debug!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub trips_size: u64,
    pub stats_size: u64,
}
