//! Results grid configuration: loading skeletons, settle delay, posters

use crate::render::reconcile::PosterSizing;
use crate::render::skeleton::DEFAULT_SKELETON_COUNT;
use serde::Deserialize;
use std::time::Duration;

/// Results grid settings
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Placeholder cards shown while a search is in flight
    pub skeleton_count: usize,
    /// Pause between a successful fetch and the render (lets skeletons fade)
    pub settle_delay_ms: u64,
    /// Card width in columns
    pub card_width: u16,
    /// Poster height bounds in rows
    pub poster_min_rows: u16,
    pub poster_max_rows: u16,
    /// Per-poster download timeout in seconds
    pub poster_timeout_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            skeleton_count: DEFAULT_SKELETON_COUNT,
            settle_delay_ms: 700,
            card_width: 24,
            poster_min_rows: 4,
            poster_max_rows: 24,
            poster_timeout_secs: 15,
        }
    }
}

/// Display settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDisplay {
    pub skeleton_count: Option<usize>,
    pub settle_delay_ms: Option<u64>,
    pub card_width: Option<u16>,
    pub poster_min_rows: Option<u16>,
    pub poster_max_rows: Option<u16>,
    pub poster_timeout_secs: Option<u64>,
}

impl DisplayConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileDisplay>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let poster_min_rows = file.poster_min_rows.unwrap_or(defaults.poster_min_rows);
        // Keep the range non-empty so clamp() never panics
        let poster_max_rows = file
            .poster_max_rows
            .unwrap_or(defaults.poster_max_rows)
            .max(poster_min_rows);

        Self {
            skeleton_count: file.skeleton_count.unwrap_or(defaults.skeleton_count),
            settle_delay_ms: file.settle_delay_ms.unwrap_or(defaults.settle_delay_ms),
            card_width: file.card_width.unwrap_or(defaults.card_width).max(8),
            poster_min_rows,
            poster_max_rows,
            poster_timeout_secs: file
                .poster_timeout_secs
                .unwrap_or(defaults.poster_timeout_secs),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }

    pub fn poster_sizing(&self) -> PosterSizing {
        PosterSizing {
            card_width: self.card_width,
            min_rows: self.poster_min_rows,
            max_rows: self.poster_max_rows,
        }
    }
}
