//! Pipeline configuration.
//!
//! Every section deserializes with defaults, so a JSON document only needs the
//! keys it overrides:
//!
//! ```ignore
//! let config = PipelineConfig::from_json_str(r#"{"tracker": {"stale_after_ms": 800}}"#)?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::announce::{AnnounceConfig, AnnounceScope};
use crate::detection::{CandidateConfig, OverlapConfig};
use crate::error::{Error, Result};
use crate::ranker::RankerConfig;
use crate::tracker::TrackerConfig;

/// Labels of living beings, excluded when looking for products.
const LIVING_BEINGS: &[&str] = &[
    "person", "bird", "cat", "dog", "horse", "sheep", "cow", "elephant", "bear", "zebra",
    "giraffe",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub candidates: CandidateConfig,
    pub overlap: OverlapConfig,
    pub tracker: TrackerConfig,
    pub ranker: RankerConfig,
    pub announce: AnnounceConfig,
}

fn check(ok: bool, message: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidConfig(message.to_string()))
    }
}

fn is_unit(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

impl PipelineConfig {
    /// Identifying products on a shelf: stricter confidence, no living beings,
    /// quicker confirmation.
    pub fn product_search() -> Self {
        let mut config = Self::default();
        config.candidates.confidence_threshold = 0.6;
        config.candidates.excluded_labels = LIVING_BEINGS.iter().map(|l| l.to_string()).collect();
        config.ranker.min_frames = 3;
        config
    }

    /// Walking through a room: lower confidence, every obstacle within 3 m
    /// announced, shorter cooldown.
    pub fn obstacle_mode() -> Self {
        let mut config = Self::default();
        config.candidates.confidence_threshold = 0.4;
        config.ranker.min_frames = 3;
        config.announce = AnnounceConfig {
            cooldown_ms: 2000,
            scope: AnnounceScope::WithinDistance { max_distance: 3.0 },
        };
        config
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Validate configuration, naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let c = &self.candidates;
        check(
            is_unit(c.confidence_threshold),
            "candidates.confidence_threshold must be in [0, 1]",
        )?;
        check(
            c.focal_constant.is_finite() && c.focal_constant > 0.0,
            "candidates.focal_constant must be positive",
        )?;
        check(
            c.default_reference_height.is_finite() && c.default_reference_height > 0.0,
            "candidates.default_reference_height must be positive",
        )?;
        check(
            c.reference_heights
                .values()
                .all(|h| h.is_finite() && *h > 0.0),
            "candidates.reference_heights must all be positive",
        )?;
        check(
            c.reference_heights
                .keys()
                .all(|label| *label == label.to_lowercase()),
            "candidates.reference_heights keys must be lower-case",
        )?;
        check(
            c.min_distance.is_finite() && c.min_distance > 0.0,
            "candidates.min_distance must be positive",
        )?;
        check(
            c.max_distance.is_finite() && c.max_distance >= c.min_distance,
            "candidates.max_distance must be at least min_distance",
        )?;

        check(
            is_unit(self.overlap.iou_threshold),
            "overlap.iou_threshold must be in [0, 1]",
        )?;

        let t = &self.tracker;
        check(
            (0.0..1.0).contains(&t.match_iou_threshold),
            "tracker.match_iou_threshold must be in [0, 1)",
        )?;
        check(
            t.smoothing_alpha > 0.0 && t.smoothing_alpha <= 1.0,
            "tracker.smoothing_alpha must be in (0, 1]",
        )?;

        let r = &self.ranker;
        check(r.min_frames >= 1, "ranker.min_frames must be at least 1")?;
        check(
            r.max_distance.is_finite() && r.max_distance > 0.0,
            "ranker.max_distance must be positive",
        )?;
        check(r.max_results >= 1, "ranker.max_results must be at least 1")?;

        if let AnnounceScope::WithinDistance { max_distance } = self.announce.scope {
            check(
                max_distance.is_finite() && max_distance > 0.0,
                "announce.scope.max_distance must be positive",
            )?;
        }
        Ok(())
    }
}
