//! Stability filtering and ranking of live tracks.

use serde::{Deserialize, Serialize};

use crate::detection::{FrameSize, SpatialZone, ZoneLayout};
use crate::tracker::{IdentityTracker, Rect, Track, TrackId, TrackState};

/// Configuration for which tracks are reported and how many.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Frames a track must have been matched before it is reported
    pub min_frames: u32,
    /// Tracks farther than this (meters) are not reported
    pub max_distance: f32,
    /// Maximum number of reported tracks
    pub max_results: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            min_frames: 5,
            max_distance: 5.0,
            max_results: 5,
        }
    }
}

/// Read-only snapshot of a confirmed track, as handed to rendering and voice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedObject {
    pub track_id: TrackId,
    pub label: String,
    pub confidence: f32,
    pub smoothed_box: Rect,
    pub smoothed_distance: f32,
    /// Zone of the smoothed box in the current frame
    pub spatial_zone: SpatialZone,
    pub frames_seen: u32,
    pub state: TrackState,
}

impl TrackedObject {
    pub fn from_track(track: &Track, frame: FrameSize, layout: ZoneLayout) -> Self {
        Self {
            track_id: track.id,
            label: track.label().to_string(),
            confidence: track.confidence,
            smoothed_box: track.smoothed_box,
            smoothed_distance: track.smoothed_distance,
            spatial_zone: SpatialZone::classify(&track.smoothed_box, frame, layout),
            frames_seen: track.frames_seen,
            state: track.state,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StabilityRanker {
    config: RankerConfig,
}

impl StabilityRanker {
    /// Create a new ranker with the given configuration.
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the ranker's configuration.
    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    pub fn is_confirmed(&self, track: &Track) -> bool {
        track.frames_seen >= self.config.min_frames
            && track.smoothed_distance <= self.config.max_distance
    }

    /// Confirmed tracks, nearest first, truncated to `max_results`.
    /// Equal distances keep creation order.
    pub fn rank(
        &self,
        tracker: &IdentityTracker,
        frame: FrameSize,
        layout: ZoneLayout,
    ) -> Vec<TrackedObject> {
        let mut confirmed: Vec<&Track> = tracker
            .tracks()
            .filter(|track| self.is_confirmed(track))
            .collect();
        confirmed.sort_by(|a, b| a.smoothed_distance.total_cmp(&b.smoothed_distance));
        confirmed.truncate(self.config.max_results);

        confirmed
            .into_iter()
            .map(|track| TrackedObject::from_track(track, frame, layout))
            .collect()
    }
}
