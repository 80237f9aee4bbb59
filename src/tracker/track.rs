//! A single identity-persistent object estimate.

use std::fmt;

use serde::Serialize;

use crate::detection::Candidate;
use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

/// Opaque track identifier. Unique for the lifetime of the tracker that
/// issued it; only its stability across frames is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Smoothed state of one physical object across frames.
///
/// The label is fixed at creation; a candidate with another label never
/// updates this track.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: TrackId,
    label: String,
    /// Confidence of the most recent matching candidate
    pub confidence: f32,
    /// Exponentially smoothed box
    pub smoothed_box: Rect,
    /// Exponentially smoothed distance in meters
    pub smoothed_distance: f32,
    pub last_seen_ms: u64,
    /// Number of frames a candidate has matched this track, creation included
    pub frames_seen: u32,
    pub state: TrackState,
}

impl Track {
    /// Create a new track from an unmatched candidate.
    pub fn new(id: TrackId, candidate: &Candidate, now_ms: u64) -> Self {
        Self {
            id,
            label: candidate.label.clone(),
            confidence: candidate.confidence,
            smoothed_box: candidate.bbox,
            smoothed_distance: candidate.distance,
            last_seen_ms: now_ms,
            frames_seen: 1,
            state: TrackState::New,
        }
    }

    /// Object class the track was created with.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Fold a matching candidate into the track with smoothing factor `alpha`.
    pub fn update(&mut self, candidate: &Candidate, alpha: f32, now_ms: u64) {
        debug_assert_eq!(candidate.label, self.label);

        self.frames_seen += 1;
        self.last_seen_ms = now_ms;
        self.confidence = candidate.confidence;
        self.smoothed_box = self.smoothed_box.blend(&candidate.bbox, alpha);
        self.smoothed_distance =
            alpha * candidate.distance + (1.0 - alpha) * self.smoothed_distance;
        self.state = TrackState::Tracked;
    }

    /// Mark the track as not matched in the current tick.
    pub fn mark_lost(&mut self) {
        self.state = TrackState::Lost;
    }

    /// Milliseconds since a candidate last matched this track. A clock that
    /// went backwards counts as zero.
    pub fn unmatched_for(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_seen_ms)
    }

    /// Whether the track has gone unmatched for longer than `stale_after_ms`.
    pub fn is_stale(&self, now_ms: u64, stale_after_ms: u64) -> bool {
        self.unmatched_for(now_ms) > stale_after_ms
    }
}
