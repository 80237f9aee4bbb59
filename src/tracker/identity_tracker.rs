//! Identity tracking: associating each frame's candidates with persistent tracks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::detection::Candidate;
use crate::tracker::matching;
use crate::tracker::track::{Track, TrackId};
use crate::tracker::track_state::TrackState;

/// Configuration for the identity tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// A candidate matches a track only with IoU strictly above this
    pub match_iou_threshold: f32,
    /// EMA weight of the newest observation
    pub smoothing_alpha: f32,
    /// Tracks unmatched for longer than this are deleted
    pub stale_after_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            match_iou_threshold: 0.2,
            smoothing_alpha: 0.3,
            stale_after_ms: 600,
        }
    }
}

/// What a tick changed in the live track set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerUpdate {
    pub matched: Vec<TrackId>,
    pub created: Vec<TrackId>,
    /// Tracks deleted by the staleness sweep
    pub removed: Vec<TrackId>,
}

/// Sole owner of the live tracks.
///
/// Tracks are keyed by monotonically issued identifiers, so iteration order
/// is creation order and matching is reproducible.
#[derive(Debug, Clone)]
pub struct IdentityTracker {
    config: TrackerConfig,
    tracks: BTreeMap<TrackId, Track>,
    next_id: u64,
}

impl Default for IdentityTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl IdentityTracker {
    /// Create a new tracker with the given configuration.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            tracks: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Get a reference to the tracker's configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn next_track_id(&mut self) -> TrackId {
        self.next_id += 1;
        TrackId(self.next_id)
    }

    /// Fold one frame's candidates into the track set, then delete tracks
    /// that have gone unmatched for longer than the staleness window.
    ///
    /// An empty `candidates` slice is a normal frame: it only ages tracks.
    pub fn update(&mut self, candidates: &[Candidate], now_ms: u64) -> TrackerUpdate {
        let mut result = TrackerUpdate::default();

        let ids: Vec<TrackId> = self.tracks.keys().copied().collect();
        let assignment = {
            let live: Vec<&Track> = self.tracks.values().collect();
            let ious = matching::label_gated_iou(candidates, &live);
            matching::greedy_assignment(&ious, self.config.match_iou_threshold)
        };

        let mut unmatched = Vec::new();
        for (candidate, assigned) in candidates.iter().zip(assignment) {
            match assigned.and_then(|col| self.tracks.get_mut(&ids[col])) {
                Some(track) => {
                    track.update(candidate, self.config.smoothing_alpha, now_ms);
                    result.matched.push(track.id);
                }
                None => unmatched.push(candidate),
            }
        }

        for track in self.tracks.values_mut() {
            if !result.matched.contains(&track.id) {
                track.mark_lost();
            }
        }

        for candidate in unmatched {
            let id = self.next_track_id();
            debug!(track = %id, label = %candidate.label, "new track");
            self.tracks.insert(id, Track::new(id, candidate, now_ms));
            result.created.push(id);
        }

        let stale_after_ms = self.config.stale_after_ms;
        self.tracks.retain(|id, track| {
            let stale = track.is_stale(now_ms, stale_after_ms);
            if stale {
                debug!(
                    track = %id,
                    label = %track.label(),
                    unmatched_ms = track.unmatched_for(now_ms),
                    "removing stale track"
                );
                result.removed.push(*id);
            }
            !stale
        });

        trace!(
            candidates = candidates.len(),
            matched = result.matched.len(),
            created = result.created.len(),
            removed = result.removed.len(),
            live = self.tracks.len(),
            "tracker tick"
        );
        result
    }

    /// Live tracks in creation order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Drop every live track. Identifiers keep counting up, so tracks from a
    /// later session never reuse an old identifier.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Tracks that are neither new nor matched this tick.
    pub fn lost_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks
            .values()
            .filter(|t| t.state == TrackState::Lost)
    }
}
