//! Per-track announcement throttling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::announce::phrasing;
use crate::ranker::TrackedObject;
use crate::tracker::TrackId;

/// Which confirmed tracks are considered for announcement each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnnounceScope {
    /// Only the nearest confirmed track
    #[default]
    Nearest,
    /// Every confirmed track closer than `max_distance` meters
    WithinDistance { max_distance: f32 },
    /// Every confirmed track
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnounceConfig {
    /// Minimum time between two announcements of the same track
    pub cooldown_ms: u64,
    pub scope: AnnounceScope,
}

impl Default for AnnounceConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 3000,
            scope: AnnounceScope::Nearest,
        }
    }
}

/// A description to be spoken for one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub track_id: TrackId,
    pub text: String,
}

/// Decides when a confirmed track is described aloud.
///
/// Holds one announcement record (time of last announcement) per track.
/// Records must be dropped through [`AnnouncementGate::forget`] when their
/// track is deleted.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementGate {
    config: AnnounceConfig,
    last_announced: HashMap<TrackId, u64>,
}

impl AnnouncementGate {
    /// Create a new gate with the given configuration.
    pub fn new(config: AnnounceConfig) -> Self {
        Self {
            config,
            last_announced: HashMap::new(),
        }
    }

    /// Get a reference to the gate's configuration.
    pub fn config(&self) -> &AnnounceConfig {
        &self.config
    }

    pub fn last_announced(&self, id: TrackId) -> Option<u64> {
        self.last_announced.get(&id).copied()
    }

    /// True if `id` was never announced or its cooldown has fully elapsed.
    pub fn is_due(&self, id: TrackId, now_ms: u64) -> bool {
        match self.last_announced(id) {
            Some(at) => now_ms.saturating_sub(at) >= self.config.cooldown_ms,
            None => true,
        }
    }

    /// Announce every in-scope track that is due. `confirmed` must be sorted
    /// nearest first, as produced by the ranker.
    pub fn evaluate(&mut self, confirmed: &[TrackedObject], now_ms: u64) -> Vec<Announcement> {
        let in_scope: Vec<&TrackedObject> = match self.config.scope {
            AnnounceScope::Nearest => confirmed.iter().take(1).collect(),
            AnnounceScope::WithinDistance { max_distance } => confirmed
                .iter()
                .filter(|obj| obj.smoothed_distance < max_distance)
                .collect(),
            AnnounceScope::All => confirmed.iter().collect(),
        };

        let mut announcements = Vec::new();
        for obj in in_scope {
            if !self.is_due(obj.track_id, now_ms) {
                debug!(track = %obj.track_id, "announcement suppressed by cooldown");
                continue;
            }
            let text = phrasing::describe(&obj.label, obj.smoothed_distance, &obj.spatial_zone);
            info!(track = %obj.track_id, text = %text, "announcing");
            self.last_announced.insert(obj.track_id, now_ms);
            announcements.push(Announcement {
                track_id: obj.track_id,
                text,
            });
        }
        announcements
    }

    /// Drop the records of deleted tracks.
    pub fn forget(&mut self, ids: &[TrackId]) {
        for id in ids {
            self.last_announced.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.last_announced.clear();
    }

    pub fn len(&self) -> usize {
        self.last_announced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_announced.is_empty()
    }
}
