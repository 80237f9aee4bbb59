//! Turns noisy per-frame object detections into stable, identity-persistent
//! object descriptions suitable for voice announcement.
//!
//! Each frame flows through five stages: candidate building, overlap
//! suppression, identity tracking, stability ranking and the announcement
//! gate. Only the tracker keeps state across frames.

pub mod announce;
pub mod config;
pub mod detection;
pub mod error;
pub mod integration;
pub mod ranker;
pub mod tracker;

pub use announce::{AnnounceConfig, AnnounceScope, Announcement, AnnouncementGate};
pub use config::PipelineConfig;
pub use detection::{Candidate, CandidateBuilder, FrameSize, RawDetection, SpatialZone, ZoneLayout};
pub use error::{Error, Result};
pub use integration::{
    DetectionSession, DetectionSource, FrameOutput, Pipeline, RawDetectionBuilder,
};
pub use ranker::{StabilityRanker, TrackedObject};
pub use tracker::{IdentityTracker, Rect, Track, TrackId, TrackState, TrackerConfig};
