//! The per-frame pipeline: candidates, overlap suppression, tracking,
//! ranking and announcement, composed into one tick.

use serde::Serialize;
use tracing::trace;

use crate::announce::{Announcement, AnnouncementGate};
use crate::config::PipelineConfig;
use crate::detection::{CandidateBuilder, FrameSize, RawDetection, suppress_overlaps};
use crate::error::Result;
use crate::ranker::{StabilityRanker, TrackedObject};
use crate::tracker::IdentityTracker;

/// Everything a tick hands to rendering and voice output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameOutput {
    /// Confirmed tracks, nearest first
    pub objects: Vec<TrackedObject>,
    pub announcements: Vec<Announcement>,
}

/// All per-session state, threaded through one `tick` per frame.
///
/// The tracker is the only stage that keeps tracks across ticks; the gate
/// keeps only announcement records, dropped as their tracks are deleted.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    candidates: CandidateBuilder,
    tracker: IdentityTracker,
    ranker: StabilityRanker,
    gate: AnnouncementGate,
}

impl Pipeline {
    /// Create a pipeline, rejecting invalid configuration up front.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            candidates: CandidateBuilder::new(config.candidates.clone()),
            tracker: IdentityTracker::new(config.tracker.clone()),
            ranker: StabilityRanker::new(config.ranker.clone()),
            gate: AnnouncementGate::new(config.announce.clone()),
            config,
        })
    }

    /// Get a reference to the pipeline's configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run all stages for one frame.
    ///
    /// `frame` is the size of the image the detections were produced on and
    /// may differ from tick to tick. `now_ms` must not decrease across ticks.
    pub fn tick(
        &mut self,
        detections: &[RawDetection],
        frame: FrameSize,
        now_ms: u64,
    ) -> FrameOutput {
        let candidates = self.candidates.build(detections, frame);
        let candidates = suppress_overlaps(candidates, self.config.overlap.iou_threshold);

        let update = self.tracker.update(&candidates, now_ms);
        self.gate.forget(&update.removed);

        let objects = self
            .ranker
            .rank(&self.tracker, frame, self.config.candidates.zone_layout);
        let announcements = self.gate.evaluate(&objects, now_ms);

        trace!(
            detections = detections.len(),
            candidates = candidates.len(),
            confirmed = objects.len(),
            announced = announcements.len(),
            "pipeline tick"
        );
        FrameOutput {
            objects,
            announcements,
        }
    }

    /// Forget every track and announcement record so the next tick starts cold.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.gate.clear();
    }

    pub fn tracker(&self) -> &IdentityTracker {
        &self.tracker
    }

    pub fn gate(&self) -> &AnnouncementGate {
        &self.gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Rect;

    fn bottle() -> RawDetection {
        RawDetection::new("bottle", 0.8, Rect::new(100.0, 100.0, 50.0, 200.0))
    }

    fn frame() -> FrameSize {
        FrameSize::new(640, 480)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.ranker.max_results = 0;
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn test_duplicates_collapse_to_one_track() {
        let mut pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let dets = [
            bottle(),
            RawDetection::new("bottle", 0.6, Rect::new(102.0, 101.0, 50.0, 200.0)),
        ];
        pipeline.tick(&dets, frame(), 0);
        assert_eq!(pipeline.tracker().len(), 1);
        assert_eq!(pipeline.tracker().tracks().next().unwrap().confidence, 0.8);
    }

    #[test]
    fn test_removed_tracks_lose_announcement_record() {
        let mut config = PipelineConfig::default();
        config.ranker.min_frames = 1;
        let mut pipeline = Pipeline::new(config).unwrap();

        let out = pipeline.tick(&[bottle()], frame(), 0);
        assert_eq!(out.announcements.len(), 1);
        assert_eq!(pipeline.gate().len(), 1);

        pipeline.tick(&[], frame(), 700);
        assert!(pipeline.tracker().is_empty());
        assert!(pipeline.gate().is_empty());
    }

    #[test]
    fn test_reset_starts_cold() {
        let mut config = PipelineConfig::default();
        config.ranker.min_frames = 1;
        let mut pipeline = Pipeline::new(config).unwrap();
        pipeline.tick(&[bottle()], frame(), 0);

        pipeline.reset();
        assert!(pipeline.tracker().is_empty());
        assert!(pipeline.gate().is_empty());

        let out = pipeline.tick(&[bottle()], frame(), 10);
        assert_eq!(out.announcements.len(), 1);
    }
}
