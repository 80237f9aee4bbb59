//! DetectionSession for driving a detector and the pipeline frame by frame.

use tracing::{info, warn};

use super::DetectionSource;
use super::pipeline::{FrameOutput, Pipeline};
use crate::config::PipelineConfig;
use crate::detection::FrameSize;
use crate::error::Result;

/// A camera session that bundles a detector with the tracking pipeline.
///
/// Frames are processed strictly one at a time in arrival order: `&mut self`
/// on [`DetectionSession::process_frame`] means the detector is never invoked
/// again before the previous call has returned.
pub struct DetectionSession<D: DetectionSource> {
    detector: D,
    pipeline: Pipeline,
    detect_every: u32,
    ticks: u64,
    running: bool,
}

impl<D: DetectionSource> DetectionSession<D> {
    /// Create a running session with the given detector and configuration.
    pub fn new(detector: D, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            detector,
            pipeline: Pipeline::new(config)?,
            detect_every: 1,
            ticks: 0,
            running: true,
        })
    }

    /// Create a new session with default pipeline configuration.
    pub fn with_default_config(detector: D) -> Result<Self> {
        Self::new(detector, PipelineConfig::default())
    }

    /// Only run the pipeline on every `n`th display tick to bound detector
    /// cost. `n = 0` is treated as 1.
    pub fn detect_every(mut self, n: u32) -> Self {
        self.detect_every = n.max(1);
        self
    }

    /// Process one display tick.
    ///
    /// Returns `None` when the session is stopped or the tick is skipped by
    /// throttling. A detector failure is logged and the frame is processed
    /// as having no detections, which only ages the live tracks.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `frame` - Image dimensions in pixels
    /// * `now_ms` - Monotonic timestamp of the frame in milliseconds
    pub fn process_frame(
        &mut self,
        input: &[u8],
        frame: FrameSize,
        now_ms: u64,
    ) -> Option<FrameOutput> {
        if !self.running {
            return None;
        }

        let tick = self.ticks;
        self.ticks += 1;
        if tick % u64::from(self.detect_every) != 0 {
            return None;
        }

        if frame.is_degenerate() {
            warn!(width = frame.width, height = frame.height, "degenerate frame size");
        }

        let detections = match self.detector.detect(input, frame) {
            Ok(detections) => detections,
            Err(err) => {
                warn!(error = %err, "detector failed, treating frame as empty");
                Vec::new()
            }
        };
        Some(self.pipeline.tick(&detections, frame, now_ms))
    }

    /// Resume processing after [`DetectionSession::stop`].
    pub fn start(&mut self) {
        if !self.running {
            info!("detection session started");
            self.running = true;
            self.ticks = 0;
        }
    }

    /// Halt processing and drop all track and announcement state, so a later
    /// `start` begins cold.
    pub fn stop(&mut self) {
        if self.running {
            info!(tracks = self.pipeline.tracker().len(), "detection session stopped");
        }
        self.running = false;
        self.pipeline.reset();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}
