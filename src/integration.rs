//! Integration module for connecting object detection backends with the
//! tracking pipeline.
//!
//! [`Pipeline`] runs one frame's worth of stages on detections supplied by
//! the caller; [`DetectionSession`] adds a [`DetectionSource`], throttling,
//! failure absorption and start/stop handling on top.

mod builder;
mod detector;
mod pipeline;
mod session;

pub use builder::RawDetectionBuilder;
pub use detector::DetectionSource;
pub use pipeline::{FrameOutput, Pipeline};
pub use session::DetectionSession;
