//! Trait for object detection inference backends.

use std::fmt::Display;

use crate::detection::{FrameSize, RawDetection};

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to the pipeline.
/// Failures are not fatal: the session logs them and treats the frame as
/// having no detections.
///
/// # Example
///
/// ```ignore
/// use shelfscan_rs::{DetectionSource, FrameSize, RawDetection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(
///         &mut self,
///         input: &[u8],
///         frame: FrameSize,
///     ) -> Result<Vec<RawDetection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: Display;

    /// Run inference on raw image data and return detections with boxes in
    /// pixel units of `frame`.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `frame` - Dimensions of the image in pixels
    fn detect(
        &mut self,
        input: &[u8],
        frame: FrameSize,
    ) -> Result<Vec<RawDetection>, Self::Error>;
}
