//! Detector output as it arrives from the model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tracker::Rect;

/// Dimensions of the frame a batch of detections was produced on.
///
/// Frames may change size between ticks (device or orientation change), so
/// every zone and distance computation takes the current `FrameSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A frame with a zero dimension cannot place anything.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One object reported by the external detector for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub label: String,
    /// Detector confidence in `[0, 1]`
    pub confidence: f32,
    /// Box in pixel units of the current frame, `[x, y, width, height]` on the wire
    #[serde(rename = "box")]
    pub bbox: Rect,
}

impl RawDetection {
    pub fn new(label: impl Into<String>, confidence: f32, bbox: Rect) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }

    /// Whether the detection carries usable values: a non-empty label, a
    /// finite confidence in `[0, 1]` and a finite box with positive size.
    pub fn is_well_formed(&self) -> bool {
        !self.label.trim().is_empty()
            && self.confidence.is_finite()
            && (0.0..=1.0).contains(&self.confidence)
            && self.bbox.is_well_formed()
    }

    /// Parse a JSON array of detections.
    ///
    /// Entries that fail to deserialize or are not well formed are dropped
    /// one by one; only a document that is not a JSON array is an error.
    pub fn parse_batch(json: &str) -> Result<Vec<RawDetection>, serde_json::Error> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let total = entries.len();

        let detections: Vec<RawDetection> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<RawDetection>(entry) {
                Ok(det) if det.is_well_formed() => Some(det),
                Ok(det) => {
                    debug!(label = %det.label, "dropping malformed detection");
                    None
                }
                Err(err) => {
                    debug!(error = %err, "dropping undecodable detection");
                    None
                }
            })
            .collect();

        if detections.len() < total {
            debug!(kept = detections.len(), total, "parsed detection batch");
        }
        Ok(detections)
    }
}
