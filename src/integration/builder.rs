//! Builder for creating RawDetection objects from various box formats.

use crate::detection::RawDetection;
use crate::tracker::Rect;

/// Builder for creating `RawDetection` objects from model outputs that use
/// different box conventions.
#[derive(Debug, Clone, Default)]
pub struct RawDetectionBuilder {
    label: String,
    confidence: f32,
    bbox: Rect,
}

impl RawDetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the confidence score.
    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = Rect::from_tlbr(x1, y1, x2, y2);
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.bbox = Rect::new(cx - w / 2.0, cy - h / 2.0, w, h);
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bbox = Rect::new(x, y, w, h);
        self
    }

    /// Set bounding box from coordinates normalized to `[0, 1]` of a frame.
    pub fn normalized_tlwh(
        self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        frame_w: u32,
        frame_h: u32,
    ) -> Self {
        let (fw, fh) = (frame_w as f32, frame_h as f32);
        self.tlwh(x * fw, y * fh, w * fw, h * fh)
    }

    /// Build the final `RawDetection`.
    pub fn build(self) -> RawDetection {
        RawDetection::new(self.label, self.confidence, self.bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_builder() {
        let det = RawDetectionBuilder::new()
            .label("bottle")
            .tlbr(10.0, 20.0, 50.0, 80.0)
            .confidence(0.95)
            .build();

        assert_eq!(det.label, "bottle");
        assert_eq!(det.confidence, 0.95);
        assert_eq!(det.bbox, Rect::new(10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn test_xywh() {
        let det = RawDetectionBuilder::new()
            .label("cup")
            .xywh(50.0, 50.0, 20.0, 40.0)
            .confidence(0.7)
            .build();
        assert_eq!(det.bbox, Rect::new(40.0, 30.0, 20.0, 40.0));
    }

    #[test]
    fn test_normalized() {
        let det = RawDetectionBuilder::new()
            .label("cup")
            .normalized_tlwh(0.5, 0.25, 0.1, 0.5, 640, 480)
            .confidence(0.7)
            .build();
        assert_eq!(det.bbox, Rect::new(320.0, 120.0, 64.0, 240.0));
    }
}
