//! Candidate building: filtering raw detections and attaching distance and zone.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::detection::{
    FrameSize, RawDetection, SpatialZone, ZoneLayout, default_reference_heights,
    estimate_distance,
};
use crate::tracker::Rect;

/// Configuration for turning raw detections into candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// Detections below this confidence are discarded
    pub confidence_threshold: f32,
    /// Labels never reported, compared case-insensitively
    pub excluded_labels: BTreeSet<String>,
    /// Assumed real-world heights in meters, keyed by lower-cased label.
    /// Entries read from configuration extend the built-in table.
    #[serde(deserialize_with = "merge_reference_heights")]
    pub reference_heights: BTreeMap<String, f32>,
    /// Height used for labels missing from `reference_heights`
    pub default_reference_height: f32,
    /// Empirical calibration constant, not derived from camera intrinsics
    pub focal_constant: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub zone_layout: ZoneLayout,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            excluded_labels: BTreeSet::new(),
            reference_heights: default_reference_heights(),
            default_reference_height: 0.3,
            focal_constant: 600.0,
            min_distance: 0.1,
            max_distance: 10.0,
            zone_layout: ZoneLayout::Horizontal,
        }
    }
}

/// Lay configured heights over the built-in table, lower-casing their labels.
fn merge_reference_heights<'de, D>(deserializer: D) -> Result<BTreeMap<String, f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, f32>::deserialize(deserializer)?;
    let mut heights = default_reference_heights();
    heights.extend(
        overrides
            .into_iter()
            .map(|(label, height)| (label.to_lowercase(), height)),
    );
    Ok(heights)
}

impl CandidateConfig {
    /// Whether `label` is in the excluded set, ignoring case.
    pub fn is_excluded(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.excluded_labels
            .iter()
            .any(|excluded| excluded.to_lowercase() == label)
    }
}

/// A detection that survived filtering, with its distance and zone attached.
/// Lives for one frame only.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub label: String,
    pub confidence: f32,
    pub bbox: Rect,
    /// Estimated distance in meters
    pub distance: f32,
    /// Zone of the raw detection box. Reported objects use the zone of the
    /// track's smoothed box instead.
    pub zone: SpatialZone,
}

/// Builds the candidate list for a frame.
#[derive(Debug, Clone, Default)]
pub struct CandidateBuilder {
    config: CandidateConfig,
}

impl CandidateBuilder {
    /// Create a new candidate builder with the given configuration.
    pub fn new(config: CandidateConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the builder's configuration.
    pub fn config(&self) -> &CandidateConfig {
        &self.config
    }

    /// Filter `detections` and compute distance and zone for each survivor,
    /// relative to the current `frame`.
    pub fn build(&self, detections: &[RawDetection], frame: FrameSize) -> Vec<Candidate> {
        detections
            .iter()
            .filter_map(|det| self.build_one(det, frame))
            .collect()
    }

    fn build_one(&self, det: &RawDetection, frame: FrameSize) -> Option<Candidate> {
        if !det.is_well_formed() {
            debug!(label = %det.label, "dropping malformed detection");
            return None;
        }
        if det.confidence < self.config.confidence_threshold {
            return None;
        }
        if self.config.is_excluded(&det.label) {
            debug!(label = %det.label, "dropping excluded label");
            return None;
        }

        Some(Candidate {
            label: det.label.clone(),
            confidence: det.confidence,
            bbox: det.bbox,
            distance: estimate_distance(&det.label, det.bbox.height, &self.config),
            zone: SpatialZone::classify(&det.bbox, frame, self.config.zone_layout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::HorizontalZone;

    fn frame() -> FrameSize {
        FrameSize::new(640, 480)
    }

    #[test]
    fn test_builds_candidate() {
        let builder = CandidateBuilder::default();
        let dets = [RawDetection::new(
            "bottle",
            0.8,
            Rect::new(100.0, 100.0, 50.0, 200.0),
        )];

        let candidates = builder.build(&dets, frame());
        assert_eq!(candidates.len(), 1);
        assert!((candidates[0].distance - 0.75).abs() < 1e-6);
        // center x = 125 / 640 = 0.195
        assert_eq!(candidates[0].zone.horizontal, HorizontalZone::Left);
    }

    #[test]
    fn test_confidence_threshold() {
        let builder = CandidateBuilder::default();
        let bbox = Rect::new(0.0, 0.0, 10.0, 10.0);
        let dets = [
            RawDetection::new("cup", 0.49, bbox),
            RawDetection::new("cup", 0.5, bbox),
        ];
        let candidates = builder.build(&dets, frame());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].confidence, 0.5);
    }

    #[test]
    fn test_excluded_labels() {
        let config = CandidateConfig {
            excluded_labels: ["person".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let builder = CandidateBuilder::new(config);
        let bbox = Rect::new(0.0, 0.0, 10.0, 10.0);
        let dets = [
            RawDetection::new("Person", 0.9, bbox),
            RawDetection::new("bottle", 0.9, bbox),
        ];
        let candidates = builder.build(&dets, frame());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].label, "bottle");
    }

    #[test]
    fn test_configured_heights_extend_defaults() {
        let config: CandidateConfig =
            serde_json::from_str(r#"{"reference_heights": {"Soda": 0.12}}"#).unwrap();
        assert_eq!(config.reference_heights.get("soda"), Some(&0.12));
        assert_eq!(config.reference_heights.get("bottle"), Some(&0.25));

        let builder = CandidateBuilder::new(config);
        let dets = [RawDetection::new(
            "Soda",
            0.9,
            Rect::new(0.0, 0.0, 40.0, 120.0),
        )];
        // 0.12 * 600 / 120
        assert!((builder.build(&dets, frame())[0].distance - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_dropped() {
        let builder = CandidateBuilder::default();
        let dets = [
            RawDetection::new("cup", f32::NAN, Rect::new(0.0, 0.0, 10.0, 10.0)),
            RawDetection::new("cup", 0.9, Rect::new(0.0, 0.0, 10.0, 0.0)),
            RawDetection::new("cup", 0.9, Rect::new(f32::NAN, 0.0, 10.0, 10.0)),
        ];
        assert!(builder.build(&dets, frame()).is_empty());
    }
}
