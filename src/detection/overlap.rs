//! Greedy non-maximum suppression over a frame's candidates.

use serde::{Deserialize, Serialize};

use crate::detection::Candidate;

/// Configuration for overlap suppression between candidates of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapConfig {
    /// Candidates overlapping a kept candidate by more than this IoU are dropped
    pub iou_threshold: f32,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self { iou_threshold: 0.3 }
    }
}

/// Keep the most confident candidate out of every overlapping group.
///
/// Candidates are visited in descending confidence (stable, so equal
/// confidences keep their input order) and kept unless their IoU with an
/// already kept candidate exceeds `iou_threshold`. Labels are not compared.
pub fn suppress_overlaps(mut candidates: Vec<Candidate>, iou_threshold: f32) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept
            .iter()
            .all(|k| k.bbox.iou(&candidate.bbox) <= iou_threshold)
        {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{HorizontalZone, SpatialZone};
    use crate::tracker::Rect;

    fn candidate(label: &str, confidence: f32, bbox: Rect) -> Candidate {
        Candidate {
            label: label.to_string(),
            confidence,
            bbox,
            distance: 1.0,
            zone: SpatialZone {
                horizontal: HorizontalZone::Center,
                vertical: None,
            },
        }
    }

    #[test]
    fn test_keeps_higher_confidence() {
        let a = candidate("bottle", 0.6, Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = candidate("bottle", 0.9, Rect::new(5.0, 5.0, 100.0, 100.0));
        let kept = suppress_overlaps(vec![a, b], 0.3);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn test_keeps_disjoint() {
        let a = candidate("bottle", 0.6, Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = candidate("bottle", 0.9, Rect::new(50.0, 50.0, 10.0, 10.0));
        let kept = suppress_overlaps(vec![a, b], 0.3);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // IoU of these two is 25 / 175 = 0.142
        let a = candidate("cup", 0.9, Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = candidate("cup", 0.8, Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(suppress_overlaps(vec![a.clone(), b.clone()], 0.3).len(), 2);
        assert_eq!(suppress_overlaps(vec![a, b], 0.1).len(), 1);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let a = candidate("cup", 0.7, Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = candidate("can", 0.7, Rect::new(1.0, 0.0, 10.0, 10.0));
        let kept = suppress_overlaps(vec![a, b], 0.3);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].label, "cup");
    }

    #[test]
    fn test_empty() {
        assert!(suppress_overlaps(Vec::new(), 0.3).is_empty());
    }
}
