//! Matching utilities for associating candidates with live tracks.

use ndarray::Array2;

use crate::detection::Candidate;
use crate::tracker::rect::iou_batch;
use crate::tracker::track::Track;

/// IoU matrix of shape (candidates, tracks) between candidate boxes and track
/// smoothed boxes. Pairs with different labels score zero.
pub fn label_gated_iou(candidates: &[Candidate], tracks: &[&Track]) -> Array2<f32> {
    let cand_boxes: Vec<_> = candidates.iter().map(|c| c.bbox).collect();
    let track_boxes: Vec<_> = tracks.iter().map(|t| t.smoothed_box).collect();
    let mut ious = iou_batch(&cand_boxes, &track_boxes);

    for (i, candidate) in candidates.iter().enumerate() {
        for (j, track) in tracks.iter().enumerate() {
            if candidate.label != track.label() {
                ious[[i, j]] = 0.0;
            }
        }
    }
    ious
}

/// Greedy assignment, one candidate row at a time in row order.
///
/// Each row takes the not-yet-taken column with the highest IoU strictly
/// above `min_iou`; the first column reaching the maximum wins ties.
/// Returns, per row, the matched column if any.
pub fn greedy_assignment(ious: &Array2<f32>, min_iou: f32) -> Vec<Option<usize>> {
    let (num_rows, num_cols) = ious.dim();
    let mut taken = vec![false; num_cols];

    (0..num_rows)
        .map(|row| {
            let mut best: Option<(usize, f32)> = None;
            for col in 0..num_cols {
                let iou = ious[[row, col]];
                if taken[col] || iou <= min_iou {
                    continue;
                }
                if best.is_none_or(|(_, best_iou)| iou > best_iou) {
                    best = Some((col, iou));
                }
            }
            best.map(|(col, _)| {
                taken[col] = true;
                col
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_picks_highest_iou() {
        let ious = array![[0.3, 0.8, 0.5]];
        assert_eq!(greedy_assignment(&ious, 0.2), vec![Some(1)]);
    }

    #[test]
    fn test_below_threshold_unmatched() {
        let ious = array![[0.2, 0.1]];
        assert_eq!(greedy_assignment(&ious, 0.2), vec![None]);
    }

    #[test]
    fn test_first_maximum_wins() {
        let ious = array![[0.6, 0.6]];
        assert_eq!(greedy_assignment(&ious, 0.2), vec![Some(0)]);
    }

    #[test]
    fn test_column_used_once() {
        let ious = array![[0.9, 0.0], [0.8, 0.1], [0.7, 0.4]];
        assert_eq!(greedy_assignment(&ious, 0.2), vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn test_empty_inputs() {
        let no_tracks = Array2::<f32>::zeros((2, 0));
        assert_eq!(greedy_assignment(&no_tracks, 0.2), vec![None, None]);
        let no_rows = Array2::<f32>::zeros((0, 3));
        assert!(greedy_assignment(&no_rows, 0.2).is_empty());
    }
}
