mod identity_tracker;
mod matching;
mod rect;
mod track;
mod track_state;

pub use identity_tracker::{IdentityTracker, TrackerConfig, TrackerUpdate};
pub use matching::{greedy_assignment, label_gated_iou};
pub use rect::{Rect, iou_batch};
pub use track::{Track, TrackId};
pub use track_state::TrackState;
