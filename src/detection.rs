//! Per-frame detection handling: turning raw detector output into
//! normalized candidates and removing duplicate reports of one object.

mod candidate;
mod distance;
mod overlap;
mod raw;
mod zone;

pub use candidate::{Candidate, CandidateBuilder, CandidateConfig};
pub use distance::{default_reference_heights, estimate_distance};
pub use overlap::{OverlapConfig, suppress_overlaps};
pub use raw::{FrameSize, RawDetection};
pub use zone::{HorizontalZone, SpatialZone, VerticalZone, ZoneLayout};
