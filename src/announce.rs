//! Deciding which confirmed tracks to describe aloud, and how.

mod gate;
mod phrasing;

pub use gate::{AnnounceConfig, AnnounceScope, Announcement, AnnouncementGate};
pub use phrasing::{describe, zone_phrase};
