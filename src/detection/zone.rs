//! Coarse spatial zones relative to the camera's field of view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detection::FrameSize;
use crate::tracker::Rect;

/// Normalized coordinate below which a box center falls in the left/top band.
pub const LOWER_SPLIT: f32 = 0.35;
/// Normalized coordinate above which a box center falls in the right/bottom band.
pub const UPPER_SPLIT: f32 = 0.65;

/// How finely the frame is divided into zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneLayout {
    /// Left / center / right only.
    #[default]
    Horizontal,
    /// 3x3 grid: the horizontal bands split again into top / middle / bottom.
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalZone {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalZone {
    Top,
    Middle,
    Bottom,
}

/// Where a box sits in the frame. `vertical` is only set for the grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpatialZone {
    pub horizontal: HorizontalZone,
    pub vertical: Option<VerticalZone>,
}

fn band(normalized: f32) -> usize {
    if normalized < LOWER_SPLIT {
        0
    } else if normalized > UPPER_SPLIT {
        2
    } else {
        1
    }
}

impl SpatialZone {
    /// Classify a box by the normalized position of its center in `frame`.
    ///
    /// A degenerate frame places every box in the center.
    pub fn classify(bbox: &Rect, frame: FrameSize, layout: ZoneLayout) -> Self {
        let (cx, cy) = bbox.center();
        let (nx, ny) = if frame.is_degenerate() {
            (0.5, 0.5)
        } else {
            (cx / frame.width as f32, cy / frame.height as f32)
        };

        let horizontal = match band(nx) {
            0 => HorizontalZone::Left,
            2 => HorizontalZone::Right,
            _ => HorizontalZone::Center,
        };
        let vertical = match layout {
            ZoneLayout::Horizontal => None,
            ZoneLayout::Grid => Some(match band(ny) {
                0 => VerticalZone::Top,
                2 => VerticalZone::Bottom,
                _ => VerticalZone::Middle,
            }),
        };

        Self {
            horizontal,
            vertical,
        }
    }
}

impl HorizontalZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl VerticalZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for SpatialZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vertical {
            Some(vertical) => write!(f, "{}-{}", vertical.as_str(), self.horizontal.as_str()),
            None => f.write_str(self.horizontal.as_str()),
        }
    }
}

impl Serialize for SpatialZone {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
