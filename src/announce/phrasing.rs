//! Spoken descriptions of a tracked object, bucketed by distance band.

use crate::detection::{HorizontalZone, SpatialZone, VerticalZone};

/// Within this distance (meters) the object is described as in reach.
const IN_REACH: f32 = 0.5;
/// Below this distance the object is described in centimeters.
const CENTIMETER_BAND: f32 = 1.0;
/// Below this distance the object is described to a tenth of a meter.
const NEAR_BAND: f32 = 2.0;

/// Where the zone is, as said to the user.
pub fn zone_phrase(zone: &SpatialZone) -> String {
    let horizontal = match zone.horizontal {
        HorizontalZone::Left => "on your left",
        HorizontalZone::Center => "straight ahead",
        HorizontalZone::Right => "on your right",
    };
    match zone.vertical {
        Some(VerticalZone::Top) => format!("{horizontal}, up high"),
        Some(VerticalZone::Bottom) => format!("{horizontal}, down low"),
        Some(VerticalZone::Middle) | None => horizontal.to_string(),
    }
}

/// Sentence announcing `label` at `distance` meters in `zone`.
pub fn describe(label: &str, distance: f32, zone: &SpatialZone) -> String {
    let place = zone_phrase(zone);
    if distance < IN_REACH {
        format!("{label} within reach, {place}")
    } else if distance < CENTIMETER_BAND {
        let centimeters = (distance * 100.0).round() as u32;
        format!("{label}, {centimeters} centimeters, {place}")
    } else if distance < NEAR_BAND {
        format!("{label}, {distance:.1} meters, {place}")
    } else {
        format!("{label}, about {} meters away, {place}", distance.round() as u32)
    }
}
