//! Monocular distance heuristic based on assumed real-world object heights.

use std::collections::BTreeMap;

use crate::detection::CandidateConfig;

/// Assumed heights in meters, keyed by lower-cased detector label.
pub fn default_reference_heights() -> BTreeMap<String, f32> {
    [
        ("bottle", 0.25),
        ("cup", 0.12),
        ("can", 0.12),
        ("wine glass", 0.2),
        ("bowl", 0.08),
        ("book", 0.24),
        ("box", 0.3),
        ("cell phone", 0.15),
        ("remote", 0.18),
        ("laptop", 0.25),
        ("keyboard", 0.05),
        ("mouse", 0.04),
        ("banana", 0.2),
        ("apple", 0.08),
        ("orange", 0.08),
        ("backpack", 0.45),
        ("handbag", 0.3),
        ("suitcase", 0.6),
        ("potted plant", 0.4),
        ("vase", 0.3),
        ("chair", 0.9),
        ("couch", 0.85),
        ("bench", 0.5),
        ("dining table", 0.75),
        ("table", 0.75),
        ("bed", 0.6),
        ("tv", 0.6),
        ("refrigerator", 1.7),
        ("toilet", 0.75),
        ("sink", 0.9),
        ("door", 2.0),
        ("person", 1.7),
        ("dog", 0.5),
        ("cat", 0.3),
        ("bicycle", 1.0),
    ]
    .into_iter()
    .map(|(label, height)| (label.to_string(), height))
    .collect()
}

/// Estimate the distance to an object from its box height in pixels:
/// `reference_height(label) * focal_constant / box_height`, clamped to the
/// configured bounds.
///
/// `box_height` must be positive; malformed boxes are dropped before this.
pub fn estimate_distance(label: &str, box_height: f32, config: &CandidateConfig) -> f32 {
    let reference_height = config
        .reference_heights
        .get(&label.to_lowercase())
        .copied()
        .unwrap_or(config.default_reference_height);

    (reference_height * config.focal_constant / box_height)
        .clamp(config.min_distance, config.max_distance)
}
