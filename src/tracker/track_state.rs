/// Where a track stands in the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackState {
    /// Created from an unmatched candidate this tick
    #[default]
    New,
    /// Matched by a candidate this tick
    Tracked,
    /// Not matched this tick, still inside the staleness window
    Lost,
}
