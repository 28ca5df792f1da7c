use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::visibility::frames::Geodetic;

/// Visible-satellite count for one ground station at one instant
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StationCount {
    pub station_index: usize,
    pub name: String,
    pub visible_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VisibilitySample {
    /// Milliseconds since the Unix epoch (UTC)
    pub timestamp_ms: i64,
    /// `HH:MM:SS` label in UTC
    pub time: String,
    pub per_station: Vec<StationCount>,
}

impl VisibilitySample {
    pub fn count(&self, station_index: usize) -> u32 {
        self.per_station
            .get(station_index)
            .map(|c| c.visible_count)
            .unwrap_or(0)
    }
}

pub fn time_label(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M:%S").to_string()
}

/// One point of a satellite's ground track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct TrackPoint {
    pub timestamp_ms: i64,
    pub geodetic: Geodetic,
}
