use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StationStatistic {
    pub station_index: usize,
    pub name: String,
    pub average_visible: f64,
    pub median_visible: f64,
    /// Fraction of samples with at least one satellite in view
    pub non_zero_rate: f64,
}

/// Block-mean of one station's counts
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StationAverage {
    pub station_index: usize,
    pub name: String,
    pub visible_count: f64,
}

/// One block of consecutive samples reduced to a single display point,
/// labelled with the block's middle sample.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AveragedSample {
    pub timestamp_ms: i64,
    pub time: String,
    pub per_station: Vec<StationAverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AvailabilityMetric {
    pub station_index: usize,
    pub name: String,
    pub time_availability_percent: f64,
    pub interruptions_per_day: u64,
    pub max_interruption_minutes: f64,
    pub avg_interruption_minutes: f64,
}
