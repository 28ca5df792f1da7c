mod availability;
mod block;
mod scalar;
mod types;

pub use availability::availability_metrics;
pub use block::block_average;
pub use scalar::{median, station_statistics};
pub use types::{AvailabilityMetric, AveragedSample, StationAverage, StationStatistic};
