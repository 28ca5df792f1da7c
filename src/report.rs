//! Comma-separated visibility report, one row per sample.

use crate::visibility::{GroundStation, VisibilitySample};

pub const TIME_COLUMN: &str = "Time(sec)";

/// Header `Time(sec),<station names>` followed by one row per sample holding
/// the seconds since the first sample and each station's visible count.
/// Rows are newline-separated with no trailing newline.
pub fn visibility_report(stations: &[GroundStation], samples: &[VisibilitySample]) -> String {
    let header = std::iter::once(TIME_COLUMN)
        .chain(stations.iter().map(|s| s.name.as_str()))
        .collect::<Vec<_>>()
        .join(",");

    let first_ms = samples.first().map(|s| s.timestamp_ms).unwrap_or(0);
    let rows = samples.iter().map(|sample| {
        let elapsed = (sample.timestamp_ms - first_ms) as f64 / 1000.0;
        std::iter::once(elapsed.to_string())
            .chain((0..stations.len()).map(|i| sample.count(i).to_string()))
            .collect::<Vec<_>>()
            .join(",")
    });

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}
