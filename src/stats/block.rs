use crate::stats::types::{AveragedSample, StationAverage};
use crate::visibility::VisibilitySample;

/// Reduce the series to one point per `block_size` consecutive samples. The
/// last block may be shorter. Counts are averaged without rounding.
pub fn block_average(samples: &[VisibilitySample], block_size: usize) -> Vec<AveragedSample> {
    samples
        .chunks(block_size.max(1))
        .filter_map(|chunk| {
            let middle = chunk.get(chunk.len() / 2)?;
            let n = chunk.len() as f64;
            let per_station = middle
                .per_station
                .iter()
                .map(|station| {
                    let sum: u64 = chunk
                        .iter()
                        .map(|s| u64::from(s.count(station.station_index)))
                        .sum();
                    StationAverage {
                        station_index: station.station_index,
                        name: station.name.clone(),
                        visible_count: sum as f64 / n,
                    }
                })
                .collect();

            Some(AveragedSample {
                timestamp_ms: middle.timestamp_ms,
                time: middle.time.clone(),
                per_station,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::series;

    #[test]
    fn chunks_take_middle_label_and_fractional_mean() {
        let samples = series(&[&[1], &[2], &[2], &[0], &[5], &[3], &[4]]);
        let averaged = block_average(&samples, 3);
        assert_eq!(averaged.len(), 3);

        assert_eq!(averaged[0].timestamp_ms, samples[1].timestamp_ms);
        assert!((averaged[0].per_station[0].visible_count - 5.0 / 3.0).abs() < 1e-12);

        assert_eq!(averaged[1].time, samples[4].time);
        assert!((averaged[1].per_station[0].visible_count - 8.0 / 3.0).abs() < 1e-12);

        // trailing single-sample block
        assert_eq!(averaged[2].timestamp_ms, samples[6].timestamp_ms);
        assert_eq!(averaged[2].per_station[0].visible_count, 4.0);
    }

    #[test]
    fn even_chunk_uses_upper_middle() {
        let samples = series(&[&[0], &[1], &[2], &[3]]);
        let averaged = block_average(&samples, 4);
        assert_eq!(averaged.len(), 1);
        assert_eq!(averaged[0].timestamp_ms, samples[2].timestamp_ms);
        assert_eq!(averaged[0].per_station[0].visible_count, 1.5);
    }

    #[test]
    fn block_of_one_is_identity_on_counts() {
        let samples = series(&[&[3, 0], &[1, 2]]);
        let averaged = block_average(&samples, 1);
        let counts: Vec<f64> = averaged.iter().map(|a| a.per_station[1].visible_count).collect();
        assert_eq!(counts, vec![0.0, 2.0]);
        assert_eq!(block_average(&samples, 0).len(), 2);
    }

    #[test]
    fn empty_series_averages_to_nothing() {
        assert!(block_average(&[], 6).is_empty());
    }
}
