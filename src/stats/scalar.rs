use crate::stats::types::StationStatistic;
use crate::visibility::VisibilitySample;

/// Mean, median and non-zero rate of every station's raw counts.
/// An empty series has no statistics.
pub fn station_statistics(samples: &[VisibilitySample]) -> Vec<StationStatistic> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };

    first
        .per_station
        .iter()
        .map(|station| {
            let counts: Vec<u32> = samples.iter().map(|s| s.count(station.station_index)).collect();
            let n = counts.len() as f64;
            let total: u64 = counts.iter().map(|&c| u64::from(c)).sum();
            let non_zero = counts.iter().filter(|&&c| c > 0).count();

            StationStatistic {
                station_index: station.station_index,
                name: station.name.clone(),
                average_visible: total as f64 / n,
                median_visible: median(&counts),
                non_zero_rate: non_zero as f64 / n,
            }
        })
        .collect()
}

/// Middle value, or the mean of the two middle values for an even count
pub fn median(counts: &[u32]) -> f64 {
    let mut sorted = counts.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => 0.0,
        len if len % 2 == 0 => (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0,
        _ => f64::from(sorted[mid]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::series;

    #[test]
    fn empty_series_has_no_statistics() {
        assert!(station_statistics(&[]).is_empty());
    }

    #[test]
    fn mean_median_and_non_zero_rate() {
        let samples = series(&[&[0, 3], &[2, 3], &[4, 0], &[0, 1]]);
        let stats = station_statistics(&samples);
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].name, "S0");
        assert_eq!(stats[0].average_visible, 1.5);
        assert_eq!(stats[0].median_visible, 1.0);
        assert_eq!(stats[0].non_zero_rate, 0.5);

        assert_eq!(stats[1].average_visible, 1.75);
        assert_eq!(stats[1].median_visible, 2.0);
        assert_eq!(stats[1].non_zero_rate, 0.75);
    }

    #[test]
    fn odd_length_median_is_middle_element() {
        assert_eq!(median(&[5, 1, 3]), 3.0);
        assert_eq!(median(&[7]), 7.0);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn non_zero_rate_stays_in_unit_interval() {
        let samples = series(&[&[1], &[1], &[1]]);
        assert_eq!(station_statistics(&samples)[0].non_zero_rate, 1.0);
        let samples = series(&[&[0], &[0]]);
        assert_eq!(station_statistics(&samples)[0].non_zero_rate, 0.0);
    }
}
