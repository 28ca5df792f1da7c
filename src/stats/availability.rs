use crate::stats::types::AvailabilityMetric;
use crate::visibility::VisibilitySample;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Contact availability and interruption statistics per station. A station is
/// in contact at an instant when it sees at least one satellite; every maximal
/// run of instants out of contact is one interruption.
pub fn availability_metrics(
    samples: &[VisibilitySample],
    step_seconds: f64,
) -> Vec<AvailabilityMetric> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    let total = samples.len();
    let observed_seconds = total as f64 * step_seconds;

    first
        .per_station
        .iter()
        .map(|station| {
            let in_contact: Vec<bool> = samples
                .iter()
                .map(|s| s.count(station.station_index) > 0)
                .collect();
            let contact_samples = in_contact.iter().filter(|&&c| c).count();
            let runs = interruption_runs(&in_contact);

            let (interruptions_per_day, max_minutes, avg_minutes) =
                if runs.is_empty() || observed_seconds <= 0.0 {
                    (0, 0.0, 0.0)
                } else {
                    let to_minutes = |len: usize| len as f64 * step_seconds / 60.0;
                    let per_day =
                        (runs.len() as f64 * SECONDS_PER_DAY / observed_seconds).round() as u64;
                    let max = runs.iter().copied().max().map(to_minutes).unwrap_or(0.0);
                    let avg = to_minutes(runs.iter().sum()) / runs.len() as f64;
                    (per_day, max, avg)
                };

            AvailabilityMetric {
                station_index: station.station_index,
                name: station.name.clone(),
                time_availability_percent: 100.0 * contact_samples as f64 / total as f64,
                interruptions_per_day,
                max_interruption_minutes: max_minutes,
                avg_interruption_minutes: avg_minutes,
            }
        })
        .collect()
}

/// Lengths of the maximal runs of `false`
fn interruption_runs(in_contact: &[bool]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0;
    for &contact in in_contact {
        if contact {
            if current > 0 {
                runs.push(current);
            }
            current = 0;
        } else {
            current += 1;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}
