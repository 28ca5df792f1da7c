use chrono::{DateTime, Utc};

use crate::satellite::{sidereal_angle, InertialState, Propagator};
use crate::visibility::error::WindowError;
use crate::visibility::evaluator::is_visible;
use crate::visibility::frames::eci_to_ecef;
use crate::visibility::ground_station::{GroundStation, StationFrame};
use crate::visibility::types::{time_label, StationCount, VisibilitySample};

/// Anything that yields an inertial state for an instant, or nothing when no
/// valid solution exists there.
pub trait Propagate {
    fn propagate(&self, instant: DateTime<Utc>) -> Option<InertialState>;
}

impl Propagate for Propagator {
    fn propagate(&self, instant: DateTime<Utc>) -> Option<InertialState> {
        Propagator::propagate(self, instant)
    }
}

/// Sampling instants `start, start + step, ...` up to and including
/// `start + duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleWindow {
    start: DateTime<Utc>,
    duration_hours: f64,
    step_seconds: f64,
}

impl SampleWindow {
    pub fn new(
        start: DateTime<Utc>,
        duration_hours: f64,
        step_seconds: f64,
    ) -> Result<Self, WindowError> {
        if !step_seconds.is_finite() || step_seconds <= 0.0 {
            return Err(WindowError::NonPositiveStep(step_seconds));
        }
        if !duration_hours.is_finite() || duration_hours < 0.0 {
            return Err(WindowError::InvalidDuration(duration_hours));
        }
        Ok(Self {
            start,
            duration_hours,
            step_seconds,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn step_seconds(&self) -> f64 {
        self.step_seconds
    }

    pub fn instants(&self) -> impl Iterator<Item = DateTime<Utc>> {
        let start_ms = self.start.timestamp_millis() as f64;
        let end_ms = start_ms + self.duration_hours * 3600.0 * 1000.0;
        let step_ms = self.step_seconds * 1000.0;

        std::iter::successors(Some(start_ms), move |ms| Some(ms + step_ms))
            .take_while(move |ms| *ms <= end_ms)
            .filter_map(|ms| DateTime::from_timestamp_millis(ms as i64))
    }

    pub fn sample_count(&self) -> usize {
        self.instants().count()
    }

    /// `floor(duration / step) + 1` without walking the instants
    pub fn nominal_sample_count(&self) -> f64 {
        (self.duration_hours * 3600.0 / self.step_seconds).floor() + 1.0
    }
}

/// Visible-satellite counts per station at every instant of the window.
/// Satellites without a valid position at an instant are left out of that
/// instant's counts.
pub fn sample<P: Propagate>(
    propagators: &[P],
    stations: &[GroundStation],
    window: &SampleWindow,
) -> Vec<VisibilitySample> {
    let frames: Vec<StationFrame> = stations.iter().map(GroundStation::frame).collect();

    window
        .instants()
        .map(|instant| {
            let counts = counts_at(propagators, &frames, instant);
            VisibilitySample {
                timestamp_ms: instant.timestamp_millis(),
                time: time_label(instant),
                per_station: stations
                    .iter()
                    .zip(counts)
                    .enumerate()
                    .map(|(station_index, (gs, visible_count))| StationCount {
                        station_index,
                        name: gs.name.clone(),
                        visible_count,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Number of satellites one station sees at a single instant
pub fn count_visible<P: Propagate>(
    propagators: &[P],
    station: &GroundStation,
    instant: DateTime<Utc>,
) -> u32 {
    counts_at(propagators, &[station.frame()], instant)
        .first()
        .copied()
        .unwrap_or(0)
}

fn counts_at<P: Propagate>(
    propagators: &[P],
    frames: &[StationFrame],
    instant: DateTime<Utc>,
) -> Vec<u32> {
    let gmst = sidereal_angle(instant);
    let mut counts = vec![0u32; frames.len()];

    for p in propagators {
        let Some(state) = p.propagate(instant) else {
            continue;
        };
        let ecef = eci_to_ecef(state.position_km, gmst);
        for (count, frame) in counts.iter_mut().zip(frames) {
            if is_visible(&frame.look_angles(ecef), frame.min_elevation_deg) {
                *count += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satellite::fixtures::iss;
    use crate::visibility::frames::{ecef_to_eci, geodetic_to_ecef};
    use chrono::{Duration, TimeZone};

    /// Hovers at a fixed Earth-fixed point, optionally failing after a cutoff
    struct Fixed {
        ecef_km: [f64; 3],
        valid_until: Option<DateTime<Utc>>,
    }

    impl Propagate for Fixed {
        fn propagate(&self, instant: DateTime<Utc>) -> Option<InertialState> {
            if self.valid_until.is_some_and(|t| instant > t) {
                return None;
            }
            Some(InertialState {
                position_km: ecef_to_eci(self.ecef_km, sidereal_angle(instant)),
                velocity_km_s: [0.0; 3],
            })
        }
    }

    fn overhead(lat_deg: f64, lon_deg: f64) -> Fixed {
        Fixed {
            ecef_km: geodetic_to_ecef(lat_deg.to_radians(), lon_deg.to_radians(), 550.0),
            valid_until: None,
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 7, 13, 0, 0, 0).unwrap()
    }

    #[test]
    fn one_hour_at_ten_seconds_is_361_samples() {
        let window = SampleWindow::new(start(), 1.0, 10.0).unwrap();
        assert_eq!(window.sample_count(), 361);
        let tokyo = GroundStation::new("Tokyo", 35.6762, 139.6503, 0.0, 10.0);
        let samples = sample(&[iss()], &[tokyo], &window);
        assert_eq!(samples.len(), 361);
        assert_eq!(samples[0].timestamp_ms, start().timestamp_millis());
        assert_eq!(
            samples[360].timestamp_ms,
            (start() + Duration::hours(1)).timestamp_millis()
        );
        assert_eq!(samples[1].time, "00:00:10");
    }

    #[test]
    fn nominal_count_needs_no_iteration() {
        let window = SampleWindow::new(start(), 1.0, 7.0).unwrap();
        assert_eq!(window.nominal_sample_count(), 515.0);
        let huge = SampleWindow::new(start(), 1e7, 0.01).unwrap();
        assert!(huge.nominal_sample_count() > 3.5e12);
    }

    #[test]
    fn zero_duration_yields_single_sample() {
        let window = SampleWindow::new(start(), 0.0, 60.0).unwrap();
        assert_eq!(window.sample_count(), 1);
    }

    #[test]
    fn step_not_dividing_duration_stops_before_end() {
        // 3600 / 7 = 514.28...
        let window = SampleWindow::new(start(), 1.0, 7.0).unwrap();
        assert_eq!(window.sample_count(), 515);
    }

    #[test]
    fn rejects_invalid_windows() {
        assert_eq!(
            SampleWindow::new(start(), 1.0, 0.0),
            Err(WindowError::NonPositiveStep(0.0))
        );
        assert!(SampleWindow::new(start(), 1.0, f64::NAN).is_err());
        assert_eq!(
            SampleWindow::new(start(), -1.0, 10.0),
            Err(WindowError::InvalidDuration(-1.0))
        );
    }

    #[test]
    fn counts_satellites_above_each_station() {
        let stations = vec![
            GroundStation::new("A", 10.0, 20.0, 0.0, 10.0),
            GroundStation::new("B", -40.0, -70.0, 0.0, 10.0),
        ];
        let sats = vec![overhead(10.0, 20.0), overhead(10.5, 20.5), overhead(-40.0, -70.0)];
        let window = SampleWindow::new(start(), 0.5, 60.0).unwrap();

        for s in sample(&sats, &stations, &window) {
            assert_eq!(s.count(0), 2);
            assert_eq!(s.count(1), 1);
            assert_eq!(s.per_station[1].name, "B");
        }
    }

    #[test]
    fn failed_propagation_is_excluded_not_fatal() {
        let cutoff = start() + Duration::minutes(5);
        let sats = vec![
            overhead(0.0, 0.0),
            Fixed {
                ecef_km: geodetic_to_ecef(0.0, 0.0, 800.0),
                valid_until: Some(cutoff),
            },
        ];
        let gs = GroundStation::new("Null Island", 0.0, 0.0, 0.0, 5.0);
        let window = SampleWindow::new(start(), 10.0 / 60.0, 60.0).unwrap();

        let counts: Vec<u32> = sample(&sats, &[gs], &window).iter().map(|s| s.count(0)).collect();
        assert_eq!(counts, vec![2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn mask_above_zenith_sees_nothing_and_below_nadir_sees_everything() {
        let sats = vec![overhead(0.0, 0.0), overhead(45.0, 100.0)];
        let blind = GroundStation::new("blind", 0.0, 0.0, 0.0, 90.0);
        let all = GroundStation::new("all", 0.0, 0.0, 0.0, -90.0);
        assert_eq!(count_visible(&sats, &blind, start()), 0);
        assert_eq!(count_visible(&sats, &all, start()), 2);
    }

    #[test]
    fn sampling_is_deterministic() {
        let stations = vec![
            GroundStation::new("Tokyo", 35.6762, 139.6503, 0.0, 0.0),
            GroundStation::new("Svalbard", 78.23, 15.39, 0.5, 5.0),
        ];
        let window = SampleWindow::new(start(), 3.0, 30.0).unwrap();
        let sats = vec![iss()];
        assert_eq!(sample(&sats, &stations, &window), sample(&sats, &stations, &window));
    }

    #[test]
    fn iss_passes_over_a_mid_latitude_station_within_a_day() {
        let gs = GroundStation::new("Tokyo", 35.6762, 139.6503, 0.0, 0.0);
        let window = SampleWindow::new(start(), 24.0, 30.0).unwrap();
        let samples = sample(&[iss()], &[gs], &window);
        let visible = samples.iter().filter(|s| s.count(0) > 0).count();
        assert!(visible > 0);
        assert!(visible < samples.len() / 4);
    }
}
