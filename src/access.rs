//! Access along one meridian: a synthetic station per degree of latitude,
//! sampled over a full day.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};

use crate::report::visibility_report;
use crate::stats::{block_average, station_statistics, AveragedSample, StationStatistic};
use crate::visibility::{
    latitude_band, sample, GroundStation, Propagate, SampleWindow, VisibilitySample, WindowError,
};

pub const LATITUDE_ACCESS_HOURS: f64 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LatitudeAccessParams {
    pub longitude_deg: f64,
    pub min_elevation_deg: f64,
    pub step_seconds: f64,
    pub from_latitude: i32,
    pub to_latitude: i32,
}

impl Default for LatitudeAccessParams {
    fn default() -> Self {
        Self {
            longitude_deg: 0.0,
            min_elevation_deg: 10.0,
            step_seconds: 60.0,
            from_latitude: -90,
            to_latitude: 90,
        }
    }
}

impl LatitudeAccessParams {
    pub fn latitudes(&self) -> RangeInclusive<i32> {
        self.from_latitude..=self.to_latitude
    }
}

#[derive(Debug, Clone)]
pub struct LatitudeAccess {
    pub stations: Vec<GroundStation>,
    pub samples: Vec<VisibilitySample>,
}

impl LatitudeAccess {
    pub fn run<P: Propagate>(
        propagators: &[P],
        start: DateTime<Utc>,
        params: &LatitudeAccessParams,
    ) -> Result<Self, WindowError> {
        let window = SampleWindow::new(start, LATITUDE_ACCESS_HOURS, params.step_seconds)?;
        let stations = latitude_band(
            params.longitude_deg,
            params.min_elevation_deg,
            params.latitudes(),
        );
        log::info!(
            "Sampling {} latitude stations over {} samples",
            stations.len(),
            window.sample_count()
        );
        let samples = sample(propagators, &stations, &window);
        Ok(Self { stations, samples })
    }

    pub fn statistics(&self) -> Vec<StationStatistic> {
        station_statistics(&self.samples)
    }

    pub fn averaged(&self, block_size: usize) -> Vec<AveragedSample> {
        block_average(&self.samples, block_size)
    }

    pub fn report(&self) -> String {
        visibility_report(&self.stations, &self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satellite::fixtures::iss;
    use crate::satellite::Propagator;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 7, 13, 0, 0, 0).unwrap()
    }

    #[test]
    fn one_station_per_degree_over_a_day() {
        let params = LatitudeAccessParams {
            step_seconds: 600.0,
            from_latitude: 0,
            to_latitude: 90,
            ..Default::default()
        };
        let access = LatitudeAccess::run(&[iss()], start(), &params).unwrap();
        assert_eq!(access.stations.len(), 91);
        // 24 h at 10 min, both ends included
        assert_eq!(access.samples.len(), 145);
        assert_eq!(access.statistics().len(), 91);
        assert_eq!(access.averaged(6).len(), 25);

        let report = access.report();
        assert!(report.starts_with("Time(sec),Lat0,Lat1,"));
        assert_eq!(report.lines().count(), 146);
    }

    #[test]
    fn inclined_orbit_never_reaches_the_pole() {
        let params = LatitudeAccessParams::default();
        let access = LatitudeAccess::run(&[iss()], start(), &params).unwrap();
        let stats = access.statistics();
        assert_eq!(stats.len(), 181);

        let pole = stats.iter().find(|s| s.name == "Lat90").unwrap();
        assert_eq!(pole.average_visible, 0.0);
        assert!(stats.iter().any(|s| s.average_visible > 0.0));
    }

    #[test]
    fn invalid_step_is_rejected() {
        let params = LatitudeAccessParams {
            step_seconds: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            LatitudeAccess::run::<Propagator>(&[], start(), &params),
            Err(WindowError::NonPositiveStep(_))
        ));
    }
}
