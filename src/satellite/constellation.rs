use chrono::{DateTime, Utc};
use serde::Deserialize;
use strum_macros::Display;

use crate::satellite::types::{ClassicalElements, SatelliteEntry};
use crate::visibility::WGS84_A_KM;

/// Catalog numbers handed to generated satellites start here
pub const FIRST_GENERATED_CATALOG_NUMBER: u64 = 10_000;

/// Evenly distributed satellites sharing one epoch
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConstellationSpec {
    pub epoch: DateTime<Utc>,
    #[serde(default)]
    pub shells: Vec<Shell>,
}

/// `count` satellites spread over `planes` orbital planes
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shell {
    pub count: usize,
    pub planes: usize,
    /// Relative phase offset between adjacent planes, in slots
    #[serde(default)]
    pub phasing: f64,
    #[serde(default)]
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub apogee_altitude_km: f64,
    #[serde(default = "default_raan_range")]
    pub raan_range_deg: f64,
    #[serde(default)]
    pub raan_start_deg: f64,
    #[serde(default)]
    pub arg_perigee_deg: f64,
    #[serde(default)]
    pub mean_anomaly_0_deg: f64,
}

fn default_raan_range() -> f64 {
    360.0
}

impl Default for Shell {
    /// Baseline used when sweeping a single shell parameter
    fn default() -> Self {
        Self {
            count: 30,
            planes: 6,
            phasing: 0.0,
            eccentricity: 0.0,
            inclination_deg: 53.0,
            apogee_altitude_km: 550.0,
            raan_range_deg: 360.0,
            raan_start_deg: 0.0,
            arg_perigee_deg: 0.0,
            mean_anomaly_0_deg: 0.0,
        }
    }
}

/// Shell field varied by a parameter sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, clap::ValueEnum)]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ShellParameter {
    Count,
    Planes,
    Phasing,
    ApogeeAltitude,
    Eccentricity,
    Inclination,
    RaanRange,
}

impl ShellParameter {
    /// Values swept when none are given
    pub fn default_values(self) -> &'static [f64] {
        match self {
            Self::Count => &[10.0, 20.0, 30.0, 40.0, 50.0],
            Self::Planes => &[1.0, 2.0, 4.0, 6.0],
            Self::Phasing => &[0.0, 90.0, 180.0, 270.0],
            Self::ApogeeAltitude => &[300.0, 500.0, 700.0, 1000.0],
            Self::Eccentricity => &[0.0, 0.1, 0.2],
            Self::Inclination => &[30.0, 45.0, 60.0, 90.0],
            Self::RaanRange => &[180.0, 360.0],
        }
    }

    /// Copy of `shell` with this parameter set to `value`. Counts are rounded
    /// and clamped at zero.
    pub fn apply(self, shell: &Shell, value: f64) -> Shell {
        let mut varied = shell.clone();
        match self {
            Self::Count => varied.count = value.round().max(0.0) as usize,
            Self::Planes => varied.planes = value.round().max(0.0) as usize,
            Self::Phasing => varied.phasing = value,
            Self::ApogeeAltitude => varied.apogee_altitude_km = value,
            Self::Eccentricity => varied.eccentricity = value,
            Self::Inclination => varied.inclination_deg = value,
            Self::RaanRange => varied.raan_range_deg = value,
        }
        varied
    }
}

impl ConstellationSpec {
    /// Expand every shell into classical-element satellites, numbering them
    /// consecutively across shells.
    pub fn generate(&self) -> Vec<SatelliteEntry> {
        let mut next_catalog_number = FIRST_GENERATED_CATALOG_NUMBER;
        let mut sats = Vec::new();

        for shell in &self.shells {
            if shell.count == 0 || shell.planes == 0 {
                continue;
            }
            let per_plane = shell.count.div_ceil(shell.planes);
            let semi_major_axis_km =
                (WGS84_A_KM + shell.apogee_altitude_km) / (1.0 + shell.eccentricity);
            let slot_deg = 360.0 / shell.count as f64;
            let mut generated = 0;

            'planes: for p in 0..shell.planes {
                let raan_deg = wrap_degrees(
                    shell.raan_start_deg + shell.raan_range_deg * p as f64 / shell.planes as f64,
                );
                for j in 0..per_plane {
                    if generated == shell.count {
                        break 'planes;
                    }
                    let slot = p as f64 * shell.phasing + (j * shell.planes) as f64;
                    let elements = ClassicalElements {
                        catalog_number: next_catalog_number,
                        epoch: self.epoch,
                        semi_major_axis_km,
                        eccentricity: shell.eccentricity,
                        inclination_deg: shell.inclination_deg,
                        raan_deg,
                        arg_perigee_deg: wrap_degrees(shell.arg_perigee_deg),
                        mean_anomaly_deg: wrap_degrees(shell.mean_anomaly_0_deg + slot_deg * slot),
                    };
                    sats.push(SatelliteEntry::from_elements(None, elements));
                    next_catalog_number += 1;
                    generated += 1;
                }
            }
        }
        sats
    }
}

/// Fold an angle into [0, 360)
fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // tiny negatives round up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satellite::{normalize, validate_satellites, SatelliteSpec};
    use chrono::TimeZone;

    fn shell(count: usize, planes: usize) -> Shell {
        Shell {
            count,
            planes,
            phasing: 1.0,
            eccentricity: 0.0,
            inclination_deg: 53.0,
            apogee_altitude_km: 550.0,
            raan_range_deg: 360.0,
            raan_start_deg: 0.0,
            arg_perigee_deg: 0.0,
            mean_anomaly_0_deg: 0.0,
        }
    }

    fn elements(entry: &SatelliteEntry) -> &ClassicalElements {
        match &entry.orbit {
            SatelliteSpec::Elements { elements } => elements,
            SatelliteSpec::Tle { .. } => panic!("expected elements"),
        }
    }

    fn spec(shells: Vec<Shell>) -> ConstellationSpec {
        ConstellationSpec {
            epoch: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            shells,
        }
    }

    #[test]
    fn walker_layout() {
        let sats = spec(vec![shell(6, 3)]).generate();
        assert_eq!(sats.len(), 6);

        let raans: Vec<f64> = sats.iter().map(|s| elements(s).raan_deg).collect();
        assert_eq!(raans, vec![0.0, 0.0, 120.0, 120.0, 240.0, 240.0]);

        // slot = p * phasing + j * planes, 60 degrees per slot
        let anomalies: Vec<f64> = sats.iter().map(|s| elements(s).mean_anomaly_deg).collect();
        assert_eq!(anomalies, vec![0.0, 180.0, 60.0, 240.0, 120.0, 300.0]);

        let a = elements(&sats[0]).semi_major_axis_km;
        assert!((a - (WGS84_A_KM + 550.0)).abs() < 1e-9);
    }

    #[test]
    fn uneven_split_stops_at_count() {
        let sats = spec(vec![shell(7, 3)]).generate();
        assert_eq!(sats.len(), 7);
        assert_eq!(elements(&sats[6]).raan_deg, 240.0);
    }

    #[test]
    fn catalog_numbers_continue_across_shells() {
        let sats = spec(vec![shell(4, 2), shell(2, 1)]).generate();
        let numbers: Vec<u64> = sats.iter().filter_map(|s| s.catalog_number()).collect();
        assert_eq!(numbers, (10_000..10_006).collect::<Vec<_>>());
    }

    #[test]
    fn eccentric_shell_keeps_apogee_altitude() {
        let mut s = shell(1, 1);
        s.eccentricity = 0.1;
        s.apogee_altitude_km = 1000.0;
        let sats = spec(vec![s]).generate();
        let el = elements(&sats[0]);
        assert!((el.semi_major_axis_km * 1.1 - (WGS84_A_KM + 1000.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_shells_generate_nothing() {
        assert!(spec(vec![shell(0, 3), shell(5, 0)]).generate().is_empty());
    }

    #[test]
    fn out_of_turn_angles_are_wrapped_and_propagate() {
        let mut s = shell(4, 2);
        s.raan_start_deg = -200.0;
        s.arg_perigee_deg = 450.0;
        s.mean_anomaly_0_deg = -90.0;
        let sats = spec(vec![s]).generate();

        let raans: Vec<f64> = sats.iter().map(|s| elements(s).raan_deg).collect();
        assert_eq!(raans, vec![160.0, 160.0, 340.0, 340.0]);
        assert_eq!(elements(&sats[0]).arg_perigee_deg, 90.0);
        assert_eq!(elements(&sats[0]).mean_anomaly_deg, 270.0);

        assert_eq!(validate_satellites(&sats), Ok(()));
        for sat in &sats {
            assert!(normalize(sat).is_ok());
        }
    }

    #[test]
    fn wrap_keeps_angles_inside_one_turn() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-1e-20), 0.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
    }

    #[test]
    fn apply_changes_only_the_swept_field() {
        let base = Shell::default();
        let varied = ShellParameter::Inclination.apply(&base, 90.0);
        assert_eq!(varied.inclination_deg, 90.0);
        assert_eq!(
            Shell {
                inclination_deg: base.inclination_deg,
                ..varied
            },
            base
        );

        assert_eq!(ShellParameter::Count.apply(&base, 12.6).count, 13);
        assert_eq!(ShellParameter::Planes.apply(&base, -3.0).planes, 0);
        assert_eq!(ShellParameter::ApogeeAltitude.to_string(), "apogee_altitude");
    }
}
