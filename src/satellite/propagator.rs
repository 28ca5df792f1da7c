use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::satellite::error::SatelliteError;
use crate::satellite::tle_encoding::{elements_to_tle, semi_major_axis_km, with_checksum};
use crate::satellite::types::{ClassicalElements, InertialState, SatelliteEntry, SatelliteSpec};

/// Propagatable handle for one satellite. Both orbit descriptions end up here
/// through the same SGP4 path.
#[derive(Debug, Clone)]
pub struct Propagator {
    name: String,
    elements: Elements,
    constants: Constants,
}

impl Propagator {
    pub fn from_tle(
        name: Option<String>,
        line1: &str,
        line2: &str,
    ) -> Result<Self, SatelliteError> {
        let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        let name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));
        Ok(Self {
            name,
            elements,
            constants,
        })
    }

    /// Route classical elements through the legacy text encoding so they
    /// share the TLE propagation path.
    pub fn from_elements(
        name: Option<String>,
        el: &ClassicalElements,
    ) -> Result<Self, SatelliteError> {
        let (line1, line2) = elements_to_tle(el);
        Self::from_tle(name, &with_checksum(&line1), &with_checksum(&line2))
    }

    pub fn from_spec(name: Option<String>, spec: &SatelliteSpec) -> Result<Self, SatelliteError> {
        match spec {
            SatelliteSpec::Tle { lines } => match lines.as_slice() {
                [line1, line2, ..] => Self::from_tle(name, line1.trim(), line2.trim()),
                _ => Err(SatelliteError::MissingTleLines),
            },
            SatelliteSpec::Elements { elements } => Self::from_elements(name, elements),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.elements.datetime, Utc)
    }

    /// Inertial state at `instant`, or `None` when SGP4 has no valid
    /// solution there (decayed orbit, out-of-range time).
    pub fn propagate(&self, instant: DateTime<Utc>) -> Option<InertialState> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&instant.naive_utc())
            .ok()?;
        let prediction = self.constants.propagate(minutes).ok()?;

        let finite = prediction
            .position
            .iter()
            .chain(prediction.velocity.iter())
            .all(|v| v.is_finite());
        if !finite {
            return None;
        }

        Some(InertialState {
            position_km: prediction.position,
            velocity_km_s: prediction.velocity,
        })
    }

    /// Mean classical elements at epoch, semi-major axis derived from the
    /// Kozai mean motion.
    pub fn classical_elements(&self) -> ClassicalElements {
        ClassicalElements {
            catalog_number: self.elements.norad_id,
            epoch: self.epoch(),
            semi_major_axis_km: semi_major_axis_km(self.elements.mean_motion),
            eccentricity: self.elements.eccentricity,
            inclination_deg: self.elements.inclination,
            raan_deg: self.elements.right_ascension,
            arg_perigee_deg: self.elements.argument_of_perigee,
            mean_anomaly_deg: self.elements.mean_anomaly,
        }
    }
}

/// Derive the propagation handle for one configured satellite
pub fn normalize(entry: &SatelliteEntry) -> Result<Propagator, SatelliteError> {
    Propagator::from_spec(entry.name.clone(), &entry.orbit)
}

pub fn normalize_all(entries: &[SatelliteEntry]) -> Result<Vec<Propagator>, SatelliteError> {
    entries.iter().map(normalize).collect()
}

/// Rotation angle between the Earth-fixed and inertial frames (radians)
pub fn sidereal_angle(instant: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&instant.naive_utc()))
}
