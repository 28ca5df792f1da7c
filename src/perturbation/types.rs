use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

use crate::satellite::ClassicalElements;

/// The epoch-free part of a classical element set
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct OrbitalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    #[serde(default)]
    pub raan_deg: f64,
    #[serde(default)]
    pub arg_perigee_deg: f64,
    #[serde(default)]
    pub mean_anomaly_deg: f64,
}

impl From<&ClassicalElements> for OrbitalElements {
    fn from(el: &ClassicalElements) -> Self {
        Self {
            semi_major_axis_km: el.semi_major_axis_km,
            eccentricity: el.eccentricity,
            inclination_deg: el.inclination_deg,
            raan_deg: el.raan_deg,
            arg_perigee_deg: el.arg_perigee_deg,
            mean_anomaly_deg: el.mean_anomaly_deg,
        }
    }
}

/// Secular rates of change of the six elements.
///
/// Units are mixed: `da_dt` in km/year, `de_dt` in 1/year, the three angle
/// rates in deg/year, and `dM_dt` in deg/day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct PerturbationRates {
    pub da_dt: f64,
    pub de_dt: f64,
    pub di_dt: f64,
    #[serde(rename = "dOmega_dt")]
    pub draan_dt: f64,
    #[serde(rename = "domega_dt")]
    pub dargp_dt: f64,
    #[serde(rename = "dM_dt")]
    pub dm_dt: f64,
}

impl std::ops::Add for PerturbationRates {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            da_dt: self.da_dt + rhs.da_dt,
            de_dt: self.de_dt + rhs.de_dt,
            di_dt: self.di_dt + rhs.di_dt,
            draan_dt: self.draan_dt + rhs.draan_dt,
            dargp_dt: self.dargp_dt + rhs.dargp_dt,
            dm_dt: self.dm_dt + rhs.dm_dt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct DetailedPerturbationRates {
    pub j2: PerturbationRates,
    pub j3: PerturbationRates,
    pub drag: PerturbationRates,
    /// Element-wise sum of the three sources
    pub total: PerturbationRates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Deserialize, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PerturbationSource {
    Total,
    J2,
    J3,
    Drag,
}

impl DetailedPerturbationRates {
    pub fn source(&self, source: PerturbationSource) -> &PerturbationRates {
        match source {
            PerturbationSource::Total => &self.total,
            PerturbationSource::J2 => &self.j2,
            PerturbationSource::J3 => &self.j3,
            PerturbationSource::Drag => &self.drag,
        }
    }
}

/// A display line split into a LaTeX label and a rendered value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormattedRate {
    pub latex: String,
    pub value: String,
}
