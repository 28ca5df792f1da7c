use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classical (Keplerian) orbital elements at an epoch
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct ClassicalElements {
    /// Catalog number written into the five-column TLE field
    pub catalog_number: u64,
    pub epoch: DateTime<Utc>,
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
}

/// How a satellite's orbit is described
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SatelliteSpec {
    Tle { lines: Vec<String> },
    Elements { elements: ClassicalElements },
}

/// A satellite as it arrives from configuration: orbit plus display metadata.
/// The metadata is carried through and never used in computation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SatelliteEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub catalog_id: Option<String>,
    pub orbit: SatelliteSpec,
}

impl SatelliteEntry {
    pub fn from_tle(name: Option<String>, line1: &str, line2: &str) -> Self {
        Self {
            name,
            catalog_id: None,
            orbit: SatelliteSpec::Tle {
                lines: vec![line1.to_string(), line2.to_string()],
            },
        }
    }

    pub fn from_elements(name: Option<String>, elements: ClassicalElements) -> Self {
        Self {
            name,
            catalog_id: None,
            orbit: SatelliteSpec::Elements { elements },
        }
    }

    /// Catalog number as encoded in the orbit description, if readable
    pub fn catalog_number(&self) -> Option<u64> {
        match &self.orbit {
            SatelliteSpec::Elements { elements } => Some(elements.catalog_number),
            SatelliteSpec::Tle { lines } => lines
                .first()
                .and_then(|l| l.get(2..7))
                .and_then(|n| n.trim().parse().ok()),
        }
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_ref().or(self.catalog_id.as_ref()) {
            return name.clone();
        }
        match self.catalog_number() {
            Some(n) => format!("NORAD {}", n),
            None => "unnamed".to_string(),
        }
    }
}

/// Position and velocity in the inertial (TEME) frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct InertialState {
    #[schema(value_type = Vec<f64>)]
    pub position_km: [f64; 3],
    #[schema(value_type = Vec<f64>)]
    pub velocity_km_s: [f64; 3],
}
