use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::visibility::frames::{geodetic_to_ecef, look_angles, LookAngles};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct GroundStation {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub height_km: f64,
    /// Satellites must be strictly above this elevation to count as visible
    #[serde(default)]
    pub min_elevation_deg: f64,
}

impl GroundStation {
    pub fn new(
        name: impl Into<String>,
        latitude_deg: f64,
        longitude_deg: f64,
        height_km: f64,
        min_elevation_deg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            latitude_deg,
            longitude_deg,
            height_km,
            min_elevation_deg,
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        geodetic_to_ecef(self.lat_rad(), self.lon_rad(), self.height_km)
    }

    /// Cached geometry for repeated look-angle evaluation
    pub fn frame(&self) -> StationFrame {
        StationFrame {
            ecef_km: self.position_ecef_km(),
            lat_rad: self.lat_rad(),
            lon_rad: self.lon_rad(),
            min_elevation_deg: self.min_elevation_deg,
        }
    }

    pub fn look_angles(&self, target_ecef_km: [f64; 3]) -> LookAngles {
        self.frame().look_angles(target_ecef_km)
    }
}

/// A ground station's Earth-fixed position, precomputed once per sampling run
#[derive(Debug, Clone, Copy)]
pub struct StationFrame {
    pub ecef_km: [f64; 3],
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub min_elevation_deg: f64,
}

impl StationFrame {
    pub fn look_angles(&self, target_ecef_km: [f64; 3]) -> LookAngles {
        look_angles(self.ecef_km, self.lat_rad, self.lon_rad, target_ecef_km)
    }
}

/// Synthetic sea-level stations, one per whole degree of latitude along the
/// `longitude_deg` meridian. Latitudes outside [-90, 90] are skipped.
pub fn latitude_band(
    longitude_deg: f64,
    min_elevation_deg: f64,
    latitudes: RangeInclusive<i32>,
) -> Vec<GroundStation> {
    latitudes
        .filter(|lat| (-90..=90).contains(lat))
        .map(|lat| {
            GroundStation::new(
                format!("Lat{}", lat),
                f64::from(lat),
                longitude_deg,
                0.0,
                min_elevation_deg,
            )
        })
        .collect()
}
