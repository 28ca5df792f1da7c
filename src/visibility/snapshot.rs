use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::satellite::{sidereal_angle, InertialState, Propagator};
use crate::visibility::frames::{ecef_to_geodetic, eci_to_ecef, Geodetic};
use crate::visibility::sampler::{Propagate, SampleWindow};
use crate::visibility::types::TrackPoint;

/// Where a satellite is at one instant, in every frame the scene needs
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SatelliteState {
    pub name: String,
    pub norad_id: u64,
    pub inertial: InertialState,
    #[schema(value_type = Vec<f64>)]
    pub ecef_km: [f64; 3],
    pub geodetic: Geodetic,
}

/// Snapshot of every satellite at `instant`, `None` where propagation fails
pub fn satellite_states(
    propagators: &[Propagator],
    instant: DateTime<Utc>,
) -> Vec<Option<SatelliteState>> {
    let gmst = sidereal_angle(instant);
    propagators
        .iter()
        .map(|p| {
            let inertial = p.propagate(instant)?;
            let ecef_km = eci_to_ecef(inertial.position_km, gmst);
            Some(SatelliteState {
                name: p.name().to_string(),
                norad_id: p.norad_id(),
                inertial,
                ecef_km,
                geodetic: ecef_to_geodetic(ecef_km),
            })
        })
        .collect()
}

/// Sub-satellite points over the window, skipping instants without a solution
pub fn ground_track<P: Propagate>(propagator: &P, window: &SampleWindow) -> Vec<TrackPoint> {
    window
        .instants()
        .filter_map(|instant| {
            let state = propagator.propagate(instant)?;
            let ecef = eci_to_ecef(state.position_km, sidereal_angle(instant));
            Some(TrackPoint {
                timestamp_ms: instant.timestamp_millis(),
                geodetic: ecef_to_geodetic(ecef),
            })
        })
        .collect()
}
