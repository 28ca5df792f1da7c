mod error;
mod evaluator;
mod frames;
mod ground_station;
mod sampler;
mod snapshot;
mod types;

pub use error::WindowError;
pub use evaluator::is_visible;
pub use frames::{
    ecef_to_enu, ecef_to_eci, ecef_to_geodetic, eci_to_ecef, geodetic_to_ecef, look_angles,
    Geodetic, LookAngles, WGS84_A_KM, WGS84_E2,
};
pub use ground_station::{latitude_band, GroundStation, StationFrame};
pub use sampler::{count_visible, sample, Propagate, SampleWindow};
pub use snapshot::{ground_track, satellite_states, SatelliteState};
pub use types::{StationCount, TrackPoint, VisibilitySample};
