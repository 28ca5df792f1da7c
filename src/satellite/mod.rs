mod catalog;
mod constellation;
mod error;
mod propagator;
mod tle_encoding;
mod types;
mod validation;

pub use catalog::{parse_tle_file, parse_tle_text, TleCatalog};
pub use constellation::{
    ConstellationSpec, Shell, ShellParameter, FIRST_GENERATED_CATALOG_NUMBER,
};
pub use error::{CatalogError, SatelliteError, ValidationError};
pub use propagator::{normalize, normalize_all, sidereal_angle, Propagator};
pub use tle_encoding::{
    elements_to_tle, format_tle_epoch, mean_motion_rev_per_day, tle_checksum, with_checksum,
    MU_KM3_S2,
};
pub use types::{ClassicalElements, InertialState, SatelliteEntry, SatelliteSpec};
pub use validation::{validate_ground_stations, validate_satellites};

#[cfg(test)]
pub(crate) use propagator::tests as fixtures;
