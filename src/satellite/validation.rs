//! Input checks run before data reaches the engine. The engine itself assumes
//! validated satellites and stations.

use crate::satellite::error::ValidationError;
use crate::satellite::propagator::Propagator;
use crate::satellite::tle_encoding::mean_motion_rev_per_day;
use crate::satellite::types::{ClassicalElements, SatelliteEntry, SatelliteSpec};
use crate::visibility::GroundStation;

const MAX_CATALOG_NUMBER: u64 = 99_999;
/// Widest mean motion the two-line column holds
const MAX_MEAN_MOTION_REV_PER_DAY: f64 = 100.0;

pub fn validate_satellites(list: &[SatelliteEntry]) -> Result<(), ValidationError> {
    for (index, entry) in list.iter().enumerate() {
        match &entry.orbit {
            SatelliteSpec::Tle { lines } => validate_tle(index, lines)?,
            SatelliteSpec::Elements { elements } => validate_elements(index, elements)?,
        }
    }
    Ok(())
}

fn validate_tle(index: usize, lines: &[String]) -> Result<(), ValidationError> {
    let (line1, line2) = match lines {
        [l1, l2] if !l1.trim().is_empty() && !l2.trim().is_empty() => (l1.trim(), l2.trim()),
        _ => return Err(ValidationError::MissingTleLines { index }),
    };
    Propagator::from_tle(None, line1, line2).map_err(|e| ValidationError::InvalidTle {
        index,
        message: e.to_string(),
    })?;
    Ok(())
}

fn validate_elements(index: usize, el: &ClassicalElements) -> Result<(), ValidationError> {
    let invalid = |field| Err(ValidationError::InvalidElements { index, field });

    if el.catalog_number > MAX_CATALOG_NUMBER {
        return invalid("catalog_number");
    }
    if !el.semi_major_axis_km.is_finite()
        || el.semi_major_axis_km <= 0.0
        || mean_motion_rev_per_day(el.semi_major_axis_km) >= MAX_MEAN_MOTION_REV_PER_DAY
    {
        return invalid("semi_major_axis_km");
    }
    if !el.eccentricity.is_finite() || !(0.0..1.0).contains(&el.eccentricity) {
        return invalid("eccentricity");
    }
    if !el.inclination_deg.is_finite() || !(0.0..=180.0).contains(&el.inclination_deg) {
        return invalid("inclination_deg");
    }
    if !is_angle(el.raan_deg) {
        return invalid("raan_deg");
    }
    if !is_angle(el.arg_perigee_deg) {
        return invalid("arg_perigee_deg");
    }
    if !is_angle(el.mean_anomaly_deg) {
        return invalid("mean_anomaly_deg");
    }

    // in-range fields can still encode to an orbit SGP4 refuses
    Propagator::from_elements(None, el).map_err(|e| ValidationError::UnpropagatableElements {
        index,
        message: e.to_string(),
    })?;
    Ok(())
}

fn is_angle(deg: f64) -> bool {
    deg.is_finite() && (0.0..360.0).contains(&deg)
}

pub fn validate_ground_stations(list: &[GroundStation]) -> Result<(), ValidationError> {
    for (index, gs) in list.iter().enumerate() {
        let invalid = |field| Err(ValidationError::InvalidStation { index, field });

        if gs.name.trim().is_empty() {
            return invalid("name");
        }
        if !gs.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&gs.latitude_deg) {
            return invalid("latitude_deg");
        }
        if !gs.longitude_deg.is_finite() || !(-180.0..=180.0).contains(&gs.longitude_deg) {
            return invalid("longitude_deg");
        }
        if !gs.height_km.is_finite() {
            return invalid("height_km");
        }
        if !gs.min_elevation_deg.is_finite() {
            return invalid("min_elevation_deg");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satellite::propagator::normalize;
    use crate::satellite::propagator::tests::{leo_elements, ISS_LINE1, ISS_LINE2};

    fn station() -> GroundStation {
        GroundStation::new("Tokyo", 35.6762, 139.6503, 0.0, 10.0)
    }

    #[test]
    fn accepts_well_formed_input() {
        let sats = vec![
            SatelliteEntry::from_tle(Some("ISS".into()), ISS_LINE1, ISS_LINE2),
            SatelliteEntry::from_elements(None, leo_elements()),
        ];
        assert_eq!(validate_satellites(&sats), Ok(()));
        assert_eq!(validate_ground_stations(&[station()]), Ok(()));
    }

    #[test]
    fn rejects_missing_tle_line() {
        let sats = vec![SatelliteEntry {
            name: None,
            catalog_id: None,
            orbit: SatelliteSpec::Tle {
                lines: vec![ISS_LINE1.to_string(), "  ".to_string()],
            },
        }];
        assert_eq!(
            validate_satellites(&sats),
            Err(ValidationError::MissingTleLines { index: 0 })
        );
    }

    #[test]
    fn rejects_nan_elements() {
        let mut el = leo_elements();
        el.raan_deg = f64::NAN;
        let sats = vec![
            SatelliteEntry::from_elements(None, leo_elements()),
            SatelliteEntry::from_elements(None, el),
        ];
        assert_eq!(
            validate_satellites(&sats),
            Err(ValidationError::InvalidElements {
                index: 1,
                field: "raan_deg"
            })
        );
    }

    #[test]
    fn rejects_angles_outside_one_turn() {
        let field_of = |el: ClassicalElements| match validate_satellites(&[
            SatelliteEntry::from_elements(None, el),
        ]) {
            Err(ValidationError::InvalidElements { field, .. }) => field,
            other => panic!("unexpected {:?}", other),
        };

        let mut el = leo_elements();
        el.raan_deg = 1000.0;
        assert_eq!(field_of(el), "raan_deg");

        let mut el = leo_elements();
        el.arg_perigee_deg = -10.0;
        assert_eq!(field_of(el), "arg_perigee_deg");

        let mut el = leo_elements();
        el.mean_anomaly_deg = 360.0;
        assert_eq!(field_of(el), "mean_anomaly_deg");
    }

    #[test]
    fn validated_elements_always_normalize() {
        let mut el = leo_elements();
        el.raan_deg = 359.99999;
        el.arg_perigee_deg = 180.0;
        el.mean_anomaly_deg = 0.00001;
        el.inclination_deg = 98.0;
        let sats = vec![SatelliteEntry::from_elements(None, el)];
        assert_eq!(validate_satellites(&sats), Ok(()));
        assert!(normalize(&sats[0]).is_ok());
    }

    #[test]
    fn rejects_orbit_too_small_to_encode() {
        let mut el = leo_elements();
        // mean motion above 100 rev/day overflows its column
        el.semi_major_axis_km = 500.0;
        assert_eq!(
            validate_satellites(&[SatelliteEntry::from_elements(None, el)]),
            Err(ValidationError::InvalidElements {
                index: 0,
                field: "semi_major_axis_km"
            })
        );
    }

    #[test]
    fn rejects_hyperbolic_eccentricity() {
        let mut el = leo_elements();
        el.eccentricity = 1.0;
        let err = validate_satellites(&[SatelliteEntry::from_elements(None, el)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidElements {
                index: 0,
                field: "eccentricity"
            }
        );
    }

    #[test]
    fn rejects_catalog_number_wider_than_tle_field() {
        let mut el = leo_elements();
        el.catalog_number = 100_000;
        assert!(validate_satellites(&[SatelliteEntry::from_elements(None, el)]).is_err());
    }

    #[test]
    fn rejects_station_without_name_or_with_nan_latitude() {
        let mut unnamed = station();
        unnamed.name.clear();
        assert_eq!(
            validate_ground_stations(&[unnamed]),
            Err(ValidationError::InvalidStation {
                index: 0,
                field: "name"
            })
        );

        let mut nan = station();
        nan.latitude_deg = f64::NAN;
        assert_eq!(
            validate_ground_stations(&[station(), nan]),
            Err(ValidationError::InvalidStation {
                index: 1,
                field: "latitude_deg"
            })
        );
    }
}
