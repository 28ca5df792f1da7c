use serde::Serialize;
use utoipa::ToSchema;

// WGS-84
pub const WGS84_A_KM: f64 = 6378.137;
pub const WGS84_E2: f64 = 0.00669437999014;

const GEODETIC_ITERATIONS: usize = 8;

/// Azimuth, elevation and range of a target seen from a ground station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct LookAngles {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}

/// Geodetic latitude/longitude (degrees) and height above the ellipsoid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Geodetic {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

pub fn geodetic_to_ecef(lat_rad: f64, lon_rad: f64, height_km: f64) -> [f64; 3] {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();
    let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    let x = (n + height_km) * cos_lat * cos_lon;
    let y = (n + height_km) * cos_lat * sin_lon;
    let z = (n * (1.0 - WGS84_E2) + height_km) * sin_lat;
    [x, y, z]
}

pub fn ecef_to_geodetic(ecef: [f64; 3]) -> Geodetic {
    let [x, y, z] = ecef;
    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    let mut lat = z.atan2(p * (1.0 - WGS84_E2));
    let mut height = 0.0;
    for _ in 0..GEODETIC_ITERATIONS {
        let sin_lat = lat.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        // valid at the poles, unlike p / cos(lat) - n
        height = p * lat.cos() + z * sin_lat - WGS84_A_KM * WGS84_A_KM / n;
        lat = z.atan2(p * (1.0 - WGS84_E2 * n / (n + height)));
    }

    Geodetic {
        latitude_deg: lat.to_degrees(),
        longitude_deg: lon.to_degrees(),
        altitude_km: height,
    }
}

/// Rotate an inertial (TEME) position into the Earth-fixed frame
pub fn eci_to_ecef(pos_eci: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_eci[0] * cos_gmst + pos_eci[1] * sin_gmst,
        -pos_eci[0] * sin_gmst + pos_eci[1] * cos_gmst,
        pos_eci[2],
    ]
}

pub fn ecef_to_eci(pos_ecef: [f64; 3], gmst: f64) -> [f64; 3] {
    eci_to_ecef(pos_ecef, -gmst)
}

pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

/// Topocentric look angles from an observer (ECEF position plus geodetic
/// latitude/longitude in radians) to an Earth-fixed target
pub fn look_angles(
    observer_ecef: [f64; 3],
    lat_rad: f64,
    lon_rad: f64,
    target_ecef: [f64; 3],
) -> LookAngles {
    let dr = [
        target_ecef[0] - observer_ecef[0],
        target_ecef[1] - observer_ecef[1],
        target_ecef[2] - observer_ecef[2],
    ];
    let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

    let (east, north, up) = ecef_to_enu(dr, lat_rad, lon_rad);
    let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
    let elevation_deg = if range_km > 0.0 {
        (up / range_km).asin().to_degrees()
    } else {
        0.0
    };

    LookAngles {
        azimuth_deg,
        elevation_deg,
        range_km,
    }
}
