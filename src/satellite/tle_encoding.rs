//! Legacy two-line text encoding of classical elements.
//!
//! Satellites defined by classical elements are exported as TLE-like text so
//! they can be re-imported by tools that only understand two-line records.
//! The layout below must stay byte-identical with files already exported.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::satellite::types::ClassicalElements;

/// Earth gravitational parameter used for the mean motion field (km³/s²)
pub const MU_KM3_S2: f64 = 398_600.4418;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Mean motion in revolutions per day for a semi-major axis in km
pub fn mean_motion_rev_per_day(semi_major_axis_km: f64) -> f64 {
    let n_rad = (MU_KM3_S2 / semi_major_axis_km.powi(3)).sqrt();
    (n_rad * 86_400.0) / (2.0 * std::f64::consts::PI)
}

/// Semi-major axis in km for a mean motion in revolutions per day
pub fn semi_major_axis_km(mean_motion_rev_per_day: f64) -> f64 {
    let n_rad = mean_motion_rev_per_day * 2.0 * std::f64::consts::PI / 86_400.0;
    (MU_KM3_S2 / (n_rad * n_rad)).cbrt()
}

/// Render an epoch as `YYDDD.DDDDDDDD`.
///
/// Day 0 is December 31 of the previous year, so January 1 00:00 is day 1.
/// The fraction is rounded to 8 digits without carrying into the day.
pub fn format_tle_epoch(epoch: DateTime<Utc>) -> String {
    let year = epoch.year().rem_euclid(100);
    let ms_of_day = i64::from(epoch.num_seconds_from_midnight()) * 1000
        + i64::from(epoch.nanosecond() / 1_000_000);
    let since_day_zero_ms = i64::from(epoch.ordinal()) * 86_400_000 + ms_of_day;
    let doy = since_day_zero_ms as f64 / MS_PER_DAY;
    let day = doy.floor();
    let frac = doy - day;
    let frac_text = format!("{:.8}", frac);
    format!("{:02}{:03}.{}", year, day as i64, &frac_text[2..])
}

/// Encode classical elements as the legacy pair of TLE lines.
///
/// Checksum columns are fixed placeholders; use [`with_checksum`] before
/// handing the lines to a strict parser.
pub fn elements_to_tle(el: &ClassicalElements) -> (String, String) {
    let mean_motion = mean_motion_rev_per_day(el.semi_major_axis_km);
    let satnum = format!("{:05}", el.catalog_number);
    let epoch = format_tle_epoch(el.epoch);

    let line1 = format!(
        "1 {}U 00000A   {}  .00000000  00000-0  00000-0 0  9991",
        satnum, epoch
    );

    let ecc_text = format!("{:.7}", el.eccentricity);
    let ecc = format!("{:0>7}", &ecc_text[2..]);
    let line2 = format!(
        "2 {} {:>8.4} {:>8.4} {} {:>8.4} {:>8.4} {:>11.8}    0",
        satnum,
        el.inclination_deg,
        el.raan_deg,
        ecc,
        el.arg_perigee_deg,
        el.mean_anomaly_deg,
        mean_motion
    );

    (line1, line2)
}

/// Modulo-10 TLE checksum over the first 68 columns ('-' counts as 1)
pub fn tle_checksum(line: &str) -> u32 {
    line.bytes()
        .take(68)
        .map(|b| match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'-' => 1,
            _ => 0,
        })
        .sum::<u32>()
        % 10
}

/// Pad or cut a line to 68 columns and append its checksum digit
pub fn with_checksum(line: &str) -> String {
    let body: String = line.chars().take(68).collect();
    let body = format!("{:<68}", body);
    let checksum = tle_checksum(&body);
    format!("{}{}", body, checksum)
}
