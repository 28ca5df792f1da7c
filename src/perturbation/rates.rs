use std::f64::consts::PI;

use crate::perturbation::types::{DetailedPerturbationRates, OrbitalElements, PerturbationRates};

// Earth
const MU: f64 = 3.986004418e14; // m^3/s^2
const RE: f64 = 6378137.0; // m
const J2: f64 = 1.08263e-3;
const J3: f64 = -2.532e-6;

const SECONDS_PER_DAY: f64 = 86400.0;
const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;

// Exponential atmosphere, applied below a 1000 km perigee
const DRAG_CEILING_M: f64 = 1_000_000.0;
const ATMOSPHERE_REF_ALTITUDE_M: f64 = 400_000.0;
const ATMOSPHERE_SCALE_HEIGHT_M: f64 = 60_000.0;
const ATMOSPHERE_REF_DENSITY: f64 = 1e-12; // kg/m^3

/// CdA/m in m^2/kg
pub const DEFAULT_BALLISTIC_COEFFICIENT: f64 = 0.012;

/// First-order secular rates from J2, J3 and a simple drag model, broken
/// down by source.
pub fn calculate_detailed_perturbation_rates(
    elements: &OrbitalElements,
    ballistic_coefficient: f64,
) -> DetailedPerturbationRates {
    let a = elements.semi_major_axis_km * 1000.0;
    let e = elements.eccentricity;
    let i = elements.inclination_deg.to_radians();

    let n = (MU / (a * a * a)).sqrt();

    let beta = (1.0 - e * e).powi(2);
    let gamma = (1.0 - e * e).powi(3);
    let k2 = 1.5 * J2 * RE * RE;
    let k3 = 0.5 * J3 * RE * RE * RE;

    let sin_i = i.sin();
    let cos_i = i.cos();
    let sin_i_sq = sin_i * sin_i;

    // rad/s
    let j2_draan = -k2 * n * cos_i / (a * a * beta);
    let j2_dargp = k2 * n * (2.0 - 2.5 * sin_i_sq) / (a * a * beta);
    let j2_dm = n + k2 * n * (1.0 - 3.0 * sin_i_sq) / (2.0 * a * a * beta);

    let a3_gamma = a * a * a * gamma;
    let j3_draan = -k3 * n * sin_i / a3_gamma;
    let j3_dargp = k3 * n * (4.0 - 5.0 * sin_i_sq) * sin_i / (2.0 * a3_gamma);
    let j3_de = k3 * n * (1.5 * sin_i_sq - 1.0) * e / a3_gamma;
    let j3_di = k3 * n * cos_i / (2.0 * a3_gamma);

    let (drag_da, drag_de) = drag_rates(a, e, ballistic_coefficient);

    let per_year_deg = |rad_s: f64| rad_s.to_degrees() * SECONDS_PER_YEAR;

    let j2 = PerturbationRates {
        da_dt: 0.0,
        de_dt: 0.0,
        di_dt: 0.0,
        draan_dt: per_year_deg(j2_draan),
        dargp_dt: per_year_deg(j2_dargp),
        dm_dt: j2_dm.to_degrees() * SECONDS_PER_DAY,
    };

    let j3 = PerturbationRates {
        da_dt: 0.0,
        de_dt: j3_de * SECONDS_PER_YEAR,
        di_dt: per_year_deg(j3_di),
        draan_dt: per_year_deg(j3_draan),
        dargp_dt: per_year_deg(j3_dargp),
        dm_dt: 0.0,
    };

    let drag = PerturbationRates {
        da_dt: drag_da * SECONDS_PER_YEAR / 1000.0,
        de_dt: drag_de * SECONDS_PER_YEAR,
        ..PerturbationRates::default()
    };

    DetailedPerturbationRates {
        j2,
        j3,
        drag,
        total: j2 + j3 + drag,
    }
}

/// Only the summed rates
pub fn calculate_perturbation_rates(
    elements: &OrbitalElements,
    ballistic_coefficient: f64,
) -> PerturbationRates {
    calculate_detailed_perturbation_rates(elements, ballistic_coefficient).total
}

/// (da/dt in m/s, de/dt in 1/s), zero above the drag ceiling
fn drag_rates(a: f64, e: f64, ballistic_coefficient: f64) -> (f64, f64) {
    let perigee_altitude = a * (1.0 - e) - RE;
    if perigee_altitude >= DRAG_CEILING_M {
        return (0.0, 0.0);
    }

    let rho = ATMOSPHERE_REF_DENSITY
        * (-(perigee_altitude - ATMOSPHERE_REF_ALTITUDE_M) / ATMOSPHERE_SCALE_HEIGHT_M).exp();
    let v = (MU / a).sqrt();
    let force = 0.5 * rho * v * v * ballistic_coefficient;

    (-2.0 * a * force, -force * (2.0 / PI) * a * e)
}
