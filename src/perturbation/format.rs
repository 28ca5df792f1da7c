use crate::perturbation::types::{FormattedRate, PerturbationRates};

const DAYS_PER_YEAR: f64 = 365.25;
const NEGLIGIBLE_RATE: f64 = 1e-10;

/// Six display lines, one per element
pub fn format_perturbation_rates(rates: &PerturbationRates) -> Vec<String> {
    vec![
        format!("da/dt: {} km/year", fixed(rates.da_dt, 3)),
        format!("de/dt: {} /year", exponential(rates.de_dt, 2)),
        format!("di/dt: {} deg/year", fixed(rates.di_dt, 4)),
        format!("dΩ/dt: {} deg/year", fixed(rates.draan_dt, 2)),
        format!("dω/dt: {} deg/year", fixed(rates.dargp_dt, 2)),
        format!("dM/dt: {} deg/day", fixed(rates.dm_dt, 3)),
    ]
}

/// Nodal and apsidal drift in deg/day, omitting negligible rates
pub fn format_j2_perturbation_rates(rates: &PerturbationRates) -> Vec<FormattedRate> {
    significant(vec![
        (
            r"d\Omega/dt",
            format!("{} deg/day", fixed(rates.draan_dt / DAYS_PER_YEAR, 2)),
            rates.draan_dt,
        ),
        (
            r"d\omega/dt",
            format!("{} deg/day", fixed(rates.dargp_dt / DAYS_PER_YEAR, 2)),
            rates.dargp_dt,
        ),
    ])
}

pub fn format_j3_perturbation_rates(rates: &PerturbationRates) -> Vec<FormattedRate> {
    significant(vec![
        ("de/dt", format!("{} /year", exponential(rates.de_dt, 2)), rates.de_dt),
        ("di/dt", format!("{} deg/year", fixed(rates.di_dt, 2)), rates.di_dt),
        (
            r"d\Omega/dt",
            format!("{} deg/year", fixed(rates.draan_dt, 2)),
            rates.draan_dt,
        ),
        (
            r"d\omega/dt",
            format!("{} deg/year", fixed(rates.dargp_dt, 2)),
            rates.dargp_dt,
        ),
    ])
}

/// Orbit decay in km/day, empty when there is none
pub fn format_drag_perturbation_rates(rates: &PerturbationRates) -> Vec<String> {
    if rates.da_dt.abs() < NEGLIGIBLE_RATE {
        return Vec::new();
    }
    vec![format!("da/dt: {} km/day", fixed(rates.da_dt / DAYS_PER_YEAR, 6))]
}

fn significant(items: Vec<(&str, String, f64)>) -> Vec<FormattedRate> {
    items
        .into_iter()
        .filter(|(_, _, raw)| raw.abs() > NEGLIGIBLE_RATE)
        .map(|(latex, value, _)| FormattedRate {
            latex: latex.to_string(),
            value,
        })
        .collect()
}

/// Fixed-point rendering; negative zero prints as zero
fn fixed(value: f64, precision: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", precision, value)
}

/// Scientific notation with an explicitly signed exponent (`1.50e-6`, `2.00e+3`)
fn exponential(value: f64, precision: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let rendered = format!("{:.*e}", precision, value);
    match rendered.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rates() -> PerturbationRates {
        PerturbationRates {
            da_dt: 0.0,
            de_dt: 1.5e-6,
            di_dt: -0.67,
            draan_dt: -1827.857,
            dargp_dt: 1365.730,
            dm_dt: 0.0,
        }
    }

    fn values(items: &[FormattedRate]) -> Vec<&str> {
        items.iter().map(|i| i.value.as_str()).collect()
    }

    #[test]
    fn j2_shows_deg_per_day() {
        let out = format_j2_perturbation_rates(&sample_rates());
        assert_eq!(values(&out), vec!["-5.00 deg/day", "3.74 deg/day"]);
        assert_eq!(out[0].latex, r"d\Omega/dt");
        assert_eq!(out[1].latex, r"d\omega/dt");
    }

    #[test]
    fn j3_shows_exponential_eccentricity_rate() {
        let out = format_j3_perturbation_rates(&sample_rates());
        assert_eq!(
            values(&out),
            vec!["1.50e-6 /year", "-0.67 deg/year", "-1827.86 deg/year", "1365.73 deg/year"]
        );
        assert_eq!(out[0].latex, "de/dt");
    }

    #[test]
    fn negligible_rates_are_omitted() {
        let zero = PerturbationRates::default();
        assert!(format_j2_perturbation_rates(&zero).is_empty());
        assert!(format_j3_perturbation_rates(&zero).is_empty());
        assert!(format_drag_perturbation_rates(&zero).is_empty());

        let tiny = PerturbationRates {
            de_dt: 1e-10,
            di_dt: 2e-10,
            ..PerturbationRates::default()
        };
        let out = format_j3_perturbation_rates(&tiny);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].latex, "di/dt");
    }

    #[test]
    fn drag_decay_in_km_per_day() {
        let rates = PerturbationRates {
            da_dt: -365.25,
            ..PerturbationRates::default()
        };
        assert_eq!(format_drag_perturbation_rates(&rates), vec!["da/dt: -1.000000 km/day"]);
    }

    #[test]
    fn summary_lines_use_per_field_precision() {
        let rates = PerturbationRates {
            da_dt: -12.3456,
            de_dt: 150.0,
            di_dt: 0.5,
            draan_dt: -1827.857,
            dargp_dt: 1365.730,
            dm_dt: 5597.2744,
        };
        assert_eq!(
            format_perturbation_rates(&rates),
            vec![
                "da/dt: -12.346 km/year",
                "de/dt: 1.50e+2 /year",
                "di/dt: 0.5000 deg/year",
                "dΩ/dt: -1827.86 deg/year",
                "dω/dt: 1365.73 deg/year",
                "dM/dt: 5597.274 deg/day",
            ]
        );
    }

    #[test]
    fn zero_renders_without_sign() {
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(exponential(0.0, 2), "0.00e+0");
        assert_eq!(exponential(-0.0, 2), "0.00e+0");
        assert_eq!(exponential(-2.5e-11, 2), "-2.50e-11");
    }
}
