mod format;
mod rates;
mod types;

pub use format::{
    format_drag_perturbation_rates, format_j2_perturbation_rates, format_j3_perturbation_rates,
    format_perturbation_rates,
};
pub use rates::{
    calculate_detailed_perturbation_rates, calculate_perturbation_rates,
    DEFAULT_BALLISTIC_COEFFICIENT,
};
pub use types::{
    DetailedPerturbationRates, FormattedRate, OrbitalElements, PerturbationRates,
    PerturbationSource,
};
