pub mod error;
pub mod perturbation;
pub mod positions;
pub mod visibility;
