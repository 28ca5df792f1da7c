use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindowError {
    #[error("Step must be a positive number of seconds, got {0}")]
    NonPositiveStep(f64),
    #[error("Duration must be a non-negative number of hours, got {0}")]
    InvalidDuration(f64),
}
