//! Satellite constellation access analysis: orbit propagation, ground-station
//! visibility sampling, access statistics and secular perturbation rates.

pub mod access;
pub mod config;
pub mod perturbation;
pub mod report;
pub mod satellite;
pub mod stats;
pub mod sweep;
pub mod visibility;
pub mod web;

pub use config::{Config, ConfigError};
