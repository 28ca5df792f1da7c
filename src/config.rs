use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::perturbation::DEFAULT_BALLISTIC_COEFFICIENT;
use crate::satellite::{
    normalize_all, validate_ground_stations, validate_satellites, CatalogError, ConstellationSpec,
    Propagator, SatelliteEntry, SatelliteError, TleCatalog, ValidationError,
};
use crate::visibility::{GroundStation, SampleWindow, WindowError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("TLE catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Invalid simulation window: {0}")]
    Window(#[from] WindowError),
    #[error("Satellite error: {0}")]
    Satellite(#[from] SatelliteError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub ground_stations: Vec<GroundStation>,
    #[serde(default)]
    pub satellites: Vec<SatelliteEntry>,
    /// Extra TLE catalogs, relative to the config file
    #[serde(default)]
    pub tle_files: Vec<PathBuf>,
    /// Generated shells, appended after the listed satellites
    #[serde(default)]
    pub constellation: Option<ConstellationSpec>,
    #[serde(default)]
    pub perturbation: PerturbationConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub duration: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub step: Duration,
    /// Samples per display point when block-averaging
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

fn default_block_size() -> usize {
    6
}

impl SimulationConfig {
    pub fn window(&self) -> Result<SampleWindow, WindowError> {
        SampleWindow::new(
            self.start,
            self.duration.as_secs_f64() / 3600.0,
            self.step.as_secs_f64(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerturbationConfig {
    #[serde(default = "default_ballistic_coefficient")]
    pub ballistic_coefficient: f64,
}

impl Default for PerturbationConfig {
    fn default() -> Self {
        Self {
            ballistic_coefficient: DEFAULT_BALLISTIC_COEFFICIENT,
        }
    }
}

fn default_ballistic_coefficient() -> f64 {
    DEFAULT_BALLISTIC_COEFFICIENT
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Largest sampling window a single request may ask for
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_samples: default_max_samples(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_samples() -> usize {
    100_000
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl FromStr for Config {
    type Err = ConfigError;

    /// Parse and validate in-memory YAML. `tle_files` are not loaded.
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut config: Config = serde_yaml::from_str(content)?;
        config.expand_constellation();
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Read, merge referenced TLE catalogs into `satellites`, and validate
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        if !config.tle_files.is_empty() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.load_catalogs(base)?;
        }
        config.expand_constellation();
        config.validate()?;

        log::info!(
            "Loaded {}: {} satellites, {} ground stations",
            path.display(),
            config.satellites.len(),
            config.ground_stations.len()
        );
        Ok(config)
    }

    fn load_catalogs(&mut self, base: &Path) -> Result<(), ConfigError> {
        let sources = self
            .tle_files
            .iter()
            .map(|f| if f.is_absolute() { f.clone() } else { base.join(f) })
            .collect();
        let mut catalog = TleCatalog::new(sources);
        catalog.load_all()?;
        self.satellites.extend(catalog.into_satellites());
        Ok(())
    }

    fn expand_constellation(&mut self) {
        if let Some(constellation) = &self.constellation {
            let generated = constellation.generate();
            log::info!("Generated {} constellation satellites", generated.len());
            self.satellites.extend(generated);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_satellites(&self.satellites)?;
        validate_ground_stations(&self.ground_stations)?;
        self.simulation.window()?;
        Ok(())
    }

    pub fn window(&self) -> Result<SampleWindow, WindowError> {
        self.simulation.window()
    }

    pub fn propagators(&self) -> Result<Vec<Propagator>, SatelliteError> {
        normalize_all(&self.satellites)
    }
}
