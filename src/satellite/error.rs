use thiserror::Error;

#[derive(Debug, Error)]
pub enum SatelliteError {
    #[error("missing tle lines")]
    MissingTleLines,
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TLE source not found: {0}")]
    NotFound(String),
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Invalid TLE format in {file}: {message}")]
    InvalidTle { file: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("satellite {index}: missing TLE lines")]
    MissingTleLines { index: usize },
    #[error("satellite {index}: invalid TLE: {message}")]
    InvalidTle { index: usize, message: String },
    #[error("satellite {index}: incomplete elements entry ({field})")]
    InvalidElements { index: usize, field: &'static str },
    #[error("satellite {index}: elements cannot be propagated: {message}")]
    UnpropagatableElements { index: usize, message: String },
    #[error("ground station {index}: missing required fields ({field})")]
    InvalidStation { index: usize, field: &'static str },
}
