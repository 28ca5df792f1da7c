use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::perturbation::{PerturbationRequest, PerturbationResponse};
use super::api::positions::{PositionsResponse, StationLinks};
use super::api::visibility::VisibilityResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::visibility::stations,
        super::api::visibility::visibility,
        super::api::visibility::report,
        super::api::perturbation::perturbation,
        super::api::positions::positions,
    ),
    components(
        schemas(
            ErrorResponse,
            VisibilityResponse,
            PerturbationRequest,
            PerturbationResponse,
            PositionsResponse,
            StationLinks,
            crate::visibility::GroundStation,
            crate::visibility::VisibilitySample,
            crate::visibility::StationCount,
            crate::visibility::SatelliteState,
            crate::visibility::Geodetic,
            crate::satellite::InertialState,
            crate::stats::StationStatistic,
            crate::stats::AvailabilityMetric,
            crate::stats::AveragedSample,
            crate::stats::StationAverage,
            crate::perturbation::OrbitalElements,
            crate::perturbation::PerturbationRates,
            crate::perturbation::DetailedPerturbationRates,
            crate::perturbation::FormattedRate,
        )
    ),
    info(
        title = "Constellation Access API",
        description = "Satellite visibility, access statistics and perturbation rates",
        version = "0.1.0"
    ),
    tags(
        (name = "visibility", description = "Ground station visibility sampling"),
        (name = "perturbation", description = "Secular perturbation rates"),
        (name = "positions", description = "Live satellite positions")
    )
)]
pub struct ApiDoc;
