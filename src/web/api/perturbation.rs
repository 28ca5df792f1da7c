use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::perturbation::{
    calculate_detailed_perturbation_rates, format_drag_perturbation_rates,
    format_j2_perturbation_rates, format_j3_perturbation_rates, format_perturbation_rates,
    DetailedPerturbationRates, FormattedRate, OrbitalElements,
};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PerturbationRequest {
    pub elements: OrbitalElements,
    /// CdA/m in m^2/kg; defaults to the configured value
    pub ballistic_coefficient: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PerturbationResponse {
    pub rates: DetailedPerturbationRates,
    pub j2: Vec<FormattedRate>,
    pub j3: Vec<FormattedRate>,
    pub drag: Vec<String>,
    pub total: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/perturbation",
    request_body = PerturbationRequest,
    responses(
        (status = 200, description = "Secular perturbation rates", body = PerturbationResponse),
        (status = 400, description = "Elements outside the valid range", body = ErrorResponse)
    ),
    tag = "perturbation"
)]
pub async fn perturbation(
    State(state): State<AppState>,
    Json(request): Json<PerturbationRequest>,
) -> ApiResult<Json<PerturbationResponse>> {
    let el = &request.elements;
    if !(el.semi_major_axis_km.is_finite() && el.semi_major_axis_km > 0.0) {
        return Err(ApiError::Validation("semi_major_axis_km must be positive".into()));
    }
    if !(0.0..1.0).contains(&el.eccentricity) {
        return Err(ApiError::Validation("eccentricity must be in [0, 1)".into()));
    }
    if !el.inclination_deg.is_finite() {
        return Err(ApiError::Validation("inclination_deg must be finite".into()));
    }

    let bc = request
        .ballistic_coefficient
        .unwrap_or(state.config.perturbation.ballistic_coefficient);
    let rates = calculate_detailed_perturbation_rates(el, bc);

    Ok(Json(PerturbationResponse {
        j2: format_j2_perturbation_rates(&rates.j2),
        j3: format_j3_perturbation_rates(&rates.j3),
        drag: format_drag_perturbation_rates(&rates.drag),
        total: format_perturbation_rates(&rates.total),
        rates,
    }))
}
