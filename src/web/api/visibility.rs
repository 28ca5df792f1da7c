use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::report::visibility_report;
use crate::stats::{
    availability_metrics, block_average, station_statistics, AvailabilityMetric, AveragedSample,
    StationStatistic,
};
use crate::visibility::{sample, GroundStation, SampleWindow, VisibilitySample};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// Sampling overrides; anything omitted comes from the configuration
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct VisibilityQuery {
    /// Start instant (RFC3339)
    pub start: Option<DateTime<Utc>>,
    pub duration_hours: Option<f64>,
    pub step_seconds: Option<f64>,
    /// Samples per averaged display point
    pub block_size: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VisibilityResponse {
    pub samples: Vec<VisibilitySample>,
    pub averaged: Vec<AveragedSample>,
    pub statistics: Vec<StationStatistic>,
    pub availability: Vec<AvailabilityMetric>,
}

impl VisibilityQuery {
    fn window(&self, state: &AppState) -> ApiResult<SampleWindow> {
        let configured = state.config.window()?;
        let window = SampleWindow::new(
            self.start.unwrap_or(configured.start()),
            self.duration_hours.unwrap_or(configured.duration_hours()),
            self.step_seconds.unwrap_or(configured.step_seconds()),
        )?;

        let limit = state.config.web.max_samples;
        if window.nominal_sample_count() > limit as f64 {
            return Err(ApiError::Validation(format!(
                "window of {} samples exceeds the limit of {}",
                window.nominal_sample_count(),
                limit
            )));
        }
        Ok(window)
    }
}

async fn sample_in_background(
    state: AppState,
    window: SampleWindow,
) -> ApiResult<Vec<VisibilitySample>> {
    let samples = tokio::task::spawn_blocking(move || {
        sample(state.propagators.as_slice(), &state.config.ground_stations, &window)
    })
    .await?;
    Ok(samples)
}

#[utoipa::path(
    get,
    path = "/api/stations",
    responses(
        (status = 200, description = "Configured ground stations", body = Vec<GroundStation>)
    ),
    tag = "visibility"
)]
pub async fn stations(State(state): State<AppState>) -> Json<Vec<GroundStation>> {
    Json(state.config.ground_stations.clone())
}

#[utoipa::path(
    get,
    path = "/api/visibility",
    params(VisibilityQuery),
    responses(
        (
            status = 200,
            description = "Visibility time series and statistics",
            body = VisibilityResponse
        ),
        (status = 400, description = "Invalid sampling window", body = ErrorResponse)
    ),
    tag = "visibility"
)]
pub async fn visibility(
    State(state): State<AppState>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<Json<VisibilityResponse>> {
    let window = query.window(&state)?;
    let block_size = query.block_size.unwrap_or(state.config.simulation.block_size);

    let samples = sample_in_background(state, window).await?;
    Ok(Json(VisibilityResponse {
        averaged: block_average(&samples, block_size),
        statistics: station_statistics(&samples),
        availability: availability_metrics(&samples, window.step_seconds()),
        samples,
    }))
}

#[utoipa::path(
    get,
    path = "/api/report",
    params(VisibilityQuery),
    responses(
        (
            status = 200,
            description = "CSV visibility report",
            body = String,
            content_type = "text/csv"
        ),
        (status = 400, description = "Invalid sampling window", body = ErrorResponse)
    ),
    tag = "visibility"
)]
pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<VisibilityQuery>,
) -> ApiResult<impl IntoResponse> {
    let window = query.window(&state)?;
    let stations = state.config.ground_stations.clone();
    let samples = sample_in_background(state, window).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/csv")],
        visibility_report(&stations, &samples),
    ))
}
