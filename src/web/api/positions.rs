use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::visibility::{count_visible, satellite_states, SatelliteState};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PositionsQuery {
    /// Instant to render (RFC3339), defaults to now
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StationLinks {
    pub name: String,
    pub visible_count: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionsResponse {
    pub at: DateTime<Utc>,
    pub satellites: Vec<SatelliteState>,
    /// Satellites with no valid position at `at`
    pub unavailable: Vec<String>,
    pub stations: Vec<StationLinks>,
}

#[utoipa::path(
    get,
    path = "/api/positions",
    params(PositionsQuery),
    responses(
        (
            status = 200,
            description = "Satellite positions and per-station link counts",
            body = PositionsResponse
        )
    ),
    tag = "positions"
)]
pub async fn positions(
    State(state): State<AppState>,
    Query(query): Query<PositionsQuery>,
) -> Json<PositionsResponse> {
    let at = query.at.unwrap_or_else(Utc::now);
    let propagators = state.propagators.as_slice();

    let mut satellites = Vec::new();
    let mut unavailable = Vec::new();
    for (p, snapshot) in propagators.iter().zip(satellite_states(propagators, at)) {
        match snapshot {
            Some(s) => satellites.push(s),
            None => unavailable.push(p.name().to_string()),
        }
    }

    let stations = state
        .config
        .ground_stations
        .iter()
        .map(|gs| StationLinks {
            name: gs.name.clone(),
            visible_count: count_visible(propagators, gs, at),
        })
        .collect();

    Json(PositionsResponse {
        at,
        satellites,
        unavailable,
        stations,
    })
}
