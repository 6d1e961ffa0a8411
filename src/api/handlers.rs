use crate::api::routes::{AppState, ROUTE_LISTING};
use crate::error::Result;
use crate::models::{PrecipitationReading, StationId, TemperatureSummary};
use crate::query::{DateRange, QueryEngine};
use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

/// `GET /`
pub async fn list_routes() -> Json<Vec<&'static str>> {
    Json(ROUTE_LISTING.to_vec())
}

/// `GET /api/v1.0/precipitation`
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationReading>>> {
    let series = QueryEngine::new(&state.store).precipitation_series()?;
    debug!(readings = series.len(), "Serving precipitation series");
    Ok(Json(series))
}

/// `GET /api/v1.0/stations`
pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<StationId>>> {
    let stations = QueryEngine::new(&state.store).station_list()?;
    Ok(Json(stations))
}

/// `GET /api/v1.0/tobs`
pub async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<f64>>> {
    let temperatures = QueryEngine::new(&state.store).most_active_temperature_series()?;
    debug!(observations = temperatures.len(), "Serving temperature series");
    Ok(Json(temperatures))
}

/// `GET /api/v1.0/{start}`
pub async fn temperature_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>> {
    let range = DateRange::parse(&start, None)?;
    let summary = QueryEngine::new(&state.store).temperature_summary(range)?;
    Ok(Json(summary))
}

/// `GET /api/v1.0/{start}/{end}`
pub async fn temperature_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>> {
    let range = DateRange::parse(&start, Some(&end))?;
    let summary = QueryEngine::new(&state.store).temperature_summary(range)?;
    Ok(Json(summary))
}
