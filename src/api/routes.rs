use crate::api::handlers;
use crate::store::DatasetStore;
use crate::utils::constants::{
    ROUTE_INDEX, ROUTE_PRECIPITATION, ROUTE_START, ROUTE_START_END, ROUTE_STATIONS, ROUTE_TOBS,
};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Paths reported by `GET /`, in the placeholder style clients expect.
pub const ROUTE_LISTING: [&str; 6] = [
    "/",
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// Router state. The store is fully built before it is placed here and is
/// never mutated afterwards, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
}

impl AppState {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ROUTE_INDEX, get(handlers::list_routes))
        .route(ROUTE_PRECIPITATION, get(handlers::precipitation))
        .route(ROUTE_STATIONS, get(handlers::stations))
        .route(ROUTE_TOBS, get(handlers::tobs))
        .route(ROUTE_START, get(handlers::temperature_from))
        .route(ROUTE_START_END, get(handlers::temperature_between))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
