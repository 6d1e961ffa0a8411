pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ErrorResponse;
pub use routes::{router, AppState, ROUTE_LISTING};
