pub mod measurement;
pub mod station;
pub mod summary;

pub use measurement::Measurement;
pub use station::{Station, StationId};
pub use summary::{PrecipitationReading, StationActivity, TemperatureSummary};
