pub mod dates;
pub mod engine;

pub use dates::{parse_date, rolling_window_start, DateRange};
pub use engine::QueryEngine;
