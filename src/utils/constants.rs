/// Dataset file names
pub const DEFAULT_DATA_DIR: &str = "Resources";
pub const STATIONS_FILE: &str = "hawaii_stations.csv";
pub const MEASUREMENTS_FILE: &str = "hawaii_measurements.csv";

/// Rolling window length, counted in days rather than calendar months
pub const ROLLING_WINDOW_DAYS: i64 = 365;

/// Date format accepted on the API and in the dataset
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Plausible observed temperature bounds (degrees Fahrenheit)
pub const MIN_VALID_TEMP_F: f64 = -80.0;
pub const MAX_VALID_TEMP_F: f64 = 140.0;

/// Server defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// API routes
pub const ROUTE_INDEX: &str = "/";
pub const ROUTE_PRECIPITATION: &str = "/api/v1.0/precipitation";
pub const ROUTE_STATIONS: &str = "/api/v1.0/stations";
pub const ROUTE_TOBS: &str = "/api/v1.0/tobs";
pub const ROUTE_START: &str = "/api/v1.0/{start}";
pub const ROUTE_START_END: &str = "/api/v1.0/{start}/{end}";
