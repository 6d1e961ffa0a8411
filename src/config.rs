use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_DATA_DIR, DEFAULT_HOST, DEFAULT_PORT, MEASUREMENTS_FILE, STATIONS_FILE,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Service settings, layered as built-in defaults, then an optional TOML
/// file, then command line overrides applied by the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(nested)]
    pub data: DataSettings,

    #[validate(nested)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DataSettings {
    pub dir: PathBuf,
    /// Overrides `dir/hawaii_stations.csv` when set.
    pub stations_file: Option<PathBuf>,
    /// Overrides `dir/hawaii_measurements.csv` when set.
    pub measurements_file: Option<PathBuf>,
    pub use_mmap: bool,
    pub strict_validation: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerSettings {
    #[validate(length(min = 1))]
    pub host: String,

    #[validate(range(min = 1))]
    pub port: u16,

    #[validate(range(min = 1, max = 1024))]
    pub worker_threads: usize,
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("data.dir", DEFAULT_DATA_DIR)?
            .set_default("data.use_mmap", false)?
            .set_default("data.strict_validation", false)?
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.worker_threads", num_cpus::get() as i64)?;

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn stations_path(&self) -> PathBuf {
        self.data
            .stations_file
            .clone()
            .unwrap_or_else(|| self.data.dir.join(STATIONS_FILE))
    }

    pub fn measurements_path(&self) -> PathBuf {
        self.data
            .measurements_file
            .clone()
            .unwrap_or_else(|| self.data.dir.join(MEASUREMENTS_FILE))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
