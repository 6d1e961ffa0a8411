use crate::error::Result;
use crate::readers::{MeasurementReader, StationReader};
use crate::store::DatasetStore;
use crate::utils::constants::{MEASUREMENTS_FILE, STATIONS_FILE};
use std::io;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::info;

/// Reads the station and measurement files concurrently and assembles the
/// immutable [`DatasetStore`].
pub struct DatasetLoader {
    use_mmap: bool,
    strict_validation: bool,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            use_mmap: false,
            strict_validation: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn with_strict_validation(mut self, strict_validation: bool) -> Self {
        self.strict_validation = strict_validation;
        self
    }

    /// Load the default file names from a directory
    pub async fn load_from_dir(&self, data_dir: &Path) -> Result<DatasetStore> {
        self.load(&data_dir.join(STATIONS_FILE), &data_dir.join(MEASUREMENTS_FILE))
            .await
    }

    pub async fn load(&self, stations_path: &Path, measurements_path: &Path) -> Result<DatasetStore> {
        for path in [stations_path, measurements_path] {
            if !path.exists() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Dataset file not found: {}", path.display()),
                )
                .into());
            }
        }

        let strict = self.strict_validation;
        let use_mmap = self.use_mmap;
        let stations_path: PathBuf = stations_path.to_path_buf();
        let measurements_path: PathBuf = measurements_path.to_path_buf();

        let stations_handle: JoinHandle<Result<_>> = tokio::task::spawn_blocking(move || {
            StationReader::with_strict_validation(strict).read_stations(&stations_path)
        });

        let measurements_handle: JoinHandle<Result<_>> = tokio::task::spawn_blocking(move || {
            MeasurementReader::new()
                .with_mmap(use_mmap)
                .with_strict_validation(strict)
                .read_measurements(&measurements_path)
        });

        // Wait for both reads to complete
        let (stations, measurements) = tokio::try_join!(stations_handle, measurements_handle)?;
        let (stations, measurements) = (stations?, measurements?);

        info!(
            stations = stations.len(),
            measurements = measurements.len(),
            "Dataset files read"
        );

        let store = tokio::task::spawn_blocking(move || DatasetStore::new(stations, measurements)).await?;
        Ok(store)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn write_dataset(dir: &Path) {
        std::fs::write(
            dir.join(STATIONS_FILE),
            "station,name,latitude,longitude,elevation\n\
             USC00519397,WAIKIKI 717.2,21.2716,-157.8168,3\n\
             USC00513117,KANEOHE 838.1,21.4234,-157.8015,14.6\n",
        )
        .unwrap();
        std::fs::write(
            dir.join(MEASUREMENTS_FILE),
            "station,date,prcp,tobs\n\
             USC00513117,2017-08-23,0.0,80\n\
             USC00519397,2010-01-01,0.08,65\n\
             USC00519397,2017-08-22,,78\n",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_load_from_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        write_dataset(temp_dir.path());

        let store = DatasetLoader::new().load_from_dir(temp_dir.path()).await?;

        assert_eq!(store.station_count(), 2);
        assert_eq!(store.measurement_count(), 3);
        assert_eq!(store.max_date()?, NaiveDate::from_ymd_opt(2017, 8, 23).unwrap());

        Ok(())
    }

    #[tokio::test]
    async fn test_load_with_mmap() -> Result<()> {
        let temp_dir = TempDir::new()?;
        write_dataset(temp_dir.path());

        let store = DatasetLoader::new()
            .with_mmap(true)
            .load_from_dir(temp_dir.path())
            .await?;

        assert_eq!(store.measurement_count(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();

        let result = DatasetLoader::new().load_from_dir(temp_dir.path()).await;
        match result {
            Err(ServiceError::Io(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert!(e.to_string().contains(STATIONS_FILE));
            }
            other => panic!("expected NotFound io error, got {other:?}"),
        }
    }
}
