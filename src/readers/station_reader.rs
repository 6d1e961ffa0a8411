use crate::error::Result;
use crate::models::Station;
use std::path::Path;
use tracing::warn;
use validator::Validate;

/// Reads `station,name,latitude,longitude,elevation` CSV files.
pub struct StationReader {
    strict_validation: bool,
}

impl StationReader {
    pub fn new() -> Self {
        Self {
            strict_validation: false,
        }
    }

    pub fn with_strict_validation(strict_validation: bool) -> Self {
        Self { strict_validation }
    }

    /// Read station metadata from a CSV file
    pub fn read_stations(&self, path: &Path) -> Result<Vec<Station>> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        self.read_from(reader)
    }

    fn read_from<R: std::io::Read>(&self, mut reader: csv::Reader<R>) -> Result<Vec<Station>> {
        let mut stations = Vec::new();

        for (row, result) in reader.deserialize::<Station>().enumerate() {
            let station = result?;

            if let Err(e) = station.validate() {
                if self.strict_validation {
                    return Err(e.into());
                }
                warn!(row = row + 1, station = %station.id, error = %e, "Skipping invalid station");
                continue;
            }

            stations.push(station);
        }

        Ok(stations)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
