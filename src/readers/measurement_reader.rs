use crate::error::Result;
use crate::models::Measurement;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Reads `station,date,prcp,tobs` CSV files. Additional columns (such as a
/// row `id`) are ignored and empty cells become `None`.
pub struct MeasurementReader {
    use_mmap: bool,
    strict_validation: bool,
}

impl MeasurementReader {
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

    /// Read every measurement row from a file
    pub fn read_measurements(&self, path: &Path) -> Result<Vec<Measurement>> {
        if self.use_mmap {
            self.read_measurements_mmap(path)
        } else {
            self.read_measurements_buffered(path)
        }
    }

    /// Read measurements using buffered I/O
    fn read_measurements_buffered(&self, path: &Path) -> Result<Vec<Measurement>> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        self.read_from(reader)
    }

    /// Read measurements using memory-mapped I/O for large files
    fn read_measurements_mmap(&self, path: &Path) -> Result<Vec<Measurement>> {
        let file = File::open(path)?;
        // The dataset files are treated as read-only while the service runs.
        let mmap = unsafe { Mmap::map(&file)? };
        self.read_from(&mmap[..])
    }

    fn read_from<R: Read>(&self, source: R) -> Result<Vec<Measurement>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);

        let mut measurements = Vec::new();
        let mut skipped = 0usize;

        for (row, result) in reader.deserialize::<Measurement>().enumerate() {
            let measurement = result?;

            if let Err(e) = measurement.validate() {
                if self.strict_validation {
                    return Err(e);
                }
                warn!(row = row + 1, error = %e, "Skipping invalid measurement");
                skipped += 1;
                continue;
            }

            measurements.push(measurement);
        }

        debug!(rows = measurements.len(), skipped, "Read measurements");
        Ok(measurements)
    }
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::new()
    }
}
