use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::models::StationId;
use crate::utils::constants::{MAX_VALID_TEMP_F, MIN_VALID_TEMP_F};

/// One daily observation row. Column names follow the dataset CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "station")]
    pub station_id: StationId,

    pub date: NaiveDate,

    /// Absent when nothing was recorded, which is not the same as `0.0`.
    #[serde(rename = "prcp")]
    pub precipitation: Option<f64>,

    #[serde(rename = "tobs")]
    pub temperature: Option<f64>,
}

impl Measurement {
    pub fn new(
        station_id: impl Into<StationId>,
        date: NaiveDate,
        precipitation: Option<f64>,
        temperature: Option<f64>,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            date,
            precipitation,
            temperature,
        }
    }

    pub fn has_precipitation(&self) -> bool {
        self.precipitation.is_some()
    }

    pub fn has_temperature(&self) -> bool {
        self.temperature.is_some()
    }

    pub fn is_valid_temperature(&self) -> bool {
        self.temperature
            .map_or(true, |t| t.is_finite() && (MIN_VALID_TEMP_F..=MAX_VALID_TEMP_F).contains(&t))
    }

    pub fn validate(&self) -> Result<()> {
        if self.station_id.is_empty() {
            return Err(ServiceError::MeasurementValidation {
                message: format!("Measurement on {} has no station id", self.date),
            });
        }

        if let Some(prcp) = self.precipitation {
            if !prcp.is_finite() || prcp < 0.0 {
                return Err(ServiceError::MeasurementValidation {
                    message: format!(
                        "Precipitation {} for {} on {} is negative or not a number",
                        prcp, self.station_id, self.date
                    ),
                });
            }
        }

        if !self.is_valid_temperature() {
            return Err(ServiceError::MeasurementValidation {
                message: format!(
                    "Temperature {:?} for {} on {} is outside valid range [{}, {}]",
                    self.temperature, self.station_id, self.date, MIN_VALID_TEMP_F, MAX_VALID_TEMP_F
                ),
            });
        }

        Ok(())
    }
}
