use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::StationId;

/// A `(date, prcp)` pair of the rolling precipitation series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    pub prcp: Option<f64>,
}

/// Min/avg/max temperature over a date range. Every field is `None` when no
/// observation matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,

    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,

    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
}

impl TemperatureSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single pass min/max/mean.
    pub fn from_temperatures<I>(temperatures: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for t in temperatures {
            count += 1;
            sum += t;
            min = min.min(t);
            max = max.max(t);
        }

        if count == 0 {
            return Self::empty();
        }

        Self {
            min: Some(min),
            avg: Some(sum / count as f64),
            max: Some(max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }

    /// `TMIN <= TAVG <= TMAX` whenever all three are present.
    pub fn is_ordered(&self) -> bool {
        match (self.min, self.avg, self.max) {
            (Some(min), Some(avg), Some(max)) => min <= avg && avg <= max,
            _ => true,
        }
    }
}

/// The station with the most observation rows, and how many it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivity {
    pub station: StationId,
    pub observations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_temperatures() {
        let summary = TemperatureSummary::from_temperatures([77.0, 80.0]);

        assert_eq!(summary.min, Some(77.0));
        assert_eq!(summary.avg, Some(78.5));
        assert_eq!(summary.max, Some(80.0));
        assert!(summary.is_ordered());
    }

    #[test]
    fn test_empty_summary_serializes_nulls() {
        let summary = TemperatureSummary::from_temperatures(std::iter::empty());
        assert!(summary.is_empty());

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"TMIN": null, "TAVG": null, "TMAX": null})
        );
    }

    #[test]
    fn test_precipitation_reading_keeps_null() {
        let date = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
        let missing = PrecipitationReading { date, prcp: None };
        let dry = PrecipitationReading { date, prcp: Some(0.0) };

        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            serde_json::json!({"date": "2017-08-23", "prcp": null})
        );
        assert_eq!(
            serde_json::to_value(&dry).unwrap(),
            serde_json::json!({"date": "2017-08-23", "prcp": 0.0})
        );
    }
}
