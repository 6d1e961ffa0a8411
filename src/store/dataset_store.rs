use crate::error::{Result, ServiceError};
use crate::models::{Measurement, Station, StationId};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Immutable in-memory snapshot of the dataset.
///
/// Measurements are held in one vector sorted by `(date, station_id)`, so any
/// date range is a contiguous slice found by binary search. Each station also
/// keeps the positions of its own rows in that vector, already in date order.
#[derive(Debug, Default)]
pub struct DatasetStore {
    stations: HashMap<StationId, Station>,
    measurements: Vec<Measurement>,
    station_rows: HashMap<StationId, Vec<usize>>,
    station_order: Vec<StationId>,
    observation_counts: BTreeMap<StationId, usize>,
}

impl DatasetStore {
    pub fn new(stations: Vec<Station>, mut measurements: Vec<Measurement>) -> Self {
        // First-seen order has to be captured before sorting.
        let station_order: Vec<StationId> = {
            let mut seen = HashSet::new();
            measurements
                .iter()
                .filter(|m| seen.insert(m.station_id.as_str()))
                .map(|m| m.station_id.clone())
                .collect()
        };

        // Stable, so duplicate rows keep their source order.
        measurements.par_sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.station_id.cmp(&b.station_id))
        });

        let mut station_rows: HashMap<StationId, Vec<usize>> = HashMap::new();
        for (idx, measurement) in measurements.iter().enumerate() {
            station_rows
                .entry(measurement.station_id.clone())
                .or_default()
                .push(idx);
        }

        let observation_counts = station_rows
            .iter()
            .map(|(id, rows)| (id.clone(), rows.len()))
            .collect();

        let stations = stations.into_iter().map(|s| (s.id.clone(), s)).collect();

        Self {
            stations,
            measurements,
            station_rows,
            station_order,
            observation_counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn measurement_count(&self) -> usize {
        self.measurements.len()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Registered station metadata, regardless of whether it has measurements.
    pub fn station(&self, station_id: &str) -> Option<&Station> {
        self.stations.get(station_id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// All measurements in `(date, station_id)` order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    fn ensure_populated(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ServiceError::EmptyDataset);
        }
        Ok(())
    }

    /// Latest date across all measurements.
    pub fn max_date(&self) -> Result<NaiveDate> {
        self.measurements
            .last()
            .map(|m| m.date)
            .ok_or(ServiceError::EmptyDataset)
    }

    /// Earliest date across all measurements.
    pub fn min_date(&self) -> Result<NaiveDate> {
        self.measurements
            .first()
            .map(|m| m.date)
            .ok_or(ServiceError::EmptyDataset)
    }

    /// Measurements with `start <= date` and, when given, `date <= end`.
    pub fn measurements_in_range(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<&[Measurement]> {
        self.ensure_populated()?;

        let lower = self.measurements.partition_point(|m| m.date < start);
        let upper = match end {
            Some(end) => self.measurements.partition_point(|m| m.date <= end),
            None => self.measurements.len(),
        };

        if lower >= upper {
            return Ok(&[]);
        }
        Ok(&self.measurements[lower..upper])
    }

    /// Same as [`measurements_in_range`](Self::measurements_in_range),
    /// restricted to one station. Unknown stations yield no rows.
    pub fn measurements_for_station(
        &self,
        station_id: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Vec<&Measurement>> {
        self.ensure_populated()?;

        let Some(rows) = self.station_rows.get(station_id) else {
            return Ok(Vec::new());
        };

        let lower = rows.partition_point(|&i| self.measurements[i].date < start);
        let upper = match end {
            Some(end) => rows.partition_point(|&i| self.measurements[i].date <= end),
            None => rows.len(),
        };

        if lower >= upper {
            return Ok(Vec::new());
        }
        Ok(rows[lower..upper]
            .iter()
            .map(|&i| &self.measurements[i])
            .collect())
    }

    /// Latest date among one station's measurements.
    pub fn max_date_for_station(&self, station_id: &str) -> Result<Option<NaiveDate>> {
        self.ensure_populated()?;

        Ok(self
            .station_rows
            .get(station_id)
            .and_then(|rows| rows.last())
            .map(|&i| self.measurements[i].date))
    }

    /// Station ids that appear in measurement data, in first-seen order.
    pub fn distinct_station_ids(&self) -> Result<&[StationId]> {
        self.ensure_populated()?;
        Ok(&self.station_order)
    }

    /// Rows per station over the whole dataset, keyed in ascending id order.
    pub fn observation_counts_by_station(&self) -> Result<&BTreeMap<StationId, usize>> {
        self.ensure_populated()?;
        Ok(&self.observation_counts)
    }
}
