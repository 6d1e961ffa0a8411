use crate::error::{Result, ServiceError};
use crate::models::{PrecipitationReading, StationActivity, StationId, TemperatureSummary};
use crate::query::dates::{rolling_window_start, DateRange};
use crate::store::DatasetStore;
use tracing::debug;

/// Derived queries over a borrowed [`DatasetStore`]. Every method is a pure
/// read and allocates only its own result.
pub struct QueryEngine<'a> {
    store: &'a DatasetStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a DatasetStore) -> Self {
        Self { store }
    }

    /// Daily precipitation for the 365 days ending at the latest date in the
    /// dataset, ascending by date. Missing readings stay `None`.
    pub fn precipitation_series(&self) -> Result<Vec<PrecipitationReading>> {
        let max_date = self.store.max_date()?;
        let window_start = rolling_window_start(max_date);
        debug!(%window_start, %max_date, "Computing precipitation series");

        let rows = self.store.measurements_in_range(window_start, None)?;
        Ok(rows
            .iter()
            .map(|m| PrecipitationReading {
                date: m.date,
                prcp: m.precipitation,
            })
            .collect())
    }

    pub fn station_list(&self) -> Result<Vec<StationId>> {
        Ok(self.store.distinct_station_ids()?.to_vec())
    }

    /// Station with the highest row count; ties go to the smallest id.
    pub fn most_active_station(&self) -> Result<StationActivity> {
        let counts = self.store.observation_counts_by_station()?;

        // Ascending key order plus a strict comparison keeps the smallest id
        // among equal counts.
        let mut best: Option<(&StationId, usize)> = None;
        for (station, &count) in counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((station, count));
            }
        }

        best.map(|(station, observations)| StationActivity {
            station: station.clone(),
            observations,
        })
        .ok_or(ServiceError::EmptyDataset)
    }

    /// Temperatures observed by the most active station over the 365 days
    /// ending at that station's own latest date.
    pub fn most_active_temperature_series(&self) -> Result<Vec<f64>> {
        let activity = self.most_active_station()?;
        let Some(max_date) = self.store.max_date_for_station(&activity.station)? else {
            return Ok(Vec::new());
        };
        let window_start = rolling_window_start(max_date);
        debug!(
            station = %activity.station,
            observations = activity.observations,
            %window_start,
            "Computing temperature series for most active station"
        );

        let rows = self
            .store
            .measurements_for_station(&activity.station, window_start, None)?;
        Ok(rows.iter().filter_map(|m| m.temperature).collect())
    }

    /// Min/avg/max temperature over `range`. No matching rows gives an
    /// all-`None` summary.
    pub fn temperature_summary(&self, range: DateRange) -> Result<TemperatureSummary> {
        let rows = self.store.measurements_in_range(range.start, range.end)?;
        let summary = TemperatureSummary::from_temperatures(rows.iter().filter_map(|m| m.temperature));
        debug_assert!(summary.is_ordered());
        debug!(
            start = %range.start,
            end = ?range.end,
            rows = rows.len(),
            "Computed temperature summary"
        );
        Ok(summary)
    }
}
