use crate::models::{Measurement, StationId};
use crate::store::DatasetStore;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Temperature change between consecutive observations of one station that
/// gets flagged (degrees Fahrenheit).
const DEFAULT_JUMP_THRESHOLD_F: f64 = 30.0;

#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    pub station_count: usize,
    pub measurement_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub missing_precipitation: usize,
    pub missing_temperature: usize,
    pub duplicate_rows: usize,
    pub orphaned_measurements: usize,
    pub stations_without_measurements: Vec<StationId>,
    pub issues: Vec<DataIssue>,
    pub station_statistics: BTreeMap<StationId, StationStatistics>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.stations_without_measurements.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DataIssue {
    pub station_id: StationId,
    pub date: NaiveDate,
    pub issue_type: IssueType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    DuplicateObservation,
    OrphanedMeasurement,
    SuspiciousJump,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationStatistics {
    pub observations: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub missing_precipitation: usize,
    pub missing_temperature: usize,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
}

pub struct IntegrityChecker {
    temperature_jump_threshold: f64,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self {
            temperature_jump_threshold: DEFAULT_JUMP_THRESHOLD_F,
        }
    }

    pub fn with_jump_threshold(temperature_jump_threshold: f64) -> Self {
        Self {
            temperature_jump_threshold,
        }
    }

    /// Check integrity of a loaded dataset
    pub fn check(&self, store: &DatasetStore) -> IntegrityReport {
        let measurements = store.measurements();
        let mut report = IntegrityReport {
            station_count: store.station_count(),
            measurement_count: measurements.len(),
            first_date: store.min_date().ok(),
            last_date: store.max_date().ok(),
            ..Default::default()
        };

        // Rows are date-ordered, so each group is too
        let mut station_records: HashMap<&str, Vec<&Measurement>> = HashMap::new();
        for record in measurements {
            station_records
                .entry(record.station_id.as_str())
                .or_default()
                .push(record);

            if !record.has_precipitation() {
                report.missing_precipitation += 1;
            }
            if !record.has_temperature() {
                report.missing_temperature += 1;
            }

            let stats = report
                .station_statistics
                .entry(record.station_id.clone())
                .or_default();
            self.update_statistics(stats, record);
        }

        for (station_id, records) in &station_records {
            if store.station(station_id).is_none() {
                report.orphaned_measurements += records.len();
                if let Some(first) = records.first() {
                    report.issues.push(DataIssue {
                        station_id: station_id.to_string(),
                        date: first.date,
                        issue_type: IssueType::OrphanedMeasurement,
                        details: format!(
                            "{} measurements reference unregistered station {}",
                            records.len(),
                            station_id
                        ),
                    });
                }
            }

            self.check_time_series_integrity(station_id, records, &mut report);
        }

        let mut idle: Vec<StationId> = store
            .stations()
            .filter(|s| !station_records.contains_key(s.id.as_str()))
            .map(|s| s.id.clone())
            .collect();
        idle.sort();
        report.stations_without_measurements = idle;

        report.issues.sort_by(|a, b| {
            a.station_id
                .cmp(&b.station_id)
                .then_with(|| a.date.cmp(&b.date))
        });

        report
    }

    fn update_statistics(&self, stats: &mut StationStatistics, record: &Measurement) {
        stats.observations += 1;
        stats.first_date = Some(stats.first_date.map_or(record.date, |d| d.min(record.date)));
        stats.last_date = Some(stats.last_date.map_or(record.date, |d| d.max(record.date)));

        if !record.has_precipitation() {
            stats.missing_precipitation += 1;
        }

        match record.temperature {
            Some(t) => {
                stats.min_temp = Some(stats.min_temp.map_or(t, |m| m.min(t)));
                stats.max_temp = Some(stats.max_temp.map_or(t, |m| m.max(t)));
            }
            None => stats.missing_temperature += 1,
        }
    }

    /// Flag duplicate dates and large day-to-day temperature swings
    fn check_time_series_integrity(
        &self,
        station_id: &str,
        records: &[&Measurement],
        report: &mut IntegrityReport,
    ) {
        for window in records.windows(2) {
            let prev = window[0];
            let curr = window[1];

            if prev.date == curr.date {
                report.duplicate_rows += 1;
                report.issues.push(DataIssue {
                    station_id: station_id.to_string(),
                    date: curr.date,
                    issue_type: IssueType::DuplicateObservation,
                    details: format!("More than one observation on {}", curr.date),
                });
                continue;
            }

            if let (Some(prev_temp), Some(curr_temp)) = (prev.temperature, curr.temperature) {
                let jump = (curr_temp - prev_temp).abs();

                if jump > self.temperature_jump_threshold {
                    report.issues.push(DataIssue {
                        station_id: station_id.to_string(),
                        date: curr.date,
                        issue_type: IssueType::SuspiciousJump,
                        details: format!(
                            "temperature jumped {:.1}°F from {} to {}",
                            jump, prev.date, curr.date
                        ),
                    });
                }
            }
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();
        let pct = |n: usize| {
            if report.measurement_count == 0 {
                0.0
            } else {
                100.0 * n as f64 / report.measurement_count as f64
            }
        };

        summary.push_str("=== Dataset Integrity Report ===\n");
        summary.push_str(&format!("Registered Stations: {}\n", report.station_count));
        summary.push_str(&format!("Total Measurements: {}\n", report.measurement_count));
        match (report.first_date, report.last_date) {
            (Some(first), Some(last)) => {
                summary.push_str(&format!("Date Span: {} to {}\n", first, last))
            }
            _ => summary.push_str("Date Span: (no measurements)\n"),
        }
        summary.push_str(&format!(
            "Missing Precipitation: {} ({:.1}%)\n",
            report.missing_precipitation,
            pct(report.missing_precipitation)
        ));
        summary.push_str(&format!(
            "Missing Temperature: {} ({:.1}%)\n",
            report.missing_temperature,
            pct(report.missing_temperature)
        ));
        summary.push_str(&format!("Duplicate Rows: {}\n", report.duplicate_rows));
        summary.push_str(&format!(
            "Orphaned Measurements: {}\n",
            report.orphaned_measurements
        ));

        if !report.stations_without_measurements.is_empty() {
            summary.push_str(&format!(
                "Stations Without Measurements: {}\n",
                report.stations_without_measurements.join(", ")
            ));
        }

        if !report.station_statistics.is_empty() {
            summary.push_str("\nObservations per Station:\n");
            let mut by_count: Vec<(&StationId, &StationStatistics)> =
                report.station_statistics.iter().collect();
            by_count.sort_by(|a, b| b.1.observations.cmp(&a.1.observations).then_with(|| a.0.cmp(b.0)));

            for (station_id, stats) in by_count {
                summary.push_str(&format!(
                    "  {}: {} observations, {} to {}\n",
                    station_id,
                    stats.observations,
                    stats.first_date.map(|d| d.to_string()).unwrap_or_default(),
                    stats.last_date.map(|d| d.to_string()).unwrap_or_default(),
                ));
            }
        }

        summary.push_str(&format!("\nIssues: {}\n", report.issues.len()));
        if !report.issues.is_empty() {
            summary.push_str("\nTop 10 Issues:\n");
            for (i, issue) in report.issues.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. Station {} on {}: {}\n",
                    i + 1,
                    issue.station_id,
                    issue.date,
                    issue.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Station;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_store() -> DatasetStore {
        let stations = vec![
            Station::new("S1", "Station One", 21.3, -157.8, Some(3.0)),
            Station::new("S3", "Idle Station", 21.4, -157.9, None),
        ];
        let measurements = vec![
            Measurement::new("S1", date(2017, 1, 1), Some(0.1), Some(70.0)),
            Measurement::new("S1", date(2017, 1, 1), Some(0.2), Some(71.0)),
            Measurement::new("S1", date(2017, 1, 2), None, Some(72.0)),
            Measurement::new("S1", date(2017, 1, 3), Some(0.0), Some(110.0)),
            Measurement::new("GHOST", date(2017, 1, 2), Some(0.3), None),
        ];
        DatasetStore::new(stations, measurements)
    }

    #[test]
    fn test_integrity_counts() {
        let store = sample_store();
        let report = IntegrityChecker::new().check(&store);

        assert_eq!(report.station_count, 2);
        assert_eq!(report.measurement_count, 5);
        assert_eq!(report.first_date, Some(date(2017, 1, 1)));
        assert_eq!(report.last_date, Some(date(2017, 1, 3)));
        assert_eq!(report.missing_precipitation, 1);
        assert_eq!(report.missing_temperature, 1);
        assert_eq!(report.duplicate_rows, 1);
        assert_eq!(report.orphaned_measurements, 1);
        assert_eq!(report.stations_without_measurements, vec!["S3".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_issue_types() {
        let store = sample_store();
        let report = IntegrityChecker::new().check(&store);

        let kinds: Vec<IssueType> = report.issues.iter().map(|i| i.issue_type).collect();
        assert!(kinds.contains(&IssueType::DuplicateObservation));
        assert!(kinds.contains(&IssueType::OrphanedMeasurement));
        assert!(kinds.contains(&IssueType::SuspiciousJump));
    }

    #[test]
    fn test_station_statistics() {
        let store = sample_store();
        let report = IntegrityChecker::new().check(&store);

        let s1 = &report.station_statistics["S1"];
        assert_eq!(s1.observations, 4);
        assert_eq!(s1.min_temp, Some(70.0));
        assert_eq!(s1.max_temp, Some(110.0));
        assert_eq!(s1.missing_precipitation, 1);
    }

    #[test]
    fn test_jump_threshold_is_configurable() {
        let store = sample_store();
        let report = IntegrityChecker::with_jump_threshold(50.0).check(&store);

        assert!(report
            .issues
            .iter()
            .all(|i| i.issue_type != IssueType::SuspiciousJump));
    }

    #[test]
    fn test_empty_dataset_summary() {
        let store = DatasetStore::default();
        let checker = IntegrityChecker::new();
        let report = checker.check(&store);

        assert!(report.is_clean());
        let summary = checker.generate_summary(&report);
        assert!(summary.contains("Total Measurements: 0"));
        assert!(summary.contains("(no measurements)"));
    }
}
