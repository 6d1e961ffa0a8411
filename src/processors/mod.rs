pub mod integrity_checker;

pub use integrity_checker::{DataIssue, IntegrityChecker, IntegrityReport, IssueType, StationStatistics};
