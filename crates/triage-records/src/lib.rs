//! Triage records: persisted summaries, status handling, dashboard
//! filtering and aggregated reports.

pub mod error;
pub mod filter;
pub mod report;
pub mod status;
pub mod store;
pub mod types;

pub use error::RecordsError;
pub use filter::{RecordFilter, SortOrder, UrgencyCounts};
pub use report::{DailyCount, PainCount, Report, ReportGenerator, ReportRange, SymptomFrequency};
pub use status::{can_transition, validate_transition};
pub use store::RecordStore;
pub use types::{RecordStatus, TriageRecord};
