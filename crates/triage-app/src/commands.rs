//! Record and report subcommands.

use std::path::Path;

use chrono::Utc;
use tracing::info;
use triage_core::{Result, TriageConfig, TriageError, Urgency};
use triage_records::{
    RecordFilter, RecordStore, ReportGenerator, ReportRange, SortOrder, TriageRecord,
    UrgencyCounts,
};

/// Open the records file, seeding demo records into an empty store when
/// `records.seed_mock_data` is set.
pub fn open_store(config: &TriageConfig) -> Result<RecordStore> {
    let path = config.records_path();
    let mut store = RecordStore::load_or_default(&path)?;
    if store.is_empty() && config.records.seed_mock_data {
        store = RecordStore::with_mock_data(config.records.mock_record_count, Utc::now());
        store.save(&path)?;
        info!(count = store.len(), "Seeded empty records file with demo data");
    }
    Ok(store)
}

/// One listing line per record.
pub fn format_record_line(record: &TriageRecord) -> String {
    format!(
        "{}  {}  {:<6}  {:<15}  {} ({})  {}",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.urgency.label(),
        record.status,
        record.patient_name,
        record.age,
        record.symptoms.join(", "),
    )
}

/// Stat-card line, most urgent first.
pub fn format_counts(counts: &UrgencyCounts) -> String {
    let mut out = String::new();
    for urgency in Urgency::DESCENDING {
        out.push_str(&format!("{}: {}  ", urgency.label(), counts.get(urgency)));
    }
    out.push_str(&format!("(total {})", counts.total()));
    out
}

pub fn list_records(config: &TriageConfig, filter: &RecordFilter, order: SortOrder) -> Result<()> {
    let store = open_store(config)?;
    let matched = filter.apply(store.list(), order);

    for record in &matched {
        println!("{}", format_record_line(record));
    }
    if matched.is_empty() {
        println!("No triage records found.");
    }
    println!();
    println!("{}", format_counts(&UrgencyCounts::from_records(matched.iter().copied())));
    Ok(())
}

pub fn update_status(
    config: &TriageConfig,
    id: uuid::Uuid,
    status: triage_records::RecordStatus,
) -> Result<()> {
    let path = config.records_path();
    let mut store = RecordStore::load_or_default(&path)?;
    let record = store.update_status(id, status, Utc::now())?;
    println!("{}", format_record_line(record));
    store.save(&path)?;
    Ok(())
}

/// Report window from the flag, falling back to `reports.default_range`.
pub fn resolve_range(config: &TriageConfig, flag: Option<ReportRange>) -> Result<ReportRange> {
    match flag {
        Some(range) => Ok(range),
        None => Ok(config.reports.default_range.parse::<ReportRange>()?),
    }
}

pub fn report(config: &TriageConfig, range: ReportRange, output: Option<&Path>) -> Result<()> {
    let store = open_store(config)?;
    let report =
        ReportGenerator::from_config(&config.reports).generate(store.list(), range, Utc::now());
    let json = report.to_json_pretty()?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)?;
            info!(
                period = %range,
                total = report.total,
                "Report written to {}",
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn seed(config: &TriageConfig, count: Option<usize>) -> Result<()> {
    let count = count.unwrap_or(config.records.mock_record_count);
    if count == 0 {
        return Err(TriageError::InvalidInput("seed count must be at least 1".to_string()));
    }

    let path = config.records_path();
    let mut store = RecordStore::load_or_default(&path)?;
    for record in RecordStore::with_mock_data(count, Utc::now()).list() {
        store.insert(record.clone());
    }
    store.save(&path)?;
    println!("Added {} demo records ({} total) to {}", count, store.len(), path.display());
    Ok(())
}
