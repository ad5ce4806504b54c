use std::io::Write;

use serde::Serialize;

use super::domain::LeadRecord;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode leads as CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write CSV export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct LeadCsvRow<'a> {
    id: &'a str,
    submitted_at: String,
    prospect_name: &'a str,
    prospect_email: &'a str,
    score: f64,
    tier: &'static str,
    status: &'static str,
    team_size: &'static str,
    systems_count: Option<u32>,
    business_snapshot: f64,
    system_performance: f64,
    pain_points: f64,
    reporting_decisions: f64,
    vision_priorities: f64,
    adjustments: String,
    validation_issues: String,
    tracking_id: Option<&'a str>,
}

impl<'a> LeadCsvRow<'a> {
    fn from_record(record: &'a LeadRecord) -> Self {
        let breakdown = &record.breakdown;
        let adjustments = breakdown
            .adjustments
            .iter()
            .map(|adjustment| format!("{} (+{})", adjustment.category, adjustment.impact))
            .collect::<Vec<_>>()
            .join("; ");
        let validation_issues = breakdown
            .validation_issues
            .iter()
            .map(|issue| issue.title.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            id: &record.id.0,
            submitted_at: record.submitted_at.to_rfc3339(),
            prospect_name: &record.prospect_name,
            prospect_email: &record.prospect_email,
            score: record.score,
            tier: record.tier.label(),
            status: record.status.label(),
            team_size: record
                .answers
                .business_snapshot
                .team_size
                .map(|size| size.label())
                .unwrap_or(""),
            systems_count: record.answers.business_snapshot.systems_count,
            business_snapshot: breakdown.business_snapshot,
            system_performance: breakdown.system_performance,
            pain_points: breakdown.pain_points,
            reporting_decisions: breakdown.reporting_decisions,
            vision_priorities: breakdown.vision_priorities,
            adjustments,
            validation_issues,
            tracking_id: record
                .tracking
                .as_ref()
                .and_then(|tracking| tracking.tracking_id.as_deref()),
        }
    }
}

/// Write one CSV row per lead, with a header row. Returns the number of leads written.
pub fn write_csv<W: Write>(records: &[LeadRecord], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(LeadCsvRow::from_record(record))?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}
