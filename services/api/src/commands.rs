use crate::infra::{build_lead_service, ScorecardLeadService};
use clap::{Args, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use systems_scorecard::config::AppConfig;
use systems_scorecard::error::AppError;
use systems_scorecard::workflows::assessment::{
    compute_score, first_incomplete_section, generate_insights, progress_report,
    time_remaining_label, AssessmentInsights, ComplexityTier, DraftStore, JsonFileDraftStore,
    QuestionnaireAnswers, ScoreResult, ScoredAssessment,
};
use systems_scorecard::workflows::leads::{LeadFilter, LeadId, LeadStatus, LeadSubmission};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file containing questionnaire answers
    pub(crate) answers: PathBuf,
    /// Print the full result as JSON instead of a readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum LeadsCommand {
    /// Score an answers file and store it as a lead
    Submit(SubmitArgs),
    /// List stored leads, newest first
    List(ListArgs),
    /// Delete a stored lead
    Delete {
        /// Identifier printed by `leads submit` or `leads list`
        id: String,
    },
    /// Export stored leads as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// JSON file containing questionnaire answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Prospect name
    #[arg(long)]
    pub(crate) name: String,
    /// Prospect email address
    #[arg(long)]
    pub(crate) email: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Only show leads in this tier (Low, Medium, High)
    #[arg(long, value_parser = parse_tier)]
    pub(crate) tier: Option<ComplexityTier>,
    /// Only show leads with this status (e.g. "Proposal Sent")
    #[arg(long, value_parser = parse_status)]
    pub(crate) status: Option<LeadStatus>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Write the CSV to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum DraftCommand {
    /// Show section progress for the saved draft
    Show,
    /// Discard the saved draft
    Clear,
}

fn parse_tier(raw: &str) -> Result<ComplexityTier, String> {
    ComplexityTier::parse(raw).ok_or_else(|| format!("unknown tier '{raw}' (expected Low, Medium, or High)"))
}

fn parse_status(raw: &str) -> Result<LeadStatus, String> {
    LeadStatus::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = LeadStatus::ALL.iter().map(|status| status.label()).collect();
        format!("unknown status '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn read_answers(path: &Path) -> Result<QuestionnaireAnswers, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(io::BufReader::new(file))?)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let answers = read_answers(&args.answers)?;
    let result = compute_score(&answers);
    let insights = generate_insights(&answers, &result);

    if args.json {
        let payload = ScoredAssessment { result, insights };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        render_score(&result, &insights);
    }
    Ok(())
}

fn render_score(result: &ScoreResult, insights: &AssessmentInsights) {
    let breakdown = &result.breakdown;

    println!("Systems complexity scorecard");
    println!("Score: {}/100 ({} complexity)", result.score, result.tier.label());
    println!("{}", insights.summary);

    println!("\nCategory breakdown");
    for (label, value, max) in [
        ("Business & Systems", breakdown.business_snapshot, 25),
        ("System Performance", breakdown.system_performance, 30),
        ("Pain Points & Friction", breakdown.pain_points, 25),
        ("Reporting & Decisions", breakdown.reporting_decisions, 15),
        ("Vision & Priorities", breakdown.vision_priorities, 5),
    ] {
        println!("- {label}: {value}/{max}");
    }

    if breakdown.adjustments.is_empty() {
        println!("\nAdjustments: none");
    } else {
        println!(
            "\nAdjustments (original {}, adjusted {})",
            breakdown.original_score, breakdown.adjusted_score
        );
        for adjustment in &breakdown.adjustments {
            println!(
                "- {}: +{} ({})",
                adjustment.category, adjustment.impact, adjustment.reason
            );
        }
    }

    if !breakdown.validation_issues.is_empty() {
        println!("\nWarnings");
        for issue in &breakdown.validation_issues {
            println!("- {}: {}", issue.title, issue.description);
        }
    }

    println!("\nTalking points");
    for point in &insights.talking_points {
        println!("- {point}");
    }

    println!("\nKey findings");
    for finding in &insights.key_findings {
        println!("- {finding}");
    }
}

pub(crate) async fn run_leads(command: LeadsCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (service, worker) = build_lead_service(&config)?;

    let outcome = execute_leads(&service, command);

    drop(service);
    if let Some(worker) = worker {
        worker.finish().await;
    }
    outcome
}

fn execute_leads(service: &ScorecardLeadService, command: LeadsCommand) -> Result<(), AppError> {
    match command {
        LeadsCommand::Submit(args) => {
            let submission = LeadSubmission {
                prospect_name: args.name,
                prospect_email: args.email,
                answers: read_answers(&args.answers)?,
                tracking: None,
            };
            let record = service.submit(submission)?;
            println!(
                "Saved lead {} for {}: {}/100 ({})",
                record.id,
                record.prospect_name,
                record.score,
                record.tier.label()
            );
        }
        LeadsCommand::List(args) => {
            let filter = LeadFilter {
                tier: args.tier,
                status: args.status,
                ..LeadFilter::default()
            };
            let records = service.list(&filter)?;
            if records.is_empty() {
                println!("No leads found");
            }
            for summary in records.iter().map(|record| record.summary()) {
                let warnings = match summary.warnings {
                    0 => String::new(),
                    1 => "  (1 warning)".to_string(),
                    count => format!("  ({count} warnings)"),
                };
                println!(
                    "{}  {}  {} <{}>  {}/100 {}  {}{}",
                    summary.submitted_at.format("%Y-%m-%d %H:%M"),
                    summary.id,
                    summary.prospect_name,
                    summary.prospect_email,
                    summary.score,
                    summary.tier.label(),
                    summary.status.label(),
                    warnings
                );
            }
        }
        LeadsCommand::Delete { id } => {
            let id = LeadId(id);
            service.delete(&id)?;
            println!("Deleted lead {id}");
        }
        LeadsCommand::Export(args) => {
            let filter = LeadFilter::default();
            match args.output {
                Some(path) => {
                    let writer = BufWriter::new(File::create(&path)?);
                    let count = service.export_csv(&filter, writer)?;
                    eprintln!("Exported {count} leads to {}", path.display());
                }
                None => {
                    let mut handle = io::stdout().lock();
                    service.export_csv(&filter, &mut handle)?;
                    handle.flush()?;
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn run_draft(command: DraftCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = JsonFileDraftStore::new(&config.storage.draft_path);

    match command {
        DraftCommand::Show => {
            let Some(draft) = store.load()? else {
                println!("No saved draft at {}", store.path().display());
                return Ok(());
            };
            println!(
                "Draft saved {} (on section: {})",
                draft.saved_at.format("%Y-%m-%d %H:%M UTC"),
                draft.current_section.title()
            );
            for section in progress_report(&draft.answers) {
                let marker = if section.complete { "x" } else { " " };
                println!("[{marker}] {} {}%", section.title, section.completion);
                for requirement in &section.missing {
                    println!("      {requirement}");
                }
            }
            match first_incomplete_section(&draft.answers) {
                Some(_) => println!("{}", time_remaining_label(draft.current_section)),
                None => println!("Ready for scoring"),
            }
        }
        DraftCommand::Clear => {
            store.clear()?;
            println!("Cleared draft at {}", store.path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_and_status_flags_parse_labels() {
        assert_eq!(parse_tier("medium"), Ok(ComplexityTier::Medium));
        assert!(parse_tier("extreme").is_err());
        assert_eq!(parse_status("proposal sent"), Ok(LeadStatus::ProposalSent));
        let error = parse_status("archived").expect_err("unknown status");
        assert!(error.contains("Closed Lost"));
    }
}
