use super::super::answers::{Criticality, QuestionnaireAnswers};
use super::rules::CategoryScores;
use super::{IssueSeverity, ValidationIssue};

const STRONG_PERFORMANCE: f64 = 4.0;
const CONTRADICTORY_PERFORMANCE: f64 = 4.5;
const CONTRADICTORY_PAIN_SCORE: f64 = 15.0;
const LOW_CONFIDENCE: u8 = 2;
const MANY_SYSTEMS: u32 = 10;

/// Flag answers that contradict each other. Never changes the score.
pub(crate) fn review(
    answers: &QuestionnaireAnswers,
    categories: &CategoryScores,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let average = answers.system_performance.average();
    let pain_points = &answers.pain_points;
    let reporting = &answers.reporting_decisions;

    if let Some(average) = average.filter(|average| *average >= STRONG_PERFORMANCE) {
        let mut signals = Vec::new();
        if pain_points.uses_manual_workarounds() {
            signals.push("Manual workarounds needed");
        }
        if pain_points.critical_to_fix == Some(Criticality::High) {
            signals.push("Critical fixes needed");
        }
        if pain_points.growth_constrained() {
            signals.push("Systems don't support growth");
        }

        if !signals.is_empty() {
            issues.push(ValidationIssue {
                severity: IssueSeverity::Warning,
                title: "Potential Response Inconsistency".to_string(),
                description: "System performance was rated highly but significant pain points were reported."
                    .to_string(),
                conflicting_responses: vec![
                    format!("Average system performance: {average:.1}/5"),
                    format!("Pain points: {}", signals.join(", ")),
                ],
                impact: None,
            });
        }
    }

    if let Some(confidence) = reporting.confidence() {
        if confidence <= LOW_CONFIDENCE && reporting.reports_frequently() {
            let cadence: Vec<_> = reporting
                .report_frequency
                .iter()
                .map(|frequency| frequency.label())
                .collect();
            issues.push(ValidationIssue {
                severity: IssueSeverity::Warning,
                title: "Data Confidence vs Reporting Frequency".to_string(),
                description: "Reports are produced frequently from data that is not trusted, which points to data quality issues."
                    .to_string(),
                conflicting_responses: vec![
                    format!("Data confidence: {confidence}/5"),
                    format!("Reporting frequency: {}", cadence.join(", ")),
                ],
                impact: None,
            });
        }
    }

    let systems_count = answers.business_snapshot.systems_count.unwrap_or(0);
    if let Some(average) = average.filter(|average| *average >= STRONG_PERFORMANCE) {
        if systems_count > MANY_SYSTEMS {
            issues.push(ValidationIssue {
                severity: IssueSeverity::Warning,
                title: "System Complexity vs Performance".to_string(),
                description: "Keeping many systems performing well is unusual; some ratings may be optimistic."
                    .to_string(),
                conflicting_responses: vec![
                    format!("Number of systems: {systems_count}"),
                    format!("Average performance rating: {average:.1}/5"),
                ],
                impact: None,
            });
        }
    }

    if let Some(average) = average.filter(|average| *average >= CONTRADICTORY_PERFORMANCE) {
        if categories.pain_points >= CONTRADICTORY_PAIN_SCORE {
            issues.push(ValidationIssue {
                severity: IssueSeverity::Warning,
                title: "Contradictory Results Detected".to_string(),
                description: "High performance ratings conflict with a high pain point score."
                    .to_string(),
                conflicting_responses: vec![
                    format!("Average performance rating: {average:.1}/5"),
                    format!("Pain points score: {:.1}", categories.pain_points),
                ],
                impact: Some(0.0),
            });
        }
    }

    issues
}
