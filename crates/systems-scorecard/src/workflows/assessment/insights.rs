use serde::{Deserialize, Serialize};

use super::answers::{QuestionnaireAnswers, TeamSize};
use super::scoring::{ComplexityTier, ScoreResult};

/// Follow-up material generated from a scored assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInsights {
    pub summary: String,
    pub talking_points: Vec<String>,
    pub key_findings: Vec<String>,
}

pub fn generate_insights(answers: &QuestionnaireAnswers, result: &ScoreResult) -> AssessmentInsights {
    AssessmentInsights {
        summary: tier_summary(result.tier).to_string(),
        talking_points: talking_points(answers, result.tier),
        key_findings: key_findings(answers, result),
    }
}

pub const fn tier_summary(tier: ComplexityTier) -> &'static str {
    match tier {
        ComplexityTier::Low => {
            "You have a solid base. With a few focused tweaks, you can make things smoother without major changes."
        }
        ComplexityTier::Medium => {
            "Your systems are working, but some parts are creating friction. A few practical fixes will unlock easier, faster workflows."
        }
        ComplexityTier::High => {
            "Your setup has grown complex. A guided clean-up and simple structure will reduce effort and make day-to-day work easier."
        }
    }
}

const fn efficiency_band(tier: ComplexityTier) -> &'static str {
    match tier {
        ComplexityTier::Low => "5-15%",
        ComplexityTier::Medium => "15-25%",
        ComplexityTier::High => "25-40%",
    }
}

fn automation_hours_band(team_size: Option<TeamSize>) -> &'static str {
    match team_size {
        Some(TeamSize::Large) => "20-30",
        Some(TeamSize::Medium) => "15-25",
        _ => "10-15",
    }
}

/// Short sales notes used when following up with the prospect.
pub fn talking_points(answers: &QuestionnaireAnswers, tier: ComplexityTier) -> Vec<String> {
    let mut points = vec![format!(
        "{} efficiency improvement potential",
        efficiency_band(tier)
    )];

    if answers.pain_points.uses_manual_workarounds() {
        let processes: Vec<&str> = answers
            .pain_points
            .time_consuming_processes
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        let hours = automation_hours_band(answers.business_snapshot.team_size);
        if processes.is_empty() {
            points.push(format!("{hours} hours/week automation opportunity"));
        } else {
            points.push(format!(
                "{hours} hours/week automation opportunity in {}",
                processes.join(", ")
            ));
        }
    }

    if let Some(confidence) = answers
        .reporting_decisions
        .confidence()
        .filter(|confidence| *confidence <= 2)
    {
        points.push(format!(
            "2-3x faster decision-making potential (current data confidence: {confidence}/5)"
        ));
    }

    if answers.pain_points.growth_constrained() {
        points.push("Growth scaling optimization needed".to_string());
    }

    points
}

pub fn key_findings(answers: &QuestionnaireAnswers, result: &ScoreResult) -> Vec<String> {
    let snapshot = &answers.business_snapshot;
    let industry = snapshot
        .industry
        .iter()
        .next()
        .map(String::as_str)
        .unwrap_or("Unknown");
    let team = snapshot
        .team_size
        .map(|size| size.label().to_lowercase())
        .unwrap_or_else(|| "unknown team size".to_string());

    let mut findings = vec![
        format!(
            "System complexity rated as {} with {}/100 complexity points",
            result.tier.label(),
            result.score
        ),
        format!(
            "{industry} business with {team} managing {} systems",
            snapshot.systems_count.unwrap_or(0)
        ),
    ];

    if answers.pain_points.uses_manual_workarounds() {
        findings.push("Manual workarounds present - automation opportunities identified".to_string());
    }

    if let Some(confidence) = answers
        .reporting_decisions
        .confidence()
        .filter(|confidence| *confidence <= 2)
    {
        findings.push(format!(
            "Low data confidence ({confidence}/5) affecting decision-making"
        ));
    }

    if answers.pain_points.growth_constrained() {
        findings.push("Current systems may not support planned growth".to_string());
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::answers::YesNo;
    use crate::workflows::assessment::compute_score;

    #[test]
    fn talking_points_reflect_pain_points() {
        let mut answers = QuestionnaireAnswers::default();
        answers.business_snapshot.team_size = Some(TeamSize::Large);
        answers.pain_points.manual_workarounds = Some(YesNo::Yes);
        answers.pain_points.time_consuming_processes =
            ["Invoicing", "Data entry", "Scheduling"].map(String::from).into();
        answers.pain_points.support_growth = Some(YesNo::No);
        answers.reporting_decisions.data_confidence = Some(2);

        let points = talking_points(&answers, ComplexityTier::Medium);

        assert_eq!(
            points,
            vec![
                "15-25% efficiency improvement potential".to_string(),
                "20-30 hours/week automation opportunity in Data entry, Invoicing".to_string(),
                "2-3x faster decision-making potential (current data confidence: 2/5)".to_string(),
                "Growth scaling optimization needed".to_string(),
            ]
        );
    }

    #[test]
    fn key_findings_lead_with_the_score() {
        let mut answers = QuestionnaireAnswers::default();
        answers.business_snapshot.team_size = Some(TeamSize::Small);
        answers.business_snapshot.systems_count = Some(2);
        answers.business_snapshot.industry = ["Retail"].map(String::from).into();

        let result = compute_score(&answers);
        let findings = key_findings(&answers, &result);

        assert_eq!(
            findings[0],
            "System complexity rated as Low with 5/100 complexity points"
        );
        assert_eq!(
            findings[1],
            "Retail business with small team (1-5) managing 2 systems"
        );
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn insights_bundle_tier_summary() {
        let answers = QuestionnaireAnswers::default();
        let result = compute_score(&answers);

        let insights = generate_insights(&answers, &result);

        assert_eq!(insights.summary, tier_summary(ComplexityTier::Low));
        assert_eq!(insights.talking_points.len(), 1);
    }
}
