use super::super::answers::{
    BusinessSnapshot, Criticality, PainPoints, QuestionnaireAnswers, ReportFrequency,
    ReportingDecisions, SystemPerformance, TeamSize, VisionPriorities,
};
use super::{
    AdjustmentKind, ScoringAdjustment, BUSINESS_SNAPSHOT_MAX, PAIN_POINTS_MAX,
    REPORTING_DECISIONS_MAX, SYSTEM_PERFORMANCE_MAX, VISION_PRIORITIES_MAX,
};

/// Capped contribution of each questionnaire category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct CategoryScores {
    pub business_snapshot: f64,
    pub system_performance: f64,
    pub pain_points: f64,
    pub reporting_decisions: f64,
    pub vision_priorities: f64,
}

impl CategoryScores {
    pub fn total(&self) -> f64 {
        self.business_snapshot
            + self.system_performance
            + self.pain_points
            + self.reporting_decisions
            + self.vision_priorities
    }
}

pub(crate) fn score_categories(
    answers: &QuestionnaireAnswers,
) -> (CategoryScores, Vec<ScoringAdjustment>) {
    let mut adjustments = Vec::new();

    let scores = CategoryScores {
        business_snapshot: score_business(&answers.business_snapshot),
        system_performance: score_performance(&answers.system_performance),
        pain_points: score_pain_points(&answers.pain_points, &mut adjustments),
        reporting_decisions: score_reporting(&answers.reporting_decisions, &mut adjustments),
        vision_priorities: score_vision(&answers.vision_priorities),
    };

    (scores, adjustments)
}

fn team_size_points(team_size: TeamSize) -> f64 {
    match team_size {
        TeamSize::Small => 3.0,
        TeamSize::Growing => 6.0,
        TeamSize::Medium => 9.0,
        TeamSize::Large => 12.0,
    }
}

// Zero systems is treated like an unanswered count.
fn systems_count_points(count: u32) -> f64 {
    match count {
        0 => 0.0,
        1..=3 => 2.0,
        4..=7 => 5.0,
        8..=15 => 8.0,
        _ => 11.0,
    }
}

fn scaled_count(count: usize, per_item: f64, ceiling: f64) -> f64 {
    (count as f64 * per_item).min(ceiling)
}

pub(crate) fn score_business(snapshot: &BusinessSnapshot) -> f64 {
    let mut score = snapshot.team_size.map(team_size_points).unwrap_or(0.0);
    score += snapshot.systems_count.map(systems_count_points).unwrap_or(0.0);
    score += scaled_count(snapshot.system_areas.len(), 0.5, 2.0);
    score.min(BUSINESS_SNAPSHOT_MAX)
}

/// Lower ratings mean more complexity: an average of 5 scores 6, an average of 1 scores 30.
pub(crate) fn score_performance(performance: &SystemPerformance) -> f64 {
    match performance.average() {
        Some(average) => ((6.0 - average) * 6.0).round().min(SYSTEM_PERFORMANCE_MAX),
        None => 0.0,
    }
}

pub(crate) fn score_pain_points(
    pain_points: &PainPoints,
    adjustments: &mut Vec<ScoringAdjustment>,
) -> f64 {
    let mut score = 0.0;

    if pain_points.uses_manual_workarounds() {
        score += 10.0;
        adjustments.push(ScoringAdjustment {
            kind: AdjustmentKind::Penalty,
            category: "Manual Workarounds".to_string(),
            description: "Manual workarounds indicate system gaps that increase operational complexity"
                .to_string(),
            impact: 2.0,
            reason: "Manual processes significantly reduce efficiency".to_string(),
        });
    }

    match pain_points.critical_to_fix {
        Some(Criticality::High) => {
            score += 8.0;
            adjustments.push(ScoringAdjustment {
                kind: AdjustmentKind::Penalty,
                category: "Critical Fixes Needed".to_string(),
                description: "Critical system fixes indicate urgent complexity issues".to_string(),
                impact: 2.0,
                reason: "Critical fixes represent immediate operational risk".to_string(),
            });
        }
        Some(Criticality::Medium) => score += 4.0,
        Some(Criticality::Low) => score += 1.0,
        None => {}
    }

    if pain_points.growth_constrained() {
        score += 7.0;
        adjustments.push(ScoringAdjustment {
            kind: AdjustmentKind::Penalty,
            category: "Growth Constraints".to_string(),
            description: "Systems that don't support growth create scaling complexity".to_string(),
            impact: 1.0,
            reason: "Growth limitations affect strategic capability".to_string(),
        });
    }

    score += scaled_count(pain_points.time_consuming_processes.len(), 0.5, 2.0);
    score += scaled_count(pain_points.biggest_frustrations.len(), 0.25, 1.0);

    score.min(PAIN_POINTS_MAX)
}

fn frequency_points(frequency: ReportFrequency) -> f64 {
    match frequency {
        ReportFrequency::NotAtAll => 6.0,
        ReportFrequency::Yearly => 5.0,
        ReportFrequency::Quarterly => 4.0,
        ReportFrequency::Monthly => 2.0,
        ReportFrequency::Weekly => 1.0,
        ReportFrequency::Daily => 0.0,
    }
}

/// Penalty tier for a data-confidence rating, if any applies.
pub(crate) fn confidence_penalty(confidence: f64) -> Option<ScoringAdjustment> {
    let (impact, description, reason) = if confidence <= 2.0 {
        (
            3.0,
            "Unreliable data significantly impacts decision-making capability",
            "Data confidence rated 1-2/5 indicates unreliable data requiring immediate attention",
        )
    } else if confidence <= 3.0 {
        (
            1.5,
            "Partially trusted data creates decision-making uncertainty",
            "Data confidence rated 3/5 indicates partially trusted data affecting strategic decisions",
        )
    } else if confidence <= 3.5 {
        (
            0.75,
            "Inconsistent data quality creates operational complexity",
            "Data confidence between 3-3.5/5 indicates inconsistent data quality",
        )
    } else {
        return None;
    };

    Some(ScoringAdjustment {
        kind: AdjustmentKind::Penalty,
        category: "Data Confidence Penalty".to_string(),
        description: description.to_string(),
        impact,
        reason: reason.to_string(),
    })
}

/// The confidence penalty counts inside the category cap and again as a logged adjustment.
pub(crate) fn score_reporting(
    reporting: &ReportingDecisions,
    adjustments: &mut Vec<ScoringAdjustment>,
) -> f64 {
    let mut score = reporting
        .least_frequent()
        .map(frequency_points)
        .unwrap_or(0.0);

    if let Some(confidence) = reporting.confidence() {
        let confidence = f64::from(confidence);
        score += (6.0 - confidence) * 1.5;

        if let Some(penalty) = confidence_penalty(confidence) {
            score += penalty.impact;
            adjustments.push(penalty);
        }
    }

    if reporting.tracking_methods.len() > 3 {
        score += 1.5;
    }

    score.round().min(REPORTING_DECISIONS_MAX)
}

pub(crate) fn score_vision(vision: &VisionPriorities) -> f64 {
    let score = scaled_count(vision.desired_outcomes.len(), 0.5, 3.0)
        + scaled_count(vision.business_impact.len(), 0.3, 2.0);
    score.min(VISION_PRIORITIES_MAX)
}
