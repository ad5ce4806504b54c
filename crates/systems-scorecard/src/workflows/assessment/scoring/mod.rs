//! Complexity scoring for questionnaire answers.
//!
//! Five category sub-scores are computed independently and capped, then the
//! logged adjustments are added on top. The result is a 0-100 score, a tier
//! and a breakdown explaining how the number was reached. Every threshold in
//! this module is a fixed contract value.

mod consistency;
mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::answers::QuestionnaireAnswers;

pub const BUSINESS_SNAPSHOT_MAX: f64 = 25.0;
pub const SYSTEM_PERFORMANCE_MAX: f64 = 30.0;
pub const PAIN_POINTS_MAX: f64 = 25.0;
pub const REPORTING_DECISIONS_MAX: f64 = 15.0;
pub const VISION_PRIORITIES_MAX: f64 = 5.0;
pub const SCORE_MAX: f64 = 100.0;

/// Highest score still classified as [`ComplexityTier::Low`].
pub const LOW_TIER_CEILING: f64 = 25.0;
/// Highest score still classified as [`ComplexityTier::Medium`].
pub const MEDIUM_TIER_CEILING: f64 = 79.0;

/// Coarse classification of a complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    pub fn from_score(score: f64) -> Self {
        if score <= LOW_TIER_CEILING {
            ComplexityTier::Low
        } else if score <= MEDIUM_TIER_CEILING {
            ComplexityTier::Medium
        } else {
            ComplexityTier::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ComplexityTier::Low => "Low",
            ComplexityTier::Medium => "Medium",
            ComplexityTier::High => "High",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(ComplexityTier::Low),
            "medium" => Some(ComplexityTier::Medium),
            "high" => Some(ComplexityTier::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Penalty,
    Bonus,
    Warning,
}

/// Named point modifier applied after the capped sub-scores are summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringAdjustment {
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub category: String,
    pub description: String,
    pub impact: f64,
    pub reason: String,
}

/// Consistency checks only ever warn; they never block scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
}

/// Non-blocking flag raised when two answers look mutually inconsistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub severity: IssueSeverity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_responses: Vec<String>,
    /// Set on sanity checks that are reported alongside the score; always zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<f64>,
}

/// Per-category contributions and the audit trail behind a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub business_snapshot: f64,
    pub system_performance: f64,
    pub pain_points: f64,
    pub reporting_decisions: f64,
    pub vision_priorities: f64,
    pub adjustments: Vec<ScoringAdjustment>,
    pub validation_issues: Vec<ValidationIssue>,
    pub original_score: f64,
    pub adjusted_score: f64,
}

impl ScoreBreakdown {
    pub fn adjustment_total(&self) -> f64 {
        self.adjustments.iter().map(|adjustment| adjustment.impact).sum()
    }
}

/// Output of [`compute_score`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub tier: ComplexityTier,
    pub breakdown: ScoreBreakdown,
}

/// Score a set of answers. Total over any input: missing answers contribute nothing.
pub fn compute_score(answers: &QuestionnaireAnswers) -> ScoreResult {
    let (categories, adjustments) = rules::score_categories(answers);
    let validation_issues = consistency::review(answers, &categories);

    let original_score = categories.total();
    let adjustment_total: f64 = adjustments.iter().map(|adjustment| adjustment.impact).sum();
    let adjusted_score = (original_score + adjustment_total).max(0.0);
    let score = round_to_tenth(adjusted_score.min(SCORE_MAX));
    let tier = ComplexityTier::from_score(score);

    debug!(
        score,
        tier = tier.label(),
        adjustments = adjustments.len(),
        warnings = validation_issues.len(),
        "complexity score computed"
    );

    ScoreResult {
        score,
        tier,
        breakdown: ScoreBreakdown {
            business_snapshot: categories.business_snapshot,
            system_performance: categories.system_performance,
            pain_points: categories.pain_points,
            reporting_decisions: categories.reporting_decisions,
            vision_priorities: categories.vision_priorities,
            adjustments,
            validation_issues,
            original_score,
            adjusted_score,
        },
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
