use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Lowest and highest value accepted on every 1-5 rating scale.
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Ratings outside the 1-5 scale are treated as unanswered.
pub(crate) fn valid_rating(value: Option<u8>) -> Option<u8> {
    value.filter(|rating| (RATING_MIN..=RATING_MAX).contains(rating))
}

/// Full set of answers collected from one respondent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireAnswers {
    pub business_snapshot: BusinessSnapshot,
    pub system_performance: SystemPerformance,
    pub pain_points: PainPoints,
    pub reporting_decisions: ReportingDecisions,
    pub vision_priorities: VisionPriorities,
}

/// Team size bands offered by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamSize {
    #[serde(rename = "Small Team (1-5)")]
    Small,
    #[serde(rename = "Growing Team (6-20)")]
    Growing,
    #[serde(rename = "Medium Team (21-50)")]
    Medium,
    #[serde(rename = "Large Team (50+)")]
    Large,
}

impl TeamSize {
    pub const fn label(self) -> &'static str {
        match self {
            TeamSize::Small => "Small Team (1-5)",
            TeamSize::Growing => "Growing Team (6-20)",
            TeamSize::Medium => "Medium Team (21-50)",
            TeamSize::Large => "Large Team (50+)",
        }
    }
}

/// Company shape and footprint of the systems in use.
///
/// `industry`, `top_clients` and `top_three_areas` are collected for context
/// and never scored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessSnapshot {
    pub industry: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_clients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<TeamSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systems_count: Option<u32>,
    pub system_areas: BTreeSet<String>,
    pub business_areas: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_three_areas: Option<String>,
}

/// Seven 1-5 ratings of how well current systems perform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPerformance {
    #[serde(rename = "q0", skip_serializing_if = "Option::is_none")]
    pub ease_of_use: Option<u8>,
    #[serde(rename = "q1", skip_serializing_if = "Option::is_none")]
    pub workflow_efficiency: Option<u8>,
    #[serde(rename = "q2", skip_serializing_if = "Option::is_none")]
    pub data_accuracy_confidence: Option<u8>,
    #[serde(rename = "q3", skip_serializing_if = "Option::is_none")]
    pub reporting_timeliness: Option<u8>,
    #[serde(rename = "q4", skip_serializing_if = "Option::is_none")]
    pub integration_level: Option<u8>,
    #[serde(rename = "q5", skip_serializing_if = "Option::is_none")]
    pub automation_level: Option<u8>,
    #[serde(rename = "q6", skip_serializing_if = "Option::is_none")]
    pub team_satisfaction: Option<u8>,
}

impl SystemPerformance {
    pub const DIMENSIONS: usize = 7;

    /// Raw answers in questionnaire order, including unanswered slots.
    pub fn ratings(&self) -> [Option<u8>; Self::DIMENSIONS] {
        [
            self.ease_of_use,
            self.workflow_efficiency,
            self.data_accuracy_confidence,
            self.reporting_timeliness,
            self.integration_level,
            self.automation_level,
            self.team_satisfaction,
        ]
    }

    /// Ratings that fall on the 1-5 scale.
    pub fn answered(&self) -> impl Iterator<Item = u8> {
        self.ratings().into_iter().filter_map(valid_rating)
    }

    /// Mean of the answered ratings, `None` when nothing usable was provided.
    pub fn average(&self) -> Option<f64> {
        let (sum, count) = self
            .answered()
            .fold((0u32, 0u32), |(sum, count), rating| {
                (sum + u32::from(rating), count + 1)
            });
        if count == 0 {
            None
        } else {
            Some(f64::from(sum) / f64::from(count))
        }
    }
}

/// Binary questionnaire answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

/// How urgently the respondent needs current issues fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Low,
    Medium,
    High,
}

/// Friction the respondent experiences with current systems.
///
/// The free-text answers and `affected_areas` are kept for sales follow-up only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PainPoints {
    pub time_consuming_processes: BTreeSet<String>,
    pub biggest_frustrations: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_frustrations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent_frustration: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub affected_areas: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_workarounds: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workarounds_description: Option<String>,
    /// Only meaningful when `manual_workarounds` is yes.
    #[serde(rename = "criticalToFix", skip_serializing_if = "Option::is_none")]
    pub critical_to_fix: Option<Criticality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_growth: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_challenges: Option<String>,
}

impl PainPoints {
    pub fn uses_manual_workarounds(&self) -> bool {
        self.manual_workarounds == Some(YesNo::Yes)
    }

    pub fn growth_constrained(&self) -> bool {
        self.support_growth == Some(YesNo::No)
    }
}

/// Reporting cadences; ordered from most to least frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReportFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    #[serde(rename = "Not at all")]
    NotAtAll,
}

impl ReportFrequency {
    pub const fn label(self) -> &'static str {
        match self {
            ReportFrequency::Daily => "Daily",
            ReportFrequency::Weekly => "Weekly",
            ReportFrequency::Monthly => "Monthly",
            ReportFrequency::Quarterly => "Quarterly",
            ReportFrequency::Yearly => "Yearly",
            ReportFrequency::NotAtAll => "Not at all",
        }
    }
}

/// How the business tracks performance and how much it trusts the numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportingDecisions {
    pub tracking_methods: BTreeSet<String>,
    pub critical_reports: BTreeSet<String>,
    pub report_frequency: BTreeSet<ReportFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_confidence: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement_needs: Option<String>,
}

impl ReportingDecisions {
    /// The least frequent cadence selected, which drives the reporting score.
    pub fn least_frequent(&self) -> Option<ReportFrequency> {
        self.report_frequency.iter().next_back().copied()
    }

    pub fn reports_frequently(&self) -> bool {
        self.report_frequency.contains(&ReportFrequency::Daily)
            || self.report_frequency.contains(&ReportFrequency::Weekly)
    }

    pub fn confidence(&self) -> Option<u8> {
        valid_rating(self.data_confidence)
    }
}

/// Outcomes the respondent hopes to reach. Three outcomes are suggested, not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionPriorities {
    pub desired_outcomes: BTreeSet<String>,
    pub business_impact: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_definition: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_questionnaire_field_names() {
        let answers: QuestionnaireAnswers = serde_json::from_value(json!({
            "businessSnapshot": {
                "teamSize": "Growing Team (6-20)",
                "systemsCount": 6,
                "systemAreas": ["CRM", "Accounting", "CRM"]
            },
            "systemPerformance": { "q0": 3, "q6": 4 },
            "painPoints": { "manualWorkarounds": "yes", "criticalToFix": "medium" },
            "reportingDecisions": { "reportFrequency": ["Weekly", "Not at all"], "dataConfidence": 2 },
            "visionPriorities": {}
        }))
        .expect("answers parse");

        assert_eq!(answers.business_snapshot.team_size, Some(TeamSize::Growing));
        assert_eq!(answers.business_snapshot.system_areas.len(), 2);
        assert_eq!(answers.system_performance.average(), Some(3.5));
        assert_eq!(answers.pain_points.critical_to_fix, Some(Criticality::Medium));
        assert_eq!(
            answers.reporting_decisions.least_frequent(),
            Some(ReportFrequency::NotAtAll)
        );
    }

    #[test]
    fn empty_sections_deserialize_to_defaults() {
        let answers: QuestionnaireAnswers = serde_json::from_value(json!({
            "businessSnapshot": {},
            "systemPerformance": {},
            "painPoints": {},
            "reportingDecisions": {},
            "visionPriorities": {}
        }))
        .expect("answers parse");

        assert_eq!(answers, QuestionnaireAnswers::default());
    }

    #[test]
    fn free_text_answers_survive_a_round_trip() {
        let submitted = json!({
            "businessSnapshot": { "topThreeAreas": "Sales, stock, payroll" },
            "systemPerformance": {},
            "painPoints": {
                "topFrustrations": "Double entry",
                "urgentFrustration": "Month-end close",
                "affectedAreas": ["Finance"],
                "workaroundsDescription": "Shared spreadsheets",
                "growthReason": "Hiring",
                "growthChallenges": "Cannot onboard new staff"
            },
            "reportingDecisions": { "improvementNeeds": "Live margin view" },
            "visionPriorities": { "successDefinition": "Close the books in two days" }
        });
        let answers: QuestionnaireAnswers =
            serde_json::from_value(submitted.clone()).expect("answers parse");

        let stored = serde_json::to_value(&answers).expect("answers serialize");
        for pointer in [
            "/businessSnapshot/topThreeAreas",
            "/painPoints/topFrustrations",
            "/painPoints/urgentFrustration",
            "/painPoints/affectedAreas",
            "/painPoints/workaroundsDescription",
            "/painPoints/growthReason",
            "/painPoints/growthChallenges",
            "/reportingDecisions/improvementNeeds",
            "/visionPriorities/successDefinition",
        ] {
            assert_eq!(stored.pointer(pointer), submitted.pointer(pointer), "{pointer}");
        }
        assert_eq!(
            answers.pain_points.growth_challenges.as_deref(),
            Some("Cannot onboard new staff")
        );
    }

    #[test]
    fn out_of_range_ratings_are_ignored_in_average() {
        let performance = SystemPerformance {
            ease_of_use: Some(0),
            workflow_efficiency: Some(9),
            team_satisfaction: Some(2),
            ..SystemPerformance::default()
        };
        assert_eq!(performance.average(), Some(2.0));
        assert_eq!(SystemPerformance::default().average(), None);
    }
}
