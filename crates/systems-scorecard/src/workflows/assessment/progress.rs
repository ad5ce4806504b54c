use serde::{Deserialize, Serialize};

use super::answers::{QuestionnaireAnswers, SystemPerformance};

/// Questionnaire sections in the order respondents complete them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionnaireSection {
    BusinessSnapshot,
    SystemPerformance,
    PainPoints,
    ReportingDecisions,
    VisionPriorities,
}

impl QuestionnaireSection {
    pub const ALL: [QuestionnaireSection; 5] = [
        QuestionnaireSection::BusinessSnapshot,
        QuestionnaireSection::SystemPerformance,
        QuestionnaireSection::PainPoints,
        QuestionnaireSection::ReportingDecisions,
        QuestionnaireSection::VisionPriorities,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            QuestionnaireSection::BusinessSnapshot => "Business & Systems",
            QuestionnaireSection::SystemPerformance => "System Performance",
            QuestionnaireSection::PainPoints => "Pain Points & Friction",
            QuestionnaireSection::ReportingDecisions => "Reporting & Decisions",
            QuestionnaireSection::VisionPriorities => "Vision & Priorities",
        }
    }

    pub const fn estimated_minutes(self) -> u32 {
        match self {
            QuestionnaireSection::BusinessSnapshot => 5,
            QuestionnaireSection::SystemPerformance => 3,
            QuestionnaireSection::PainPoints => 2,
            QuestionnaireSection::ReportingDecisions => 3,
            QuestionnaireSection::VisionPriorities => 2,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

/// Answers still required before the respondent may leave `section`.
pub fn missing_requirements(
    section: QuestionnaireSection,
    answers: &QuestionnaireAnswers,
) -> Vec<String> {
    let mut missing = Vec::new();

    match section {
        QuestionnaireSection::BusinessSnapshot => {
            let snapshot = &answers.business_snapshot;
            if snapshot.team_size.is_none() {
                missing.push("Please select your team size".to_string());
            }
            if snapshot.system_areas.is_empty() {
                missing.push("Please select at least one digital system".to_string());
            }
        }
        QuestionnaireSection::SystemPerformance => {
            if answers.system_performance.answered().count() < SystemPerformance::DIMENSIONS {
                missing.push(format!(
                    "Please rate all {} performance areas",
                    SystemPerformance::DIMENSIONS
                ));
            }
        }
        QuestionnaireSection::PainPoints => {
            let pain_points = &answers.pain_points;
            if pain_points.manual_workarounds.is_none() {
                missing.push("Please indicate if you use manual workarounds".to_string());
            }
            if pain_points.support_growth.is_none() {
                missing
                    .push("Please indicate if your systems help grow your business".to_string());
            }
        }
        QuestionnaireSection::ReportingDecisions => {
            let reporting = &answers.reporting_decisions;
            if reporting.tracking_methods.is_empty() {
                missing.push("Please select at least one tracking method".to_string());
            }
            if reporting.confidence().is_none() {
                missing.push("Please rate your confidence in data accuracy".to_string());
            }
        }
        QuestionnaireSection::VisionPriorities => {
            if answers.vision_priorities.desired_outcomes.is_empty() {
                missing.push("Please select at least one desired outcome".to_string());
            }
        }
    }

    missing
}

pub fn is_section_complete(section: QuestionnaireSection, answers: &QuestionnaireAnswers) -> bool {
    missing_requirements(section, answers).is_empty()
}

pub fn first_incomplete_section(answers: &QuestionnaireAnswers) -> Option<QuestionnaireSection> {
    QuestionnaireSection::ALL
        .into_iter()
        .find(|section| !is_section_complete(*section, answers))
}

/// True once every section satisfies its own requirements.
pub fn is_ready_for_scoring(answers: &QuestionnaireAnswers) -> bool {
    first_incomplete_section(answers).is_none()
}

/// Share of the section's questions that have an answer, as a whole percentage.
pub fn section_completion(section: QuestionnaireSection, answers: &QuestionnaireAnswers) -> u8 {
    let filled: Vec<bool> = match section {
        QuestionnaireSection::BusinessSnapshot => {
            let snapshot = &answers.business_snapshot;
            vec![
                !snapshot.industry.is_empty(),
                snapshot
                    .top_clients
                    .as_deref()
                    .is_some_and(|value| !value.trim().is_empty()),
                snapshot.team_size.is_some(),
                snapshot.systems_count.is_some_and(|count| count > 0),
                !snapshot.system_areas.is_empty(),
                !snapshot.business_areas.is_empty(),
            ]
        }
        QuestionnaireSection::SystemPerformance => answers
            .system_performance
            .ratings()
            .iter()
            .map(|rating| super::answers::valid_rating(*rating).is_some())
            .collect(),
        QuestionnaireSection::PainPoints => {
            let pain_points = &answers.pain_points;
            vec![
                !pain_points.time_consuming_processes.is_empty(),
                !pain_points.biggest_frustrations.is_empty(),
                pain_points.manual_workarounds.is_some(),
                pain_points.support_growth.is_some(),
            ]
        }
        QuestionnaireSection::ReportingDecisions => {
            let reporting = &answers.reporting_decisions;
            vec![
                !reporting.tracking_methods.is_empty(),
                !reporting.critical_reports.is_empty(),
                !reporting.report_frequency.is_empty(),
                reporting.confidence().is_some(),
            ]
        }
        QuestionnaireSection::VisionPriorities => {
            let vision = &answers.vision_priorities;
            vec![
                !vision.desired_outcomes.is_empty(),
                !vision.business_impact.is_empty(),
            ]
        }
    };

    let answered = filled.iter().filter(|value| **value).count();
    let total = filled.len().max(1);
    ((answered * 100) as f64 / total as f64).round() as u8
}

/// Minutes left in the sections after `current`.
pub fn estimated_minutes_remaining(current: QuestionnaireSection) -> u32 {
    QuestionnaireSection::ALL[current.index() + 1..]
        .iter()
        .map(|section| section.estimated_minutes())
        .sum()
}

pub fn time_remaining_label(current: QuestionnaireSection) -> String {
    match estimated_minutes_remaining(current) {
        0 => "Almost done!".to_string(),
        1 => "~1 minute remaining".to_string(),
        minutes => format!("~{minutes} minutes remaining"),
    }
}

/// Completion state of one section, as reported to the questionnaire UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProgress {
    pub section: QuestionnaireSection,
    pub title: String,
    pub completion: u8,
    pub complete: bool,
    pub missing: Vec<String>,
}

pub fn progress_report(answers: &QuestionnaireAnswers) -> Vec<SectionProgress> {
    QuestionnaireSection::ALL
        .into_iter()
        .map(|section| {
            let missing = missing_requirements(section, answers);
            SectionProgress {
                section,
                title: section.title().to_string(),
                completion: section_completion(section, answers),
                complete: missing.is_empty(),
                missing,
            }
        })
        .collect()
}
