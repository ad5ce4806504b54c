use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::assessment::{ComplexityTier, QuestionnaireAnswers, ScoreBreakdown};

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl LeadId {
    pub fn generate() -> Self {
        Self(format!("lead_{}", uuid::Uuid::new_v4().simple()))
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Follow-up stage of a lead in the sales pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::ProposalSent,
        LeadStatus::ClosedWon,
        LeadStatus::ClosedLost,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::ProposalSent => "Proposal Sent",
            LeadStatus::ClosedWon => "Closed Won",
            LeadStatus::ClosedLost => "Closed Lost",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
    }
}

/// Campaign attribution captured from the link the prospect followed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackingContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
}

/// Prospect contact details plus the completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub prospect_name: String,
    pub prospect_email: String,
    pub answers: QuestionnaireAnswers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingContext>,
}

impl LeadSubmission {
    pub fn validate(&self) -> Result<(), LeadValidationError> {
        if self.prospect_name.trim().is_empty() {
            return Err(LeadValidationError::MissingName);
        }
        if !is_plausible_email(self.prospect_email.trim()) {
            return Err(LeadValidationError::InvalidEmail(
                self.prospect_email.clone(),
            ));
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadValidationError {
    #[error("prospect name is required")]
    MissingName,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Persisted lead: the answers together with the score they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub id: LeadId,
    pub prospect_name: String,
    pub prospect_email: String,
    pub answers: QuestionnaireAnswers,
    pub score: f64,
    pub tier: ComplexityTier,
    pub breakdown: ScoreBreakdown,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub talking_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingContext>,
}

impl LeadRecord {
    pub fn summary(&self) -> LeadSummaryView {
        LeadSummaryView {
            id: self.id.clone(),
            prospect_name: self.prospect_name.clone(),
            prospect_email: self.prospect_email.clone(),
            score: self.score,
            tier: self.tier,
            status: self.status,
            submitted_at: self.submitted_at,
            warnings: self.breakdown.validation_issues.len(),
        }
    }
}

/// Row shown in the lead listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummaryView {
    pub id: LeadId,
    pub prospect_name: String,
    pub prospect_email: String,
    pub score: f64,
    pub tier: ComplexityTier,
    pub status: LeadStatus,
    pub submitted_at: DateTime<Utc>,
    pub warnings: usize,
}

/// Listing criteria; unset fields match every lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadFilter {
    pub tier: Option<ComplexityTier>,
    pub status: Option<LeadStatus>,
    pub tracking_id: Option<String>,
    /// Case-insensitive match against prospect name or email.
    #[serde(rename = "q")]
    pub search: Option<String>,
}

impl LeadFilter {
    pub fn matches(&self, record: &LeadRecord) -> bool {
        if self.tier.is_some_and(|tier| tier != record.tier) {
            return false;
        }
        if self.status.is_some_and(|status| status != record.status) {
            return false;
        }
        if let Some(tracking_id) = &self.tracking_id {
            let recorded = record
                .tracking
                .as_ref()
                .and_then(|tracking| tracking.tracking_id.as_deref());
            if recorded != Some(tracking_id.as_str()) {
                return false;
            }
        }
        if let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        {
            let term = term.to_lowercase();
            return record.prospect_name.to_lowercase().contains(&term)
                || record.prospect_email.to_lowercase().contains(&term);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str) -> LeadSubmission {
        LeadSubmission {
            prospect_name: name.to_string(),
            prospect_email: email.to_string(),
            answers: QuestionnaireAnswers::default(),
            tracking: None,
        }
    }

    #[test]
    fn validates_contact_details() {
        assert!(submission("Dana Ortiz", "dana@example.com").validate().is_ok());
        assert_eq!(
            submission("  ", "dana@example.com").validate(),
            Err(LeadValidationError::MissingName)
        );
        for email in ["dana", "dana@", "@example.com", "dana@example", "dana@ex ample.com", "dana@example."] {
            assert!(
                matches!(
                    submission("Dana", email).validate(),
                    Err(LeadValidationError::InvalidEmail(_))
                ),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn status_labels_round_trip() {
        for status in LeadStatus::ALL {
            assert_eq!(LeadStatus::parse(status.label()), Some(status));
        }
        assert_eq!(LeadStatus::parse("closed won"), Some(LeadStatus::ClosedWon));
        assert_eq!(LeadStatus::parse("archived"), None);
    }

    #[test]
    fn generated_ids_are_unique() {
        let first = LeadId::generate();
        let second = LeadId::generate();
        assert_ne!(first, second);
        assert!(first.0.starts_with("lead_"));
    }
}
