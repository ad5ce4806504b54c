//! Questionnaire answers, complexity scoring, and the helpers around them.

pub mod answers;
pub mod draft;
pub mod insights;
pub mod progress;
pub mod router;
pub mod scoring;

pub use answers::{
    BusinessSnapshot, Criticality, PainPoints, QuestionnaireAnswers, ReportFrequency,
    ReportingDecisions, SystemPerformance, TeamSize, VisionPriorities, YesNo,
};
pub use draft::{AssessmentDraft, DraftError, DraftStore, JsonFileDraftStore};
pub use insights::{generate_insights, key_findings, talking_points, tier_summary, AssessmentInsights};
pub use progress::{
    first_incomplete_section, is_ready_for_scoring, missing_requirements, progress_report,
    section_completion, time_remaining_label, QuestionnaireSection, SectionProgress,
};
pub use router::{assessment_router, ProgressView, ScoredAssessment};
pub use scoring::{
    compute_score, AdjustmentKind, ComplexityTier, IssueSeverity, ScoreBreakdown, ScoreResult,
    ScoringAdjustment, ValidationIssue,
};
