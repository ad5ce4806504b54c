use axum::{http::StatusCode, routing::post, Json, Router};
use serde::Serialize;

use super::answers::QuestionnaireAnswers;
use super::insights::{generate_insights, AssessmentInsights};
use super::progress::{
    first_incomplete_section, progress_report, time_remaining_label, QuestionnaireSection,
    SectionProgress,
};
use super::scoring::{compute_score, ScoreResult};

/// Stateless endpoints for scoring answers and checking questionnaire progress.
pub fn assessment_router() -> Router {
    Router::new()
        .route("/api/v1/assessments/score", post(score_handler))
        .route("/api/v1/assessments/progress", post(progress_handler))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAssessment {
    #[serde(flatten)]
    pub result: ScoreResult,
    #[serde(flatten)]
    pub insights: AssessmentInsights,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub sections: Vec<SectionProgress>,
    pub ready_for_scoring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_section: Option<QuestionnaireSection>,
    pub time_remaining: String,
}

pub(crate) async fn score_handler(
    Json(answers): Json<QuestionnaireAnswers>,
) -> (StatusCode, Json<ScoredAssessment>) {
    let result = compute_score(&answers);
    let insights = generate_insights(&answers, &result);
    (StatusCode::OK, Json(ScoredAssessment { result, insights }))
}

pub(crate) async fn progress_handler(
    Json(answers): Json<QuestionnaireAnswers>,
) -> (StatusCode, Json<ProgressView>) {
    let next_section = first_incomplete_section(&answers);
    let current = next_section.unwrap_or(QuestionnaireSection::VisionPriorities);
    let view = ProgressView {
        sections: progress_report(&answers),
        ready_for_scoring: next_section.is_none(),
        next_section,
        time_remaining: time_remaining_label(current),
    };
    (StatusCode::OK, Json(view))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = assessment_router()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json payload"))
    }

    #[tokio::test]
    async fn score_route_returns_result_with_insights() {
        let (status, payload) = post_json(
            "/api/v1/assessments/score",
            json!({
                "businessSnapshot": {
                    "teamSize": "Small Team (1-5)",
                    "systemsCount": 2
                },
                "systemPerformance": {
                    "q0": 5, "q1": 5, "q2": 5, "q3": 5, "q4": 5, "q5": 5, "q6": 5
                },
                "painPoints": { "manualWorkarounds": "no" },
                "reportingDecisions": {
                    "reportFrequency": ["Daily"],
                    "dataConfidence": 5
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["score"].as_f64(), Some(13.0));
        assert_eq!(payload["tier"].as_str(), Some("Low"));
        assert_eq!(payload["breakdown"]["systemPerformance"].as_f64(), Some(6.0));
        assert!(payload["summary"]
            .as_str()
            .is_some_and(|summary| summary.starts_with("You have a solid base")));
        assert_eq!(payload["talkingPoints"].as_array().map(Vec::len), Some(1));
        assert!(payload["keyFindings"].is_array());
    }

    #[tokio::test]
    async fn score_route_rejects_malformed_answers() {
        let response = assessment_router()
            .oneshot(
                Request::post("/api/v1/assessments/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"businessSnapshot": {"teamSize": "Huge"}}"#))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn progress_route_points_at_first_gap() {
        let (status, payload) = post_json(
            "/api/v1/assessments/progress",
            json!({
                "businessSnapshot": {
                    "teamSize": "Growing Team (6-20)",
                    "systemsCount": 4,
                    "systemAreas": ["Accounting"]
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["readyForScoring"].as_bool(), Some(false));
        assert_eq!(payload["nextSection"].as_str(), Some("systemPerformance"));
        assert_eq!(payload["sections"].as_array().map(Vec::len), Some(5));
        assert_eq!(payload["sections"][0]["complete"].as_bool(), Some(true));
    }
}
