//! Integration tests for the admission eligibility pipeline, exercised
//! through the public crate surface only.

use std::sync::{Arc, Mutex};

use admission_helpdesk::workflows::admission::{
    admission_router, AdmissionThresholds, Application, EligibilityPipeline, RuleBook, Stage,
    StageExecutor, StageResult,
};
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

fn applicant() -> Application {
    Application {
        student_name: "Mateo Ruiz".to_string(),
        grade: 75.0,
        id_proof_submitted: true,
        transcript_submitted: true,
        photo_submitted: true,
        loan_requested: true,
        loan_amount: 50_000.0,
    }
}

/// Stage executor that answers every stage with a scripted result.
struct ScriptedExecutor {
    failing: Option<Stage>,
    calls: Mutex<Vec<Stage>>,
}

impl ScriptedExecutor {
    fn failing_at(stage: Option<Stage>) -> Self {
        Self {
            failing: stage,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Stage> {
        self.calls.lock().expect("lock").clone()
    }
}

impl StageExecutor for ScriptedExecutor {
    fn execute(&self, stage: Stage, _application: &Application) -> StageResult {
        self.calls.lock().expect("lock").push(stage);
        if self.failing == Some(stage) {
            StageResult::fail(format!("{} failed", stage.label()))
        } else {
            StageResult::pass(format!("{} passed", stage.label()))
        }
    }
}

#[test]
fn boundary_applicant_passes_every_stage() {
    let outcome = EligibilityPipeline::standard().run(&applicant());

    let messages: Vec<&str> = outcome
        .records()
        .iter()
        .map(|record| record.result.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "All documents are valid",
            "Candidate shortlisted",
            "Email sent to Mateo Ruiz with admission updates.",
            "Loan approved",
        ]
    );
}

#[test]
fn every_failure_point_truncates_the_outcome() {
    let cases = [
        (Some(Stage::DocumentCheck), 1),
        (Some(Stage::Shortlisting), 2),
        (Some(Stage::LoanDecision), 4),
        (None, 4),
    ];

    for (failing, expected_len) in cases {
        let pipeline = EligibilityPipeline::with_executor(ScriptedExecutor::failing_at(failing));
        let outcome = pipeline.run(&applicant());

        assert_eq!(outcome.len(), expected_len, "failing at {failing:?}");
        assert_eq!(pipeline.executor().calls().len(), expected_len);
        assert_eq!(outcome.failed_stage(), failing);
    }
}

#[test]
fn notification_never_stops_the_pipeline() {
    let pipeline = EligibilityPipeline::with_executor(ScriptedExecutor::failing_at(None));
    let outcome = pipeline.run(&Application {
        loan_requested: false,
        ..applicant()
    });

    assert_eq!(outcome.stages().last(), Some(&Stage::Notification));
    assert_eq!(
        pipeline.executor().calls(),
        vec![Stage::DocumentCheck, Stage::Shortlisting, Stage::Notification]
    );
}

#[test]
fn custom_thresholds_flow_through_the_pipeline() {
    let pipeline = EligibilityPipeline::new(AdmissionThresholds {
        shortlist_min_grade: 80.0,
        loan_limit: 50_000.0,
    });

    let outcome = pipeline.run(&applicant());
    assert_eq!(outcome.failed_stage(), Some(Stage::Shortlisting));
    assert_eq!(
        outcome
            .result_for(Stage::Shortlisting)
            .map(|result| result.message.as_str()),
        Some("Candidate not eligible")
    );
}

#[test]
fn rule_book_is_the_default_executor() {
    let rules = RuleBook::default();
    let result = rules.execute(Stage::LoanDecision, &applicant());
    assert_eq!(result, StageResult::pass("Loan approved"));
}

#[tokio::test]
async fn application_route_runs_pipeline() {
    let router = admission_router(Arc::new(EligibilityPipeline::standard()));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/admissions/applications")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&Application {
                        grade: 74.999,
                        ..applicant()
                    })
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(
        body,
        json!({
            "all_passed": false,
            "stages": [
                {
                    "stage": "document_check",
                    "label": "Document Check",
                    "passed": true,
                    "message": "All documents are valid"
                },
                {
                    "stage": "shortlisting",
                    "label": "Shortlisting",
                    "passed": false,
                    "message": "Candidate not eligible"
                }
            ]
        })
    );
}

#[tokio::test]
async fn application_route_rejects_negative_loan_amounts() {
    let router = admission_router(Arc::new(EligibilityPipeline::standard()));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/admissions/applications")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    json!({ "student_name": "Mateo", "grade": 90, "loan_amount": -5 }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
