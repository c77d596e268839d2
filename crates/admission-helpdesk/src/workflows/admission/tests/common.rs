use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::admission::{
    AdmissionThresholds, Application, EligibilityPipeline, RuleBook, Stage, StageExecutor,
    StageResult,
};

pub(super) fn application() -> Application {
    Application {
        student_name: "Asha Verma".to_string(),
        grade: 88.0,
        id_proof_submitted: true,
        transcript_submitted: true,
        photo_submitted: true,
        loan_requested: false,
        loan_amount: 0.0,
    }
}

pub(super) fn loan_application(amount: f64) -> Application {
    Application {
        loan_requested: true,
        loan_amount: amount,
        ..application()
    }
}

pub(super) fn rule_book() -> RuleBook {
    RuleBook::new(AdmissionThresholds::default())
}

/// Delegates to the real rules while recording every stage it is asked to run.
#[derive(Clone, Default)]
pub(super) struct RecordingExecutor {
    rules: RuleBook,
    calls: Arc<Mutex<Vec<Stage>>>,
}

impl RecordingExecutor {
    pub(super) fn calls(&self) -> Vec<Stage> {
        self.calls.lock().expect("lock").clone()
    }
}

impl StageExecutor for RecordingExecutor {
    fn execute(&self, stage: Stage, application: &Application) -> StageResult {
        self.calls.lock().expect("lock").push(stage);
        self.rules.execute(stage, application)
    }
}

pub(super) fn recording_pipeline() -> (EligibilityPipeline<RecordingExecutor>, RecordingExecutor) {
    let executor = RecordingExecutor::default();
    (EligibilityPipeline::with_executor(executor.clone()), executor)
}

pub(super) async fn response_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
