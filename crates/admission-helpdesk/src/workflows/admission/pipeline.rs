use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{Application, StageResult};
use super::rules::RuleBook;
use super::thresholds::AdmissionThresholds;

/// Eligibility stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    DocumentCheck,
    Shortlisting,
    Notification,
    LoanDecision,
}

impl Stage {
    pub const FIRST: Stage = Stage::DocumentCheck;

    pub fn label(self) -> &'static str {
        match self {
            Stage::DocumentCheck => "Document Check",
            Stage::Shortlisting => "Shortlisting",
            Stage::Notification => "Student Communication",
            Stage::LoanDecision => "Loan Processing",
        }
    }

    /// Transition table. A failed stage is always terminal; the loan stage is
    /// only reached when the applicant asked for one.
    pub fn next(self, result: &StageResult, application: &Application) -> Option<Stage> {
        if !result.passed {
            return None;
        }

        match self {
            Stage::DocumentCheck => Some(Stage::Shortlisting),
            Stage::Shortlisting => Some(Stage::Notification),
            Stage::Notification => application.loan_requested.then_some(Stage::LoanDecision),
            Stage::LoanDecision => None,
        }
    }
}

/// Executes a single stage against an application.
pub trait StageExecutor: Send + Sync {
    fn execute(&self, stage: Stage, application: &Application) -> StageResult;
}

impl StageExecutor for RuleBook {
    fn execute(&self, stage: Stage, application: &Application) -> StageResult {
        match stage {
            Stage::DocumentCheck => self.check_documents(&application.documents()),
            Stage::Shortlisting => self.shortlist(application.grade),
            Stage::Notification => StageResult::pass(self.communicate(&application.student_name)),
            Stage::LoanDecision => self.process_loan(application.loan_amount),
        }
    }
}

/// One executed stage and what it reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub result: StageResult,
}

/// Ordered stage results, truncated at the first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    records: Vec<StageRecord>,
}

impl PipelineOutcome {
    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.records.iter().map(|record| record.stage).collect()
    }

    pub fn result_for(&self, stage: Stage) -> Option<&StageResult> {
        self.records
            .iter()
            .find(|record| record.stage == stage)
            .map(|record| &record.result)
    }

    /// The stage that stopped the run, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        self.records
            .iter()
            .find(|record| !record.result.passed)
            .map(|record| record.stage)
    }

    pub fn all_passed(&self) -> bool {
        self.failed_stage().is_none()
    }

    pub fn view(&self) -> PipelineOutcomeView {
        PipelineOutcomeView {
            all_passed: self.all_passed(),
            stages: self
                .records
                .iter()
                .map(|record| StageView {
                    stage: record.stage,
                    label: record.stage.label(),
                    passed: record.result.passed,
                    message: record.result.message.clone(),
                })
                .collect(),
        }
    }
}

/// Serializable representation returned to HTTP callers.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcomeView {
    pub all_passed: bool,
    pub stages: Vec<StageView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageView {
    pub stage: Stage,
    pub label: &'static str,
    pub passed: bool,
    pub message: String,
}

/// Runs the fixed stage sequence with short-circuit on failure.
pub struct EligibilityPipeline<E = RuleBook> {
    executor: E,
}

impl EligibilityPipeline<RuleBook> {
    pub fn new(thresholds: AdmissionThresholds) -> Self {
        Self::with_executor(RuleBook::new(thresholds))
    }

    pub fn standard() -> Self {
        Self::new(AdmissionThresholds::default())
    }
}

impl<E> EligibilityPipeline<E>
where
    E: StageExecutor,
{
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn run(&self, application: &Application) -> PipelineOutcome {
        let mut records = Vec::with_capacity(4);
        let mut current = Some(Stage::FIRST);

        while let Some(stage) = current {
            let result = self.executor.execute(stage, application);
            debug!(
                stage = stage.label(),
                passed = result.passed,
                message = %result.message,
                "eligibility stage evaluated"
            );
            current = stage.next(&result, application);
            records.push(StageRecord { stage, result });
        }

        let outcome = PipelineOutcome { records };
        info!(
            stages = outcome.len(),
            failed_stage = ?outcome.failed_stage(),
            loan_requested = application.loan_requested,
            "eligibility pipeline finished"
        );
        outcome
    }
}
