use super::domain::{DocumentFlags, StageResult};
use super::thresholds::AdmissionThresholds;

/// Stateless stage rules parameterised by the admission thresholds.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    thresholds: AdmissionThresholds,
}

impl RuleBook {
    pub fn new(thresholds: AdmissionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn check_documents(&self, documents: &DocumentFlags) -> StageResult {
        let missing = documents.missing();
        if missing.is_empty() {
            return StageResult::pass("All documents are valid");
        }

        let names: Vec<&str> = missing.iter().map(|document| document.key()).collect();
        StageResult::fail(format!("Missing documents: {}", names.join(", ")))
    }

    /// No clamping: out-of-range grades are compared as given.
    pub fn shortlist(&self, grade: f64) -> StageResult {
        if grade >= self.thresholds.shortlist_min_grade {
            StageResult::pass("Candidate shortlisted")
        } else {
            StageResult::fail("Candidate not eligible")
        }
    }

    /// Simulated notification; nothing is transmitted.
    pub fn communicate(&self, student_name: &str) -> String {
        format!("Email sent to {student_name} with admission updates.")
    }

    /// Only the upper bound is enforced, so negative amounts are approved.
    pub fn process_loan(&self, amount: f64) -> StageResult {
        if amount <= self.thresholds.loan_limit {
            StageResult::pass("Loan approved")
        } else {
            StageResult::fail("Loan amount exceeds limit")
        }
    }
}
