use serde::{Deserialize, Serialize};

/// Inclusive cut-offs applied by the shortlisting and loan stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdmissionThresholds {
    pub shortlist_min_grade: f64,
    pub loan_limit: f64,
}

impl Default for AdmissionThresholds {
    fn default() -> Self {
        Self {
            shortlist_min_grade: 75.0,
            loan_limit: 50_000.0,
        }
    }
}
