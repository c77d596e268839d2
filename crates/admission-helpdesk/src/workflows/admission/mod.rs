//! Student application screening: document completeness, shortlisting,
//! notification and loan eligibility, run as a short-circuiting pipeline.

pub mod domain;
pub mod pipeline;
pub mod router;
mod rules;
mod thresholds;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationInputError, DocumentFlags, RequiredDocument, StageResult,
};
pub use pipeline::{
    EligibilityPipeline, PipelineOutcome, PipelineOutcomeView, Stage, StageExecutor, StageRecord,
    StageView,
};
pub use router::admission_router;
pub use rules::RuleBook;
pub use thresholds::AdmissionThresholds;
