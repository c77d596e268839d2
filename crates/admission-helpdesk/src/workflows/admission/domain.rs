use serde::{Deserialize, Serialize};

/// Documents every application must include, listed in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredDocument {
    IdProof,
    Transcript,
    Photo,
}

impl RequiredDocument {
    /// Declaration order used when reporting missing documents.
    pub const ALL: [RequiredDocument; 3] = [
        RequiredDocument::IdProof,
        RequiredDocument::Transcript,
        RequiredDocument::Photo,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RequiredDocument::IdProof => "id_proof",
            RequiredDocument::Transcript => "transcript",
            RequiredDocument::Photo => "photo",
        }
    }
}

/// Submission state of each required document. Absent flags count as missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFlags {
    #[serde(default)]
    pub id_proof: bool,
    #[serde(default)]
    pub transcript: bool,
    #[serde(default)]
    pub photo: bool,
}

impl DocumentFlags {
    pub fn all_submitted() -> Self {
        Self {
            id_proof: true,
            transcript: true,
            photo: true,
        }
    }

    pub fn is_submitted(&self, document: RequiredDocument) -> bool {
        match document {
            RequiredDocument::IdProof => self.id_proof,
            RequiredDocument::Transcript => self.transcript,
            RequiredDocument::Photo => self.photo,
        }
    }

    pub fn missing(&self) -> Vec<RequiredDocument> {
        RequiredDocument::ALL
            .into_iter()
            .filter(|document| !self.is_submitted(*document))
            .collect()
    }
}

/// Student application captured by the intake form. Lives for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub grade: f64,
    #[serde(default)]
    pub id_proof_submitted: bool,
    #[serde(default)]
    pub transcript_submitted: bool,
    #[serde(default)]
    pub photo_submitted: bool,
    #[serde(default)]
    pub loan_requested: bool,
    #[serde(default)]
    pub loan_amount: f64,
}

impl Application {
    pub fn documents(&self) -> DocumentFlags {
        DocumentFlags {
            id_proof: self.id_proof_submitted,
            transcript: self.transcript_submitted,
            photo: self.photo_submitted,
        }
    }

    /// Range checks the intake form enforces before anything reaches the pipeline.
    /// The stage rules themselves accept any value.
    pub fn validate_form_ranges(&self) -> Result<(), ApplicationInputError> {
        if !self.grade.is_finite() || !(0.0..=100.0).contains(&self.grade) {
            return Err(ApplicationInputError::GradeOutOfRange(self.grade));
        }
        if !self.loan_amount.is_finite() || self.loan_amount < 0.0 {
            return Err(ApplicationInputError::NegativeLoanAmount(self.loan_amount));
        }
        Ok(())
    }
}

/// Outcome of one eligibility stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    pub passed: bool,
    pub message: String,
}

impl StageResult {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// Input rejected by the intake form before screening.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplicationInputError {
    #[error("grade must be between 0 and 100 (got {0})")]
    GradeOutOfRange(f64),
    #[error("loan amount must be zero or greater (got {0})")]
    NegativeLoanAmount(f64),
}
