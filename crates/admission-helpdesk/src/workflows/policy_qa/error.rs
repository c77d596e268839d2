use std::path::PathBuf;

/// Failure to turn the policy document into text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Parse(String),
    #[error("extraction task aborted: {0}")]
    Aborted(String),
}

/// Error returned by the policy assistant. Display strings match what the
/// helpdesk has always shown to users.
#[derive(Debug, thiserror::Error)]
pub enum PolicyQaError {
    #[error("Error reading PDF: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Gemini API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Error communicating with Gemini API: {0}")]
    Transport(String),
    #[error("Error communicating with Gemini API: {0}")]
    MalformedResponse(String),
}
