use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::error::ExtractionError;

/// Supplies the policy text used as model context.
pub trait PolicySource: Send + Sync {
    fn policy_text(&self) -> Result<String, ExtractionError>;
}

/// PDF on disk, re-read on every call.
#[derive(Debug, Clone)]
pub struct PdfPolicyDocument {
    path: PathBuf,
}

impl PdfPolicyDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PolicySource for PdfPolicyDocument {
    fn policy_text(&self) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(&self.path).map_err(|source| ExtractionError::Io {
            path: self.path.clone(),
            source,
        })?;

        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|err| ExtractionError::Parse(err.to_string()))?;

        debug!(
            path = %self.path.display(),
            chars = text.len(),
            "extracted policy document text"
        );
        Ok(text)
    }
}

/// Keeps the first successfully extracted text for the process lifetime.
/// Failed reads are not cached, so a later call retries the inner source.
pub struct CachedPolicySource<S> {
    inner: S,
    cached: Mutex<Option<Arc<str>>>,
}

impl<S> CachedPolicySource<S>
where
    S: PolicySource,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cached: Mutex::new(None),
        }
    }
}

impl<S> PolicySource for CachedPolicySource<S>
where
    S: PolicySource,
{
    fn policy_text(&self) -> Result<String, ExtractionError> {
        let mut guard = self
            .cached
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(text) = guard.as_ref() {
            return Ok(text.to_string());
        }

        let text = self.inner.policy_text()?;
        *guard = Some(Arc::from(text.as_str()));
        Ok(text)
    }
}

/// Policy text already held in memory.
#[derive(Debug, Clone)]
pub struct StaticPolicyText(pub String);

impl PolicySource for StaticPolicyText {
    fn policy_text(&self) -> Result<String, ExtractionError> {
        Ok(self.0.clone())
    }
}

impl<S> PolicySource for Box<S>
where
    S: PolicySource + ?Sized,
{
    fn policy_text(&self) -> Result<String, ExtractionError> {
        (**self).policy_text()
    }
}
