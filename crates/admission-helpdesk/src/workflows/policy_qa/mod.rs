//! Policy question answering: the eligibility criteria document plus the
//! user's question, forwarded to Gemini as one prompt.

mod assistant;
mod error;
mod gemini;
pub mod prompt;
pub mod router;
mod source;

pub use assistant::PolicyAssistant;
pub use error::{ExtractionError, PolicyQaError};
pub use gemini::GeminiClient;
pub use prompt::build_prompt;
pub use router::{policy_router, PolicyAnswerView, PolicyQuestion};
pub use source::{CachedPolicySource, PdfPolicyDocument, PolicySource, StaticPolicyText};
