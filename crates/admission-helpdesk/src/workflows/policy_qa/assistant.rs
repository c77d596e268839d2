use std::sync::Arc;

use tracing::{info, warn};

use super::error::{ExtractionError, PolicyQaError};
use super::gemini::GeminiClient;
use super::prompt::build_prompt;
use super::source::PolicySource;

/// Answers free-text questions using the policy document as model context.
pub struct PolicyAssistant<S> {
    source: Arc<S>,
    client: GeminiClient,
}

impl<S> PolicyAssistant<S>
where
    S: PolicySource + 'static,
{
    pub fn new(source: S, client: GeminiClient) -> Self {
        Self {
            source: Arc::new(source),
            client,
        }
    }

    /// Reads the policy text and asks the model. An unreadable document fails
    /// the question before any request is sent.
    pub async fn answer(&self, question: &str) -> Result<String, PolicyQaError> {
        let policy_text = self.load_policy_text().await.map_err(|err| {
            warn!(error = %err, "policy document unavailable");
            PolicyQaError::from(err)
        })?;

        self.answer_with_policy(&policy_text, question).await
    }

    /// Asks the model with caller-supplied policy text.
    pub async fn answer_with_policy(
        &self,
        policy_text: &str,
        question: &str,
    ) -> Result<String, PolicyQaError> {
        let prompt = build_prompt(policy_text, question);

        match self.client.generate(&prompt).await {
            Ok(answer) => {
                info!(
                    question_chars = question.len(),
                    answer_chars = answer.len(),
                    "policy question answered"
                );
                Ok(answer)
            }
            Err(err) => {
                warn!(error = %err, "policy question failed");
                Err(err)
            }
        }
    }

    async fn load_policy_text(&self) -> Result<String, ExtractionError> {
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || source.policy_text())
            .await
            .map_err(|err| ExtractionError::Aborted(err.to_string()))?
    }
}
