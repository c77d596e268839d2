use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::assistant::PolicyAssistant;
use super::error::PolicyQaError;
use super::source::PolicySource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyQuestion {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyAnswerView {
    pub answer: String,
}

/// Router exposing the policy assistant over HTTP.
pub fn policy_router<S>(assistant: Arc<PolicyAssistant<S>>) -> Router
where
    S: PolicySource + 'static,
{
    Router::new()
        .route("/api/v1/policy/questions", post(ask_handler::<S>))
        .with_state(assistant)
}

pub(crate) async fn ask_handler<S>(
    State(assistant): State<Arc<PolicyAssistant<S>>>,
    axum::Json(payload): axum::Json<PolicyQuestion>,
) -> Response
where
    S: PolicySource + 'static,
{
    match assistant.answer(&payload.question).await {
        Ok(answer) => (StatusCode::OK, axum::Json(PolicyAnswerView { answer })).into_response(),
        Err(error) => {
            let status = match &error {
                PolicyQaError::Extraction(_) => StatusCode::SERVICE_UNAVAILABLE,
                PolicyQaError::Api { .. }
                | PolicyQaError::Transport(_)
                | PolicyQaError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}
