use admission_helpdesk::config::{AppConfig, PolicyDocumentConfig};
use admission_helpdesk::workflows::policy_qa::{
    CachedPolicySource, GeminiClient, PdfPolicyDocument, PolicyAssistant, PolicySource,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type DynPolicySource = Box<dyn PolicySource>;

pub(crate) fn policy_source(config: &PolicyDocumentConfig) -> DynPolicySource {
    let document = PdfPolicyDocument::new(config.document_path.clone());
    if config.cache_text {
        Box::new(CachedPolicySource::new(document))
    } else {
        Box::new(document)
    }
}

pub(crate) fn policy_assistant(config: &AppConfig) -> PolicyAssistant<DynPolicySource> {
    if config.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; policy questions will be rejected upstream");
    }

    PolicyAssistant::new(
        policy_source(&config.policy),
        GeminiClient::new(&config.gemini),
    )
}
