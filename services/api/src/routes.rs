use crate::infra::AppState;
use admission_helpdesk::workflows::admission::{admission_router, EligibilityPipeline, StageExecutor};
use admission_helpdesk::workflows::policy_qa::{policy_router, PolicyAssistant, PolicySource};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_helpdesk_routes<E, S>(
    pipeline: Arc<EligibilityPipeline<E>>,
    assistant: Arc<PolicyAssistant<S>>,
) -> axum::Router
where
    E: StageExecutor + 'static,
    S: PolicySource + 'static,
{
    admission_router(pipeline)
        .merge(policy_router(assistant))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
