use crate::cli::ServeArgs;
use crate::infra::{policy_assistant, AppState};
use crate::routes::with_helpdesk_routes;
use admission_helpdesk::config::AppConfig;
use admission_helpdesk::error::AppError;
use admission_helpdesk::telemetry;
use admission_helpdesk::workflows::admission::EligibilityPipeline;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let pipeline = Arc::new(EligibilityPipeline::new(config.admission));
    let assistant = Arc::new(policy_assistant(&config));

    let app = with_helpdesk_routes(pipeline, assistant)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        policy_document = %config.policy.document_path.display(),
        "admission helpdesk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
