use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::Application;
use super::pipeline::{EligibilityPipeline, StageExecutor};

/// Router exposing the eligibility pipeline over HTTP.
pub fn admission_router<E>(pipeline: Arc<EligibilityPipeline<E>>) -> Router
where
    E: StageExecutor + 'static,
{
    Router::new()
        .route(
            "/api/v1/admissions/applications",
            post(submit_application_handler::<E>),
        )
        .with_state(pipeline)
}

pub(crate) async fn submit_application_handler<E>(
    State(pipeline): State<Arc<EligibilityPipeline<E>>>,
    axum::Json(application): axum::Json<Application>,
) -> Response
where
    E: StageExecutor + 'static,
{
    if let Err(error) = application.validate_form_ranges() {
        let payload = json!({
            "error": error.to_string(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let outcome = pipeline.run(&application);
    (StatusCode::OK, axum::Json(outcome.view())).into_response()
}
