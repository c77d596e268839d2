use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::admission::ApplicationInputError;
use crate::workflows::policy_qa::PolicyQaError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Input(ApplicationInputError),
    Policy(PolicyQaError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Input(err) => write!(f, "invalid application: {}", err),
            AppError::Policy(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Policy(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Policy(PolicyQaError::Extraction(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Policy(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ApplicationInputError> for AppError {
    fn from(value: ApplicationInputError) -> Self {
        Self::Input(value)
    }
}

impl From<PolicyQaError> for AppError {
    fn from(value: PolicyQaError) -> Self {
        Self::Policy(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::policy_qa::ExtractionError;

    #[test]
    fn policy_errors_map_to_gateway_statuses() {
        let upstream = AppError::from(PolicyQaError::Api {
            status: 500,
            body: "boom".to_string(),
        });
        assert_eq!(upstream.to_string(), "Gemini API error 500: boom");
        assert_eq!(upstream.into_response().status(), StatusCode::BAD_GATEWAY);

        let local = AppError::from(PolicyQaError::from(ExtractionError::Parse(
            "bad xref".to_string(),
        )));
        assert_eq!(local.to_string(), "Error reading PDF: bad xref");
        assert_eq!(
            local.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn input_errors_are_unprocessable() {
        let err = AppError::from(ApplicationInputError::GradeOutOfRange(101.0));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
