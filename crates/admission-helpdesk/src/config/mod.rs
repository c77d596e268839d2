use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::admission::AdmissionThresholds;

/// Default Gemini endpoint used when `GEMINI_API_URL` is not set.
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Default location of the academic eligibility criteria document.
pub const DEFAULT_POLICY_DOCUMENT: &str = "Academic Eligibility Criteria.pdf";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the helpdesk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub gemini: GeminiConfig,
    pub policy: PolicyDocumentConfig,
    pub admission: AdmissionThresholds,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let endpoint =
            env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string());

        let document_path = env::var("POLICY_DOCUMENT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_POLICY_DOCUMENT));
        let cache_text = match env::var("POLICY_CACHE") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                variable: "POLICY_CACHE",
                value: raw,
            })?,
            Err(_) => false,
        };

        let defaults = AdmissionThresholds::default();
        let admission = AdmissionThresholds {
            shortlist_min_grade: parse_number("SHORTLIST_MIN_GRADE")?
                .unwrap_or(defaults.shortlist_min_grade),
            loan_limit: parse_number("LOAN_LIMIT")?.unwrap_or(defaults.loan_limit),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            gemini: GeminiConfig { endpoint, api_key },
            policy: PolicyDocumentConfig {
                document_path,
                cache_text,
            },
            admission,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn parse_number(variable: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or(ConfigError::InvalidNumber {
                variable,
                value: raw,
            }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Language-model endpoint settings. The key is optional so a missing secret
/// surfaces as a rejected request rather than a startup failure.
#[derive(Clone)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Location of the policy document fed to the question assistant.
#[derive(Debug, Clone)]
pub struct PolicyDocumentConfig {
    pub document_path: PathBuf,
    pub cache_text: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidNumber {
        variable: &'static str,
        value: String,
    },
    InvalidFlag {
        variable: &'static str,
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable, value } => {
                write!(f, "{variable} must be a finite number (got '{value}')")
            }
            ConfigError::InvalidFlag { variable, value } => {
                write!(f, "{variable} must be true or false (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "GEMINI_API_KEY",
            "GEMINI_API_URL",
            "POLICY_DOCUMENT_PATH",
            "POLICY_CACHE",
            "SHORTLIST_MIN_GRADE",
            "LOAN_LIMIT",
        ] {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.gemini.endpoint, DEFAULT_GEMINI_API_URL);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(
            config.policy.document_path,
            PathBuf::from(DEFAULT_POLICY_DOCUMENT)
        );
        assert!(!config.policy.cache_text);
        assert_eq!(config.admission, AdmissionThresholds::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_gemini_and_threshold_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("GEMINI_API_KEY", "secret-key");
        env::set_var("GEMINI_API_URL", "http://127.0.0.1:9999/generate");
        env::set_var("POLICY_CACHE", "yes");
        env::set_var("SHORTLIST_MIN_GRADE", "80");
        env::set_var("LOAN_LIMIT", "25000.5");

        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret-key"));
        assert_eq!(config.gemini.endpoint, "http://127.0.0.1:9999/generate");
        assert!(config.policy.cache_text);
        assert_eq!(config.admission.shortlist_min_grade, 80.0);
        assert_eq!(config.admission.loan_limit, 25000.5);
        assert!(!format!("{:?}", config.gemini).contains("secret-key"));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_threshold() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LOAN_LIMIT", "fifty thousand");

        match AppConfig::load() {
            Err(ConfigError::InvalidNumber { variable, .. }) => assert_eq!(variable, "LOAN_LIMIT"),
            other => panic!("expected invalid number error, got {other:?}"),
        }
        reset_env();
    }
}
