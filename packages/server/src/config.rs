use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Where and how to reach the execution service.
#[derive(Debug, Deserialize, Clone)]
pub struct ExecutionConfig {
    /// Base URL of the execution service, e.g. "http://judge0:2358".
    pub base_url: String,
    /// Public URL of this server's webhook, handed to the execution service per test case.
    pub callback_url: String,
    /// Timeout for the batch dispatch request. Default: 10.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Sent as `X-Auth-Token` when set.
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProblemsConfig {
    /// Directory holding one sub-directory per problem slug.
    pub root_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    /// Maximum size of submitted code in bytes. Default: 64 KiB.
    #[serde(default = "default_max_code_size")]
    pub max_code_size: usize,
}

fn default_max_code_size() -> usize {
    65_536
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            max_code_size: default_max_code_size(),
        }
    }
}

/// Points awarded by the baseline scoring policy.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    #[serde(default = "default_accepted_points")]
    pub accepted_points: i32,
    #[serde(default)]
    pub failed_points: i32,
}

fn default_accepted_points() -> i32 {
    100
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            accepted_points: default_accepted_points(),
            failed_points: 0,
        }
    }
}

/// Stuck-submission sweep. Disabled unless explicitly turned on.
#[derive(Debug, Deserialize, Clone)]
pub struct ReconciliationConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Age after which a PENDING submission is failed. Default: 600.
    #[serde(default = "default_stuck_timeout_secs")]
    pub stuck_timeout_secs: u64,
    /// Default: 60.
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
}

fn default_stuck_timeout_secs() -> u64 {
    600
}
fn default_scan_interval_secs() -> u64 {
    60
}

/// Largest accepted sweep period or timeout, in seconds. Keeps both representable as
/// millisecond `chrono` durations.
pub const MAX_SWEEP_SECS: u64 = (i64::MAX / 1000) as u64;

impl ReconciliationConfig {
    /// Both periods must be non-zero and at most [`MAX_SWEEP_SECS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("stuck_timeout_secs", self.stuck_timeout_secs),
            ("scan_interval_secs", self.scan_interval_secs),
        ] {
            if value == 0 || value > MAX_SWEEP_SECS {
                return Err(ConfigError::Message(format!(
                    "reconciliation.{key} must be between 1 and {MAX_SWEEP_SECS}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stuck_timeout_secs: default_stuck_timeout_secs(),
            scan_interval_secs: default_scan_interval_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub execution: ExecutionConfig,
    pub problems: ProblemsConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("execution.callback_url", "http://127.0.0.1:3000/api/v1/submission-webhook")?
            .set_default("problems.root_dir", "./problems")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., GAVEL__EXECUTION__BASE_URL)
            .add_source(Environment::with_prefix("GAVEL").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.reconciliation.validate()?;
        Ok(config)
    }
}
