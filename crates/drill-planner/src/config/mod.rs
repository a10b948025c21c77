use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::planning::scoring::DEFAULT_JITTER;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub planner: PlannerConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            planner: PlannerConfig::from_env()?,
        })
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

/// Drill catalog location and session randomization.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub catalog_path: PathBuf,
    pub jitter: f64,
    /// Fixed seed for every request; fresh entropy per request when unset.
    pub seed: Option<u64>,
    pub skill_balance: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("drills"),
            jitter: DEFAULT_JITTER,
            seed: None,
            skill_balance: false,
        }
    }
}

impl PlannerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let catalog_path = env::var("PLANNER_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.catalog_path);

        let jitter = match env::var("PLANNER_JITTER") {
            Ok(raw) => {
                let value = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidJitter { value: raw.clone() })?;
                if !value.is_finite() || !(0.0..1.0).contains(&value) {
                    return Err(ConfigError::InvalidJitter { value: raw });
                }
                value
            }
            Err(_) => defaults.jitter,
        };

        let seed = match env::var("PLANNER_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { value: raw.clone() })?,
            ),
            _ => None,
        };

        let skill_balance = match env::var("PLANNER_SKILL_BALANCE") {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(ConfigError::InvalidSkillBalance { value: raw }),
            },
            Err(_) => defaults.skill_balance,
        };

        Ok(Self {
            catalog_path,
            jitter,
            seed,
            skill_balance,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidJitter { value: String },
    InvalidSeed { value: String },
    InvalidSkillBalance { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidJitter { value } => write!(
                f,
                "PLANNER_JITTER must be a number in [0, 1), got '{}'",
                value
            ),
            ConfigError::InvalidSeed { value } => {
                write!(f, "PLANNER_SEED must be a valid u64, got '{}'", value)
            }
            ConfigError::InvalidSkillBalance { value } => write!(
                f,
                "PLANNER_SKILL_BALANCE must be true or false, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidJitter { .. }
            | ConfigError::InvalidSeed { .. }
            | ConfigError::InvalidSkillBalance { .. } => None,
        }
    }
}
