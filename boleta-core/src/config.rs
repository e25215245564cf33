//! Configuration and environment selection.
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Overrides the resource API base URL (seed, token and reference data).
pub const API_URL_VAR: &str = "SII_API_URL";
/// Overrides the envíos API base URL (submission and status).
pub const ENVIOS_API_URL_VAR: &str = "SII_ENVIOS_API_URL";

/// SII environment selection for API endpoints.
/// - Certification: the "certificación" environment used while an issuer is being
///   enabled for electronic receipts.
/// - Production: the live production environment.
///
/// # Examples
/// ```rust
/// use std::str::FromStr;
/// use boleta_core::config::EnvironmentType;
///
/// let env = EnvironmentType::from_str("certification")?;
/// assert_eq!(env, EnvironmentType::Certification);
/// # Ok::<(), boleta_core::config::EnvironmentParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EnvironmentType {
    Certification,
    #[default]
    Production,
}

/// Error returned when parsing an [`EnvironmentType`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentParseError {
    #[error("invalid environment type: {input}")]
    Invalid { input: String },
}

impl FromStr for EnvironmentType {
    type Err = EnvironmentParseError;
    fn from_str(env: &str) -> Result<EnvironmentType, EnvironmentParseError> {
        match env.to_ascii_lowercase().as_str() {
            "certification" => Ok(EnvironmentType::Certification),
            "production" => Ok(EnvironmentType::Production),
            _ => Err(EnvironmentParseError::Invalid {
                input: env.to_string(),
            }),
        }
    }
}

impl EnvironmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentType::Certification => "certification",
            EnvironmentType::Production => "production",
        }
    }

    /// Base URL of the resource API (semilla, token, globales).
    pub fn api_url(&self) -> &'static str {
        match self {
            EnvironmentType::Certification => "https://apicert.sii.cl/recursos/v1/",
            EnvironmentType::Production => "https://api.sii.cl/recursos/v1/",
        }
    }

    /// Base URL of the envíos API (boleta.electronica.envio).
    pub fn envios_url(&self) -> &'static str {
        match self {
            EnvironmentType::Certification => "https://pangal.sii.cl/recursos/v1/",
            EnvironmentType::Production => "https://rahue.sii.cl/recursos/v1/",
        }
    }
}

/// Configuration for the API client.
///
/// Each base URL is resolved as: explicit override, then the matching
/// environment variable ([`API_URL_VAR`], [`ENVIOS_API_URL_VAR`]), then the
/// environment's default host.
///
/// # Examples
/// ```rust
/// use boleta_core::config::{Config, EnvironmentType};
///
/// let config = Config::new(EnvironmentType::Certification)
///     .with_envios_url("http://localhost:8080/recursos/v1");
/// assert_eq!(config.envios_url(), "http://localhost:8080/recursos/v1/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    env: EnvironmentType,
    api_url: Option<String>,
    envios_url: Option<String>,
}

impl Config {
    pub fn new(env: EnvironmentType) -> Self {
        Self {
            env,
            api_url: None,
            envios_url: None,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_envios_url(mut self, url: impl Into<String>) -> Self {
        self.envios_url = Some(url.into());
        self
    }

    pub fn env(&self) -> EnvironmentType {
        self.env
    }

    /// Resolved resource API base URL, always ending in `/`.
    pub fn api_url(&self) -> String {
        resolve(self.api_url.as_deref(), API_URL_VAR, self.env.api_url())
    }

    /// Resolved envíos API base URL, always ending in `/`.
    pub fn envios_url(&self) -> String {
        resolve(
            self.envios_url.as_deref(),
            ENVIOS_API_URL_VAR,
            self.env.envios_url(),
        )
    }
}

fn resolve(explicit: Option<&str>, var: &str, fallback: &str) -> String {
    let value = explicit
        .map(str::to_string)
        .or_else(|| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| fallback.to_string());
    if value.ends_with('/') {
        value
    } else {
        format!("{value}/")
    }
}
