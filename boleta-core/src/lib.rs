//! Rust client for the SII "boleta electrónica" REST service: seed/token
//! authentication, envío submission, status polling and reference catalogs.
//!
//! # Examples
//! ```rust
//! use boleta_core::config::{Config, EnvironmentType};
//!
//! let config = Config::new(EnvironmentType::Certification);
//! assert_eq!(config.env().as_str(), "certification");
//! ```
pub mod api;
pub mod auth;
pub mod config;
pub mod credentials;

use thiserror::Error;

/// Top-level error wrapper for core operations.
///
/// Token exchange, submission and status polling report failure as values and
/// have no variant here.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] api::ApiError),
    #[error(transparent)]
    Seed(#[from] auth::SeedError),
    #[error(transparent)]
    Credential(#[from] credentials::CredentialError),
    #[error(transparent)]
    Environment(#[from] config::EnvironmentParseError),
}
