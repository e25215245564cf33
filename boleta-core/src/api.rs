//! SII boleta electrónica HTTP client and response types.
//!
//! Failure reporting differs per operation and callers rely on it:
//! - [`SiiClient::fetch_seed`] and [`SiiClient::authenticate`] return
//!   [`SeedError`] and abort the handshake.
//! - [`SiiClient::exchange_token`] returns `None` instead of an error.
//! - [`SiiClient::submit`] and [`SiiClient::submission_status`] never fail; a
//!   failure is an [`Outcome::Failure`] carrying the [`ErrorResult`] sentinel.
//! - the catalog lookups in [`reference`] log and return `None`, except
//!   [`SiiClient::boleta_status`] which hands back the error value.
pub mod envio;
pub mod reference;

pub use envio::{ErrorResult, Outcome, RateLimitInfo, SubmissionResponse, SubmissionResult};

use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    auth::{AuthRequest, Seed, SeedError, Session, SessionToken},
    config::Config,
    credentials::CredentialBundle,
};

const SEED_PATH: &str = "boleta.electronica.semilla";
const TOKEN_PATH: &str = "boleta.electronica.token";

/// ESTADO value of a successful response header.
pub const ESTADO_OK: i64 = 0;

/// Errors returned by the SII API client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Request failed with status code {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response from SII: {0}")]
    InvalidResponse(String),
}

/// Numeric-or-text field. The service is not consistent about quoting
/// identifiers such as `trackid` or `SEMILLA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

/// `{RESP_HDR, RESP_BODY}` wrapper used by the seed and token endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<H, B> {
    #[serde(rename = "RESP_HDR")]
    header: H,
    #[serde(rename = "RESP_BODY")]
    body: Option<B>,
}

#[derive(Debug, Deserialize)]
struct SeedHeader {
    #[serde(rename = "ESTADO")]
    estado: i64,
}

#[derive(Debug, Deserialize)]
struct SeedBody {
    #[serde(rename = "SEMILLA")]
    semilla: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
struct TokenHeader {
    #[serde(rename = "ESTADO")]
    estado: i64,
    #[serde(rename = "GLOSA")]
    glosa: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(rename = "TOKEN")]
    token: Option<String>,
}

/// SII boleta electrónica API client.
///
/// Holds the signature material used by [`authenticate`][SiiClient::authenticate];
/// session state lives in a caller-owned [`Session`].
///
/// # Examples
/// ```rust,no_run
/// use boleta_core::api::SiiClient;
/// use boleta_core::auth::Session;
/// use boleta_core::config::{Config, EnvironmentType};
/// use boleta_core::credentials::CredentialBundle;
///
/// # async fn run(creds: CredentialBundle) -> Result<(), boleta_core::Error> {
/// let client = SiiClient::new(Config::new(EnvironmentType::Certification), creds)?;
/// let mut session = Session::new();
/// client.authenticate(&mut session).await?;
/// assert!(session.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SiiClient {
    config: Config,
    credentials: CredentialBundle,
    client: Client,
    api_url: String,
    envios_url: String,
}

// Public API
impl SiiClient {
    /// Create a new API client; base URLs are resolved once, here.
    ///
    /// # Errors
    /// Returns [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn new(config: Config, credentials: CredentialBundle) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        let api_url = config.api_url();
        let envios_url = config.envios_url();
        debug!(env = config.env().as_str(), %api_url, %envios_url, "SII client configured");

        Ok(Self {
            config,
            credentials,
            client,
            api_url,
            envios_url,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialBundle {
        &self.credentials
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn envios_url(&self) -> &str {
        &self.envios_url
    }

    /// Run the full handshake: seed, signed request, token.
    ///
    /// The exchange result replaces whatever `session` held before, and the
    /// session counts as authenticated only if a token was issued. A failed
    /// exchange is not an error here; check [`Session::is_authenticated`].
    ///
    /// # Errors
    /// Returns [`SeedError`] if no seed could be obtained. The session is left
    /// untouched in that case.
    pub async fn authenticate(&self, session: &mut Session) -> Result<(), SeedError> {
        let seed = self.fetch_seed().await?;
        let body = AuthRequest::build(&seed, &self.credentials);
        let token = self.exchange_token(&body).await;
        session.store(token);
        if session.is_authenticated() {
            info!("authenticated against SII");
        } else {
            warn!("token exchange did not yield a token");
        }
        Ok(())
    }

    /// Request a one-time seed (`boleta.electronica.semilla`). No retries.
    ///
    /// # Errors
    /// - [`SeedError::Transport`] on any HTTP status other than 200.
    /// - [`SeedError::RemoteRejection`] when `ESTADO` is not 0.
    /// - [`SeedError::Fetch`] when the request itself fails.
    /// - [`SeedError::InvalidResponse`] when the envelope cannot be read.
    pub async fn fetch_seed(&self) -> Result<Seed, SeedError> {
        let url = self.api_endpoint(SEED_PATH);
        debug!(%url, "requesting seed");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(SeedError::Fetch)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "seed request rejected");
            return Err(SeedError::Transport {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(SeedError::Fetch)?;
        let envelope: Envelope<SeedHeader, SeedBody> = serde_json::from_str(&body)
            .map_err(|e| SeedError::InvalidResponse(format!("{e}: {body}")))?;

        if envelope.header.estado != ESTADO_OK {
            warn!(estado = envelope.header.estado, "seed refused");
            return Err(SeedError::RemoteRejection {
                estado: envelope.header.estado,
            });
        }

        envelope
            .body
            .and_then(|b| b.semilla)
            .map(|semilla| Seed::new(semilla.to_string()))
            .ok_or_else(|| SeedError::InvalidResponse(format!("missing SEMILLA: {body}")))
    }

    /// Post a signed seed to `boleta.electronica.token`.
    ///
    /// The envelope is read whatever the HTTP status and `ESTADO` is reported
    /// as-is. Returns `None` if the request fails or the envelope is unreadable.
    pub async fn exchange_token(&self, body: &AuthRequest) -> Option<SessionToken> {
        let url = self.api_endpoint(TOKEN_PATH);
        debug!(%url, "exchanging seed for token");
        let response = match self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "token request failed");
                return None;
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "token response body unreadable");
                return None;
            }
        };

        match serde_json::from_str::<Envelope<TokenHeader, TokenBody>>(&text) {
            Ok(envelope) => {
                let glosa = envelope.header.glosa.unwrap_or_default();
                info!(
                    status = status.as_u16(),
                    estado = envelope.header.estado,
                    glosa = %glosa,
                    "token exchange answered"
                );
                Some(SessionToken::new(
                    envelope.header.estado,
                    glosa,
                    envelope.body.and_then(|b| b.token),
                ))
            }
            Err(err) => {
                error!(status = status.as_u16(), error = %err, body = %text, "invalid token response");
                None
            }
        }
    }
}

// Private API
impl SiiClient {
    fn api_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path.trim_start_matches('/'))
    }

    fn envios_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.envios_url, path.trim_start_matches('/'))
    }

    /// Attach the session token as the `TOKEN` cookie, when there is one.
    fn with_session(request: RequestBuilder, session: &Session) -> RequestBuilder {
        match session.token() {
            Some(token) => request.header(header::COOKIE, format!("TOKEN={token}")),
            None => request,
        }
    }
}
