//! Document submission (`boleta.electronica.envio`) and status polling.
use reqwest::{StatusCode, header, header::HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::SiiClient;
use crate::auth::Session;

const ENVIO_PATH: &str = "boleta.electronica.envio";

/// Message carried by the failure sentinel.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Error inesperado";

/// Uniform failure value of [`SiiClient::submit`] and [`SiiClient::submission_status`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorResult {
    codigo: String,
    mensaje: String,
}

impl ErrorResult {
    /// The `{codigo: "", mensaje: "Error inesperado"}` sentinel.
    pub fn unexpected() -> Self {
        Self {
            codigo: String::new(),
            mensaje: UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn codigo(&self) -> &str {
        &self.codigo
    }

    pub fn mensaje(&self) -> &str {
        &self.mensaje
    }
}

/// Result of an operation that reports failure as a value instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Success(T),
    Failure(ErrorResult),
}

impl<T> Outcome<T> {
    fn unexpected() -> Self {
        Outcome::Failure(ErrorResult::unexpected())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ErrorResult> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }
}

/// Submission fields as reported by the envío and status endpoints.
///
/// Values are kept as the JSON the service sent; the service is not consistent
/// about quoting numbers such as `trackid`, `estado` or `codigo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubmissionResult {
    rut_emisor: Option<Value>,
    rut_envia: Option<Value>,
    trackid: Option<Value>,
    fecha_recepcion: Option<Value>,
    estado: Option<Value>,
    file: Option<Value>,
    mensaje: Option<Value>,
    codigo: Option<Value>,
}

impl SubmissionResult {
    pub fn rut_emisor(&self) -> Option<&Value> {
        self.rut_emisor.as_ref()
    }

    pub fn rut_envia(&self) -> Option<&Value> {
        self.rut_envia.as_ref()
    }

    pub fn trackid(&self) -> Option<&Value> {
        self.trackid.as_ref()
    }

    pub fn fecha_recepcion(&self) -> Option<&Value> {
        self.fecha_recepcion.as_ref()
    }

    pub fn estado(&self) -> Option<&Value> {
        self.estado.as_ref()
    }

    pub fn file(&self) -> Option<&Value> {
        self.file.as_ref()
    }

    pub fn mensaje(&self) -> Option<&Value> {
        self.mensaje.as_ref()
    }

    pub fn codigo(&self) -> Option<&Value> {
        self.codigo.as_ref()
    }
}

/// Rate-limit and location headers of a submission response, verbatim.
///
/// Nothing in this crate acts on these values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RateLimitInfo {
    location: Option<String>,
    retry_after: Option<String>,
    limit: Option<String>,
    remaining: Option<String>,
    reset: Option<String>,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        Self {
            location: get("X-Location"),
            retry_after: get("X-Retry-After"),
            limit: get("X-RateLimit-Limit"),
            remaining: get("X-RateLimit-Remaining"),
            reset: get("X-RateLimit-Reset"),
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn retry_after(&self) -> Option<&str> {
        self.retry_after.as_deref()
    }

    pub fn limit(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    pub fn remaining(&self) -> Option<&str> {
        self.remaining.as_deref()
    }

    pub fn reset(&self) -> Option<&str> {
        self.reset.as_deref()
    }
}

/// Successful submission: headers plus body fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResponse {
    rate_limit: RateLimitInfo,
    result: SubmissionResult,
}

impl SubmissionResponse {
    pub fn rate_limit(&self) -> &RateLimitInfo {
        &self.rate_limit
    }

    pub fn result(&self) -> &SubmissionResult {
        &self.result
    }
}

impl SiiClient {
    /// Submit a signed document to `boleta.electronica.envio`.
    ///
    /// Only HTTP 200 counts as success. Every other status, network failure or
    /// unreadable body yields the [`ErrorResult::unexpected`] sentinel. No retry
    /// or backoff happens here, whatever the rate-limit headers say.
    pub async fn submit<B>(
        &self,
        session: &Session,
        user_agent: &str,
        body: &B,
    ) -> Outcome<SubmissionResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.envios_endpoint(ENVIO_PATH);
        debug!(%url, "submitting envío");
        let request = Self::with_session(self.client.post(url), session)
            .header(header::USER_AGENT, user_agent)
            .header(header::ACCEPT, "application/json")
            .json(body);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "envío request failed");
                return Outcome::unexpected();
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "envío not accepted");
            return Outcome::unexpected();
        }

        let rate_limit = RateLimitInfo::from_headers(response.headers());
        match response.json::<SubmissionResult>().await {
            Ok(result) => Outcome::Success(SubmissionResponse { rate_limit, result }),
            Err(err) => {
                error!(error = %err, "invalid envío response");
                Outcome::unexpected()
            }
        }
    }

    /// Fetch the status of a submission at
    /// `boleta.electronica.envio/{rut}-{dv}-{trackid}`.
    ///
    /// Same shaping as [`submit`][SiiClient::submit]. Nothing is cached, so
    /// polling repeatedly always hits the service.
    pub async fn submission_status(
        &self,
        session: &Session,
        rut: &str,
        dv: &str,
        trackid: &str,
    ) -> Outcome<SubmissionResult> {
        let url = self.envios_endpoint(&format!("{ENVIO_PATH}/{rut}-{dv}-{trackid}"));
        debug!(%url, "polling envío status");
        let request = Self::with_session(self.client.get(url), session)
            .header(header::ACCEPT, "application/json");

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "status request failed");
                return Outcome::unexpected();
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "status query not answered");
            return Outcome::unexpected();
        }

        match response.json::<SubmissionResult>().await {
            Ok(result) => Outcome::Success(result),
            Err(err) => {
                error!(error = %err, "invalid status response");
                Outcome::unexpected()
            }
        }
    }
}
