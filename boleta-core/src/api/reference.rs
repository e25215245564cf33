//! Catalog passthroughs under `globales/`.
//!
//! Bodies are returned as raw JSON. The three catalogs report failure as
//! `None`; [`SiiClient::boleta_status`] returns the error itself.
use reqwest::header;
use serde_json::Value;
use tracing::{debug, error};

use super::{ApiError, SiiClient};

const STATUS_PATH: &str = "globales/boleta.electronica.estado";
const TYPES_PATH: &str = "globales/boleta.electronica.tipo";
const LEVELS_PATH: &str = "globales/boleta.electronica.nivel";
const SECTIONS_PATH: &str = "globales/boleta.electronica.seccion";

impl SiiClient {
    /// Look up the state of a boleta issued to `rut_receptor`.
    ///
    /// # Errors
    /// Returns [`ApiError`] for network failures, non-success statuses, or
    /// bodies that are not JSON. The error is logged before it is returned.
    pub async fn boleta_status(
        &self,
        rut_receptor: &str,
        dv_receptor: &str,
        monto: u64,
        fecha: &str,
    ) -> Result<Value, ApiError> {
        let query = [
            ("rut_receptor", rut_receptor.to_string()),
            ("dv_receptor", dv_receptor.to_string()),
            ("monto", monto.to_string()),
            ("fecha", fecha.to_string()),
        ];
        let url = self.api_endpoint(STATUS_PATH);
        debug!(%url, "querying boleta status");
        let request = self.client.get(url).query(&query);
        self.fetch_json(request).await.inspect_err(|err| {
            error!(error = %err, "boleta status lookup failed");
        })
    }

    /// Catalog of boleta types (`boleta.electronica.tipo`).
    pub async fn boleta_types(&self) -> Option<Value> {
        self.fetch_catalog(TYPES_PATH).await
    }

    /// Catalog of error levels (`boleta.electronica.nivel`).
    pub async fn error_levels(&self) -> Option<Value> {
        self.fetch_catalog(LEVELS_PATH).await
    }

    /// Catalog of validation sections (`boleta.electronica.seccion`).
    pub async fn sections(&self) -> Option<Value> {
        self.fetch_catalog(SECTIONS_PATH).await
    }

    async fn fetch_catalog(&self, path: &str) -> Option<Value> {
        let url = self.api_endpoint(path);
        debug!(%url, "fetching catalog");
        match self.fetch_json(self.client.get(url)).await {
            Ok(value) => Some(value),
            Err(err) => {
                error!(catalog = path, error = %err, "catalog lookup failed");
                None
            }
        }
    }

    async fn fetch_json(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("{e}: {body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{client_for, runtime, try_start_server};
    use httpmock::Method::GET;
    use serde_json::json;

    #[test]
    fn boleta_status_sends_query_parameters() {
        let server = match try_start_server() {
            Some(server) => server,
            None => return,
        };
        let status_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/recursos/v1/globales/boleta.electronica.estado")
                .query_param("rut_receptor", "66666666")
                .query_param("dv_receptor", "6")
                .query_param("monto", "1190")
                .query_param("fecha", "19-10-2026");
            then.status(200)
                .json_body(json!({ "codigo": 0, "estado": "DOK", "descripcion": "Documento Recibido" }));
        });

        runtime().block_on(async {
            let value = client_for(&server)
                .boleta_status("66666666", "6", 1190, "19-10-2026")
                .await
                .expect("status");
            assert_eq!(value["estado"], "DOK");
        });
        status_mock.assert();
    }

    #[test]
    fn boleta_status_returns_the_error() {
        let server = match try_start_server() {
            Some(server) => server,
            None => return,
        };
        server.mock(|when, then| {
            when.method(GET)
                .path("/recursos/v1/globales/boleta.electronica.estado");
            then.status(401).body("Unauthorized");
        });

        runtime().block_on(async {
            let result = client_for(&server)
                .boleta_status("66666666", "6", 1190, "19-10-2026")
                .await;
            match result {
                Err(ApiError::Status { status, body }) => {
                    assert_eq!(status, 401);
                    assert_eq!(body, "Unauthorized");
                }
                other => panic!("expected status error, got {other:?}"),
            }
        });
    }

    #[test]
    fn catalogs_return_raw_bodies() {
        let server = match try_start_server() {
            Some(server) => server,
            None => return,
        };
        let types = json!([{ "codigo": 39, "descripcion": "Boleta electrónica" }]);
        let levels = json!([{ "codigo": "ERR", "descripcion": "Error" }]);
        let sections = json!([{ "codigo": "HED", "descripcion": "Encabezado" }]);
        for (path, body) in [
            ("/recursos/v1/globales/boleta.electronica.tipo", &types),
            ("/recursos/v1/globales/boleta.electronica.nivel", &levels),
            ("/recursos/v1/globales/boleta.electronica.seccion", &sections),
        ] {
            let body = body.clone();
            server.mock(move |when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(body);
            });
        }

        runtime().block_on(async {
            let client = client_for(&server);
            assert_eq!(client.boleta_types().await, Some(types.clone()));
            assert_eq!(client.error_levels().await, Some(levels.clone()));
            assert_eq!(client.sections().await, Some(sections.clone()));
        });
    }

    #[test]
    fn catalogs_absorb_failures() {
        let server = match try_start_server() {
            Some(server) => server,
            None => return,
        };
        server.mock(|when, then| {
            when.method(GET)
                .path("/recursos/v1/globales/boleta.electronica.tipo");
            then.status(500).body("boom");
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/recursos/v1/globales/boleta.electronica.nivel");
            then.status(200).body("not json");
        });

        runtime().block_on(async {
            let client = client_for(&server);
            assert_eq!(client.boleta_types().await, None);
            assert_eq!(client.error_levels().await, None);
            // no mock registered: httpmock answers 404
            assert_eq!(client.sections().await, None);
        });
    }
}
