use boleta_core::api::SiiClient;
use boleta_core::config::{Config, EnvironmentType};
use boleta_core::credentials::CredentialBundle;
use httpmock::MockServer;

pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";
pub const RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";

pub fn dummy_credentials() -> CredentialBundle {
    CredentialBundle::new(
        XMLDSIG_NS.into(),
        RSA_SHA1.into(),
        "#semilla".into(),
        "vGfA2TtzKE5pYdm5yPgP8zOKq1ycWJUnGJBA1jQGSxbPiq7pn3PZsKcQc2PYyQ".into(),
        "AQAB".into(),
        "MIIGBjCCBO6gAwIBAgICCNQwDQYJKoZIhvcNAQEFBQAwgakxCzAJBgNVBAYTAkNM".into(),
        "hlmQtu/AyjUjTDhM3852wvRCr8w=".into(),
        "JG1Ig0pvSIH85kIKGRZUjkyX6CNaY08Y94j4UegaKdkjErs7wFD4Q7VoHxtjTZ6G".into(),
    )
    .expect("valid credential bundle")
}

#[allow(dead_code)]
pub fn try_start_server() -> Option<MockServer> {
    std::panic::catch_unwind(MockServer::start).ok()
}

/// Client with both base URLs pointing at `server`.
#[allow(dead_code)]
pub fn mock_client(server: &MockServer) -> SiiClient {
    let config = Config::new(EnvironmentType::Certification)
        .with_api_url(server.url("/recursos/v1"))
        .with_envios_url(server.url("/recursos/v1"));
    SiiClient::new(config, dummy_credentials()).expect("client builds")
}
