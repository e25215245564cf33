//! Signature material used to authenticate against the token endpoint.
use boleta_derive::Validate;
use thiserror::Error;

/// Returned when a [`CredentialBundle`] field is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid credential bundle: {message}")]
pub struct CredentialError {
    message: String,
}

impl CredentialError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for CredentialError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// Pre-computed XML-DSig material for the seed signature.
///
/// The bundle only checks that every field is present; the digest and signature
/// values are produced elsewhere and passed through untouched. A single
/// `algorithm` URI is used for the canonicalization, signature, transform and
/// digest methods of the request envelope.
///
/// # Examples
/// ```rust
/// use boleta_core::credentials::CredentialBundle;
///
/// let creds = CredentialBundle::new(
///     "http://www.w3.org/2000/09/xmldsig#".into(),
///     "http://www.w3.org/2000/09/xmldsig#rsa-sha1".into(),
///     "#semilla".into(),
///     "tNxBc2yT5D...".into(),
///     "AQAB".into(),
///     "MIIGBjCCBO6gAwIBAgIC...".into(),
///     "dmVyeSBzaWduZWQ=".into(),
///     "c2lnbmF0dXJl".into(),
/// );
/// assert!(creds.is_ok());
/// ```
#[derive(Validate, Clone, PartialEq, Eq)]
#[validate(non_empty)]
#[validate_error(CredentialError)]
pub struct CredentialBundle {
    #[validate(non_empty, single_line)]
    xmlns: String,
    #[validate(non_empty, single_line)]
    algorithm: String,
    #[validate(non_empty, single_line)]
    reference_uri: String,
    modulus: String,
    exponent: String,
    x509_certificate: String,
    digest_value: String,
    signature_value: String,
}

impl CredentialBundle {
    pub fn xmlns(&self) -> &str {
        &self.xmlns
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn reference_uri(&self) -> &str {
        &self.reference_uri
    }

    pub fn modulus(&self) -> &str {
        &self.modulus
    }

    pub fn exponent(&self) -> &str {
        &self.exponent
    }

    pub fn x509_certificate(&self) -> &str {
        &self.x509_certificate
    }

    pub fn digest_value(&self) -> &str {
        &self.digest_value
    }

    pub fn signature_value(&self) -> &str {
        &self.signature_value
    }
}

// Key material stays out of logs.
impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("xmlns", &self.xmlns)
            .field("algorithm", &self.algorithm)
            .field("reference_uri", &self.reference_uri)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle_with(reference_uri: &str, certificate: &str) -> Result<CredentialBundle, CredentialError> {
        CredentialBundle::new(
            "http://www.w3.org/2000/09/xmldsig#".into(),
            "http://www.w3.org/2000/09/xmldsig#rsa-sha1".into(),
            reference_uri.into(),
            "tNxBc2yT5D".into(),
            "AQAB".into(),
            certificate.into(),
            "ZGlnZXN0".into(),
            "c2lnbmF0dXJl".into(),
        )
    }

    #[test]
    fn accepts_complete_bundle() {
        let creds = bundle_with("#semilla", "MIIGBjCC\nBO6gAwIB").expect("valid bundle");
        assert_eq!(creds.reference_uri(), "#semilla");
        assert_eq!(creds.exponent(), "AQAB");
        assert_eq!(creds.x509_certificate(), "MIIGBjCC\nBO6gAwIB");
    }

    #[test]
    fn rejects_blank_fields() {
        let err = bundle_with("#semilla", "  ").expect_err("blank certificate");
        assert_eq!(err.message(), "x509_certificate must be non-empty");

        let err = bundle_with("", "MIIG").expect_err("empty uri");
        assert_eq!(err.message(), "reference_uri must be non-empty");
    }

    #[test]
    fn rejects_multiline_uris() {
        let err = bundle_with("#semilla\n", "MIIG").expect_err("multiline uri");
        assert_eq!(err.message(), "reference_uri must be a single line");
    }

    #[test]
    fn debug_omits_key_material() {
        let creds = bundle_with("#semilla", "MIIGBjCC").expect("valid bundle");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("#semilla"));
        assert!(!rendered.contains("c2lnbmF0dXJl"));
        assert!(!rendered.contains("MIIGBjCC"));
    }
}
