//! JSON body posted to `boleta.electronica.token`.
use serde::Serialize;

use super::Seed;
use crate::credentials::CredentialBundle;

/// Signed seed, shaped the way the token endpoint expects it.
///
/// # Examples
/// ```rust
/// use boleta_core::auth::{AuthRequest, Seed};
/// use boleta_core::credentials::CredentialBundle;
///
/// let creds = CredentialBundle::new(
///     "http://www.w3.org/2000/09/xmldsig#".into(),
///     "http://www.w3.org/2000/09/xmldsig#rsa-sha1".into(),
///     "#semilla".into(),
///     "tNxBc2yT5D".into(),
///     "AQAB".into(),
///     "MIIGBjCC".into(),
///     "ZGlnZXN0".into(),
///     "c2lnbmF0dXJl".into(),
/// )?;
/// let body = AuthRequest::build(&Seed::new("031364523574"), &creds);
/// assert_eq!(body.seed(), "031364523574");
/// # Ok::<(), boleta_core::credentials::CredentialError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRequest {
    item: Item,
    #[serde(rename = "Signature")]
    signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Item {
    #[serde(rename = "Semilla")]
    semilla: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Signature {
    xmlns: String,
    #[serde(rename = "SignedInfo")]
    signed_info: SignedInfo,
}

// SignatureValue and KeyInfo sit inside SignedInfo in this envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct SignedInfo {
    #[serde(rename = "CanonicalizationMethod")]
    canonicalization_method: Algorithm,
    #[serde(rename = "SignatureMethod")]
    signature_method: Algorithm,
    #[serde(rename = "Reference")]
    reference: Reference,
    #[serde(rename = "SignatureValue")]
    signature_value: String,
    #[serde(rename = "KeyInfo")]
    key_info: KeyInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Algorithm {
    #[serde(rename = "Algorithm")]
    algorithm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Reference {
    #[serde(rename = "URI")]
    uri: String,
    #[serde(rename = "Transforms")]
    transforms: Transforms,
    #[serde(rename = "DigestMethod")]
    digest_method: Algorithm,
    #[serde(rename = "DigestValue")]
    digest_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Transforms {
    #[serde(rename = "Transform")]
    transform: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct KeyInfo {
    #[serde(rename = "KeyValue")]
    key_value: KeyValue,
    #[serde(rename = "X509Data")]
    x509_data: X509Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct KeyValue {
    #[serde(rename = "RSAKeyValue")]
    rsa_key_value: RsaKeyValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RsaKeyValue {
    #[serde(rename = "Modulus")]
    modulus: String,
    #[serde(rename = "Exponent")]
    exponent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct X509Data {
    #[serde(rename = "X509Certificate")]
    x509_certificate: String,
}

impl Algorithm {
    fn new(algorithm: &str) -> Self {
        Self {
            algorithm: algorithm.to_string(),
        }
    }
}

impl AuthRequest {
    /// Assemble the request body. Pure: no I/O and no cryptography, values are
    /// copied verbatim from `seed` and `creds`.
    pub fn build(seed: &Seed, creds: &CredentialBundle) -> Self {
        let algorithm = creds.algorithm();
        Self {
            item: Item {
                semilla: seed.as_str().to_string(),
            },
            signature: Signature {
                xmlns: creds.xmlns().to_string(),
                signed_info: SignedInfo {
                    canonicalization_method: Algorithm::new(algorithm),
                    signature_method: Algorithm::new(algorithm),
                    reference: Reference {
                        uri: creds.reference_uri().to_string(),
                        transforms: Transforms {
                            transform: Algorithm::new(algorithm),
                        },
                        digest_method: Algorithm::new(algorithm),
                        digest_value: creds.digest_value().to_string(),
                    },
                    signature_value: creds.signature_value().to_string(),
                    key_info: KeyInfo {
                        key_value: KeyValue {
                            rsa_key_value: RsaKeyValue {
                                modulus: creds.modulus().to_string(),
                                exponent: creds.exponent().to_string(),
                            },
                        },
                        x509_data: X509Data {
                            x509_certificate: creds.x509_certificate().to_string(),
                        },
                    },
                },
            },
        }
    }

    pub fn seed(&self) -> &str {
        &self.item.semilla
    }
}
