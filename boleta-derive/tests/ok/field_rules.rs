use boleta_derive::Validate;

#[derive(Validate)]
#[validate(non_empty)]
pub struct Method {
    #[validate(non_empty, single_line)]
    pub algorithm: String,
    pub certificate: String,
}

fn main() {
    assert!(Method::new("http://www.w3.org/2000/09/xmldsig#rsa-sha1".into(), "MIIB\nAAAA".into()).is_ok());

    let err = Method::new("http://a\nb".into(), "MIIB".into()).err();
    assert_eq!(err.as_deref(), Some("algorithm must be a single line"));
}
