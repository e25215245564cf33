use boleta_derive::Validate;

#[derive(Debug, PartialEq)]
pub struct BundleError(String);

impl From<String> for BundleError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

#[derive(Validate)]
#[validate(non_empty)]
#[validate_error(BundleError)]
pub struct Bundle {
    pub modulus: String,
}

fn main() {
    let err = Bundle::new(String::new()).err();
    assert_eq!(err, Some(BundleError("modulus must be non-empty".into())));
}
