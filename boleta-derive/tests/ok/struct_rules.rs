use boleta_derive::Validate;

#[derive(Validate)]
#[validate(non_empty)]
pub struct Reference {
    pub uri: String,
    pub digest: String,
}

fn main() {
    assert!(Reference::new("#seed".into(), "c2VlZA==".into()).is_ok());

    let err = Reference::new("#seed".into(), "   ".into()).err();
    assert_eq!(err.as_deref(), Some("digest must be non-empty"));
}
