use boleta_derive::Validate;

#[derive(Validate)]
#[validate(non_empty)]
pub struct Sample {
    pub name: String,

    #[validate(skip)]
    pub note: String,

    pub attempts: u32,
}

fn main() {
    let s = Sample::new("seed".into(), String::new(), 3);
    assert!(s.is_ok());
}
