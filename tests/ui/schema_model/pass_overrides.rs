use schemaform::form::FieldKind;
use schemaform::schema::SchemaModel;
use schemaform::{FormOptions, FormSession};

#[allow(dead_code)]
#[derive(schemaform::SchemaModel)]
struct ContactForm {
    #[form(rename = "email", kind = "email")]
    address: String,
    #[form(kind = "select:India,USA,Canada")]
    country: String,
    #[form(kind = "button")]
    submit: (),
}

fn main() {
    let session = FormSession::from_schema(&ContactForm::form_schema(), FormOptions::default())
        .expect("session");
    let fields = session.fields().expect("fields");
    assert_eq!(fields[0].key(), "email");
    assert_eq!(fields[0].kind(), &FieldKind::Email);
    assert_eq!(
        fields[1].options(),
        Some(&["India".to_string(), "USA".to_string(), "Canada".to_string()][..])
    );
    assert!(!fields[2].needs_label());
}
