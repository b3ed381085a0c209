use schemaform::schema::SchemaModel;

#[allow(dead_code)]
#[derive(schemaform::SchemaModel)]
struct SignupForm {
    first_name: String,
    age: u32,
    weight: f64,
    is_member: bool,
}

fn main() {
    let schema = SignupForm::form_schema();
    assert_eq!(
        schema.entries().collect::<Vec<_>>(),
        vec![
            ("first_name", "string"),
            ("age", "int"),
            ("weight", "double"),
            ("is_member", "bool"),
        ]
    );
}
