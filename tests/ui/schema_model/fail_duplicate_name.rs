#[allow(dead_code)]
#[derive(schemaform::SchemaModel)]
struct Contact {
    email: String,
    #[form(rename = "email")]
    backup_email: String,
}

fn main() {}
