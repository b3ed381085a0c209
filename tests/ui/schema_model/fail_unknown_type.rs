#[allow(dead_code)]
#[derive(schemaform::SchemaModel)]
struct Profile {
    name: String,
    tags: Vec<String>,
}

fn main() {}
