#[allow(dead_code)]
#[derive(schemaform::SchemaModel)]
enum Plan {
    Free,
    Paid,
}

fn main() {}
