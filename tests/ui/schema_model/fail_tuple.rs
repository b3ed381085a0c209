#[allow(dead_code)]
#[derive(schemaform::SchemaModel)]
struct Pair(String, u32);

fn main() {}
