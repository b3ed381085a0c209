#[allow(dead_code)]
#[derive(schemaform::SchemaModel)]
struct Wrapper<T> {
    value: T,
}

fn main() {}
