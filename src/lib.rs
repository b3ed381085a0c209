pub mod feedback;
pub mod form;
pub mod schema;

pub use form::{FieldKind, FieldSpec, FormOptions, FormSession, SubmissionRecord};
pub use schema::{FormSchema, SchemaModel, SchemaSource, StaticSchemaSource};
