use tracing::debug;

use super::kind::FieldKind;
use crate::schema::FormSchema;

/// One schema entry as seen by renderers and the submit pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldSpec {
    key: String,
    kind: FieldKind,
    needs_label: bool,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        let needs_label = !kind.is_action();
        Self {
            key: key.into(),
            kind,
            needs_label,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn options(&self) -> Option<&[String]> {
        self.kind.options()
    }

    pub fn needs_label(&self) -> bool {
        self.needs_label
    }
}

/// Builds the ordered field list. Output order and length always match the
/// schema; entries are never merged, even when keys differ only in case.
pub fn build_form_model(schema: &FormSchema) -> Vec<FieldSpec> {
    let fields = schema
        .entries()
        .map(|(key, descriptor)| FieldSpec::new(key, FieldKind::parse(descriptor)))
        .collect::<Vec<_>>();
    debug!(fields = fields.len(), "built form model");
    fields
}
