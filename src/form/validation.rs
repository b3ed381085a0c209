use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::binding::BindingRegistry;
use super::controller::{EmailRule, FormOptions, FormResult};
use super::kind::FieldKind;
use super::model::FieldSpec;
use super::value::SubmissionRecord;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// The first rule violation found during a submit.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct SchemaValidationError {
    pub field: String,
    pub message: String,
}

impl SchemaValidationError {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("Please fill the '{field}' field."),
        }
    }

    pub fn invalid_email(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: INVALID_EMAIL_MESSAGE.to_string(),
        }
    }
}

pub type SubmitResult = Result<SubmissionRecord, SchemaValidationError>;

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Reads every bound field in model order and stops at the first violation.
///
/// Actions and unsupported placeholders are skipped. A bindable field with no
/// registered control reads as absent and fails the required rule.
pub fn collect_submission(
    fields: &[FieldSpec],
    bindings: &BindingRegistry,
    options: &FormOptions,
) -> FormResult<SubmitResult> {
    let mut record = SubmissionRecord::default();

    for (index, field) in fields.iter().enumerate() {
        if !field.kind().is_bindable() {
            continue;
        }
        let key = field.key();
        trace!(index, key, "validating field");

        let value = match bindings.current_value(key)? {
            Some(value) if !value.is_blank() => value,
            _ => return Ok(Err(SchemaValidationError::required(key))),
        };

        let malformed_email = applies_email_rule(field, options.email_rule)
            && value.as_str().is_some_and(|text| !is_valid_email(text));
        if malformed_email {
            return Ok(Err(SchemaValidationError::invalid_email(key)));
        }

        record.insert(key, value);
    }

    Ok(Ok(record))
}

fn applies_email_rule(field: &FieldSpec, rule: EmailRule) -> bool {
    let by_name = || field.key().eq_ignore_ascii_case("email");
    let by_kind = || matches!(field.kind(), FieldKind::Email);
    match rule {
        EmailRule::ByFieldName => by_name(),
        EmailRule::ByKind => by_kind(),
        EmailRule::ByNameOrKind => by_name() || by_kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_matches_simple_addresses() {
        assert!(is_valid_email("ann@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ann@example"));
        assert!(!is_valid_email("ann@@example.com"));
        assert!(!is_valid_email("ann smith@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn email_pattern_rejects_trailing_newline() {
        assert!(!is_valid_email("a@b.co\n"));
        assert!(!is_valid_email("ann@example.com\r\n"));
    }

    #[test]
    fn required_message_names_the_field() {
        let error = SchemaValidationError::required("firstName");
        assert_eq!(error.to_string(), "Please fill the 'firstName' field.");
        assert_eq!(error.field, "firstName");
    }

    #[test]
    fn email_rule_selection() {
        let named = FieldSpec::new("Email", FieldKind::Text);
        let typed = FieldSpec::new("contact", FieldKind::Email);
        assert!(applies_email_rule(&named, EmailRule::ByFieldName));
        assert!(!applies_email_rule(&typed, EmailRule::ByFieldName));
        assert!(!applies_email_rule(&named, EmailRule::ByKind));
        assert!(applies_email_rule(&typed, EmailRule::ByKind));
        assert!(applies_email_rule(&named, EmailRule::ByNameOrKind));
        assert!(applies_email_rule(&typed, EmailRule::ByNameOrKind));
    }
}
