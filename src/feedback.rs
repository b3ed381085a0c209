use crate::form::SubmitResult;

pub const VALIDATION_ERROR_TITLE: &str = "Validation Error";
pub const SUBMITTED_TITLE: &str = "Form Submitted";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A modal message a toolkit shows after a submit attempt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub field: Option<String>,
}

impl Notice {
    pub fn from_outcome(outcome: &SubmitResult) -> Self {
        match outcome {
            Ok(record) => Self {
                kind: NoticeKind::Success,
                title: SUBMITTED_TITLE.to_string(),
                message: record.summary(),
                field: None,
            },
            Err(error) => Self {
                kind: NoticeKind::Error,
                title: VALIDATION_ERROR_TITLE.to_string(),
                message: error.message.clone(),
                field: Some(error.field.clone()),
            },
        }
    }
}
