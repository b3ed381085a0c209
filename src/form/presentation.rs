use super::kind::FieldKind;
use super::model::FieldSpec;

pub const UNSUPPORTED_CAPTION: &str = "Unsupported Type";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Keyboard {
    #[default]
    Default,
    Numeric,
    Email,
}

/// Render hints a toolkit needs to instantiate a widget for a field.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldPresentation {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub keyboard: Keyboard,
    pub masked: bool,
    pub caption: Option<String>,
    pub group: Option<String>,
}

impl FieldSpec {
    pub fn presentation(&self) -> FieldPresentation {
        let key = self.key();
        let label = self.needs_label().then(|| key.to_string());
        let base = FieldPresentation {
            label,
            ..FieldPresentation::default()
        };

        match self.kind() {
            FieldKind::Text => FieldPresentation {
                placeholder: Some(format!("Enter {key}")),
                ..base
            },
            FieldKind::Password => FieldPresentation {
                placeholder: Some(format!("Enter {key}")),
                masked: true,
                ..base
            },
            FieldKind::IntegerNumber | FieldKind::DecimalNumber => FieldPresentation {
                placeholder: Some(format!("Enter {key}")),
                keyboard: Keyboard::Numeric,
                ..base
            },
            FieldKind::Email => FieldPresentation {
                placeholder: Some(format!("Enter {key}")),
                keyboard: Keyboard::Email,
                ..base
            },
            FieldKind::SingleSelect(_) => FieldPresentation {
                placeholder: Some(format!("Select {key}")),
                ..base
            },
            FieldKind::SingleChoiceGroup(_) => FieldPresentation {
                group: Some(key.to_string()),
                ..base
            },
            FieldKind::Action => FieldPresentation {
                caption: Some(key.to_uppercase()),
                ..base
            },
            FieldKind::Unsupported => FieldPresentation {
                caption: Some(UNSUPPORTED_CAPTION.to_string()),
                ..base
            },
            FieldKind::Date | FieldKind::Boolean => base,
        }
    }
}
