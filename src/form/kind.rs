use std::convert::Infallible;
use std::str::FromStr;

const SELECT_PREFIX: &str = "select:";
const RADIO_PREFIX: &str = "radio:";

/// Widget kind derived from a schema type descriptor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FieldKind {
    Text,
    Password,
    IntegerNumber,
    DecimalNumber,
    Email,
    Date,
    Boolean,
    SingleSelect(Vec<String>),
    SingleChoiceGroup(Vec<String>),
    Action,
    Unsupported,
}

/// Shape of the live control a field binds to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ControlKind {
    Text,
    Toggle,
    Select,
    Date,
    ChoiceGroup,
}

impl FieldKind {
    /// Parses a raw descriptor. Matching is case-insensitive and never fails:
    /// anything unrecognized becomes [`FieldKind::Unsupported`].
    pub fn parse(descriptor: &str) -> Self {
        if let Some(rest) = strip_prefix_ignore_case(descriptor, SELECT_PREFIX) {
            return Self::SingleSelect(split_options(rest));
        }
        if let Some(rest) = strip_prefix_ignore_case(descriptor, RADIO_PREFIX) {
            return Self::SingleChoiceGroup(split_options(rest));
        }

        match descriptor.to_ascii_lowercase().as_str() {
            "string" => Self::Text,
            "password" => Self::Password,
            "int" => Self::IntegerNumber,
            "double" => Self::DecimalNumber,
            "email" => Self::Email,
            "date" => Self::Date,
            "bool" => Self::Boolean,
            "button" => Self::Action,
            _ => Self::Unsupported,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::SingleSelect(options) | Self::SingleChoiceGroup(options) => Some(options),
            _ => None,
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action)
    }

    /// Text-like kinds share a single string entry control.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Password | Self::IntegerNumber | Self::DecimalNumber | Self::Email
        )
    }

    /// `None` for kinds that never hold a value (actions and placeholders).
    pub fn control_kind(&self) -> Option<ControlKind> {
        match self {
            kind if kind.is_text_like() => Some(ControlKind::Text),
            Self::Boolean => Some(ControlKind::Toggle),
            Self::Date => Some(ControlKind::Date),
            Self::SingleSelect(_) => Some(ControlKind::Select),
            Self::SingleChoiceGroup(_) => Some(ControlKind::ChoiceGroup),
            _ => None,
        }
    }

    pub fn is_bindable(&self) -> bool {
        self.control_kind().is_some()
    }
}

impl FromStr for FieldKind {
    type Err = Infallible;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(descriptor))
    }
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &value[prefix.len()..])
}

fn split_options(rest: &str) -> Vec<String> {
    if rest.is_empty() {
        return Vec::new();
    }
    rest.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_descriptors_ignore_case() {
        assert_eq!(FieldKind::parse("STRING"), FieldKind::Text);
        assert_eq!(FieldKind::parse("Password"), FieldKind::Password);
        assert_eq!(FieldKind::parse("int"), FieldKind::IntegerNumber);
        assert_eq!(FieldKind::parse("Double"), FieldKind::DecimalNumber);
        assert_eq!(FieldKind::parse("eMail"), FieldKind::Email);
        assert_eq!(FieldKind::parse("date"), FieldKind::Date);
        assert_eq!(FieldKind::parse("BOOL"), FieldKind::Boolean);
        assert_eq!(FieldKind::parse("Button"), FieldKind::Action);
    }

    #[test]
    fn select_and_radio_share_option_list() {
        let select = FieldKind::parse("select:A,B,C");
        let radio = FieldKind::parse("radio:A,B,C");
        assert_eq!(select.options(), radio.options());
        assert_eq!(
            select.options().map(<[String]>::to_vec),
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
        assert!(matches!(select, FieldKind::SingleSelect(_)));
        assert!(matches!(radio, FieldKind::SingleChoiceGroup(_)));
    }

    #[test]
    fn compound_prefix_is_case_insensitive_but_options_are_verbatim() {
        assert_eq!(
            FieldKind::parse("SELECT: India ,usa"),
            FieldKind::SingleSelect(vec![" India ".to_string(), "usa".to_string()])
        );
        assert_eq!(
            FieldKind::parse("Radio:a,,b"),
            FieldKind::SingleChoiceGroup(vec!["a".to_string(), String::new(), "b".to_string()])
        );
    }

    #[test]
    fn empty_option_list_is_legal() {
        assert_eq!(FieldKind::parse("select:"), FieldKind::SingleSelect(Vec::new()));
        assert_eq!(FieldKind::parse("radio:"), FieldKind::SingleChoiceGroup(Vec::new()));
    }

    #[test]
    fn unknown_descriptors_degrade_to_unsupported() {
        for raw in ["", "text", "selec", "select", "radio", "strings", " int", "ratio:a"] {
            assert_eq!(FieldKind::parse(raw), FieldKind::Unsupported, "{raw:?}");
        }
        // prefix length lands inside a multi-byte char
        assert_eq!(FieldKind::parse("selecté"), FieldKind::Unsupported);
    }

    #[test]
    fn parsing_is_idempotent() {
        for raw in ["string", "select:x,y", "radio:", "whatever", "BUTTON"] {
            assert_eq!(FieldKind::parse(raw), FieldKind::parse(raw));
            assert_eq!(raw.parse::<FieldKind>(), Ok(FieldKind::parse(raw)));
        }
    }

    #[test]
    fn only_value_kinds_are_bindable() {
        assert!(!FieldKind::Action.is_bindable());
        assert!(!FieldKind::Unsupported.is_bindable());
        assert_eq!(FieldKind::Email.control_kind(), Some(ControlKind::Text));
        assert_eq!(
            FieldKind::SingleChoiceGroup(Vec::new()).control_kind(),
            Some(ControlKind::ChoiceGroup)
        );
    }
}
