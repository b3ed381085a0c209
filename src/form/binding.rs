use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;

use super::controller::{FormOptions, FormResult, UntouchedDate, read_lock, write_lock};
use super::kind::{ControlKind, FieldKind};
use super::model::FieldSpec;
use super::value::DynamicValue;

/// Read side of a live input control.
///
/// Renderers keep a clone of the concrete control and write into it as the
/// user interacts; the registry only ever reads through this trait.
pub trait ControlHandle: Send + Sync + 'static {
    fn control_kind(&self) -> ControlKind;

    /// `Ok(None)` means the control currently holds no value.
    fn current_value(&self) -> FormResult<Option<DynamicValue>>;

    /// Choices offered by select and group controls.
    fn options(&self) -> Option<&[String]> {
        None
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextControl {
    text: Arc<RwLock<String>>,
}

impl TextControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(RwLock::new(text.into())),
        }
    }

    pub fn set_text(&self, text: impl Into<String>) -> FormResult<()> {
        *write_lock(&self.text, "writing text control")? = text.into();
        Ok(())
    }

    pub fn text(&self) -> FormResult<String> {
        Ok(read_lock(&self.text, "reading text control")?.clone())
    }
}

impl ControlHandle for TextControl {
    fn control_kind(&self) -> ControlKind {
        ControlKind::Text
    }

    fn current_value(&self) -> FormResult<Option<DynamicValue>> {
        Ok(Some(DynamicValue::Text(self.text()?)))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ToggleControl {
    toggled: Arc<RwLock<bool>>,
}

impl ToggleControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_toggled(&self, toggled: bool) -> FormResult<()> {
        *write_lock(&self.toggled, "writing toggle control")? = toggled;
        Ok(())
    }

    pub fn is_toggled(&self) -> FormResult<bool> {
        Ok(*read_lock(&self.toggled, "reading toggle control")?)
    }
}

impl ControlHandle for ToggleControl {
    fn control_kind(&self) -> ControlKind {
        ControlKind::Toggle
    }

    fn current_value(&self) -> FormResult<Option<DynamicValue>> {
        Ok(Some(DynamicValue::Bool(self.is_toggled()?)))
    }
}

/// Index-based single choice shared by selects and radio groups.
#[derive(Clone, Debug, Default)]
struct Choice {
    options: Arc<[String]>,
    chosen: Arc<RwLock<Option<usize>>>,
}

impl Choice {
    fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            chosen: Arc::new(RwLock::new(None)),
        }
    }

    fn choose_index(&self, index: usize, context: &'static str) -> FormResult<bool> {
        if index >= self.options.len() {
            return Ok(false);
        }
        *write_lock(&self.chosen, context)? = Some(index);
        Ok(true)
    }

    fn choose(&self, option: &str, context: &'static str) -> FormResult<bool> {
        match self.options.iter().position(|candidate| candidate == option) {
            Some(index) => self.choose_index(index, context),
            None => Ok(false),
        }
    }

    fn reset(&self, context: &'static str) -> FormResult<()> {
        *write_lock(&self.chosen, context)? = None;
        Ok(())
    }

    fn chosen(&self, context: &'static str) -> FormResult<Option<String>> {
        let chosen = *read_lock(&self.chosen, context)?;
        Ok(chosen.and_then(|index| self.options.get(index).cloned()))
    }
}

#[derive(Clone, Debug, Default)]
pub struct SelectControl {
    choice: Choice,
}

impl SelectControl {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choice: Choice::new(options),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.choice.options
    }

    /// Returns `false` when `option` is not one of the offered options.
    pub fn select(&self, option: &str) -> FormResult<bool> {
        self.choice.choose(option, "selecting option")
    }

    pub fn select_index(&self, index: usize) -> FormResult<bool> {
        self.choice.choose_index(index, "selecting option by index")
    }

    pub fn clear_selection(&self) -> FormResult<()> {
        self.choice.reset("clearing selection")
    }

    pub fn selected(&self) -> FormResult<Option<String>> {
        self.choice.chosen("reading selection")
    }
}

impl ControlHandle for SelectControl {
    fn control_kind(&self) -> ControlKind {
        ControlKind::Select
    }

    fn current_value(&self) -> FormResult<Option<DynamicValue>> {
        Ok(self.selected()?.map(DynamicValue::Text))
    }

    fn options(&self) -> Option<&[String]> {
        Some(&self.choice.options[..])
    }
}

/// Mutually exclusive group: checking one member unchecks the others.
#[derive(Clone, Debug, Default)]
pub struct ChoiceGroupControl {
    choice: Choice,
}

impl ChoiceGroupControl {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choice: Choice::new(members),
        }
    }

    pub fn members(&self) -> &[String] {
        &self.choice.options
    }

    pub fn check(&self, member: &str) -> FormResult<bool> {
        self.choice.choose(member, "checking group member")
    }

    pub fn check_index(&self, index: usize) -> FormResult<bool> {
        self.choice.choose_index(index, "checking group member by index")
    }

    pub fn uncheck_all(&self) -> FormResult<()> {
        self.choice.reset("unchecking group")
    }

    pub fn checked(&self) -> FormResult<Option<String>> {
        self.choice.chosen("reading checked group member")
    }

    pub fn is_checked(&self, member: &str) -> FormResult<bool> {
        Ok(self.checked()?.as_deref() == Some(member))
    }
}

impl ControlHandle for ChoiceGroupControl {
    fn control_kind(&self) -> ControlKind {
        ControlKind::ChoiceGroup
    }

    fn current_value(&self) -> FormResult<Option<DynamicValue>> {
        Ok(self.checked()?.map(DynamicValue::Text))
    }

    fn options(&self) -> Option<&[String]> {
        Some(&self.choice.options[..])
    }
}

#[derive(Clone, Debug, Default)]
pub struct DateControl {
    date: Arc<RwLock<Option<NaiveDate>>>,
    untouched: UntouchedDate,
}

impl DateControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_untouched(untouched: UntouchedDate) -> Self {
        Self {
            untouched,
            ..Self::default()
        }
    }

    pub fn set_date(&self, date: NaiveDate) -> FormResult<()> {
        *write_lock(&self.date, "writing date control")? = Some(date);
        Ok(())
    }

    pub fn reset(&self) -> FormResult<()> {
        *write_lock(&self.date, "resetting date control")? = None;
        Ok(())
    }

    /// The picked date, or the untouched default when nothing was picked.
    pub fn date(&self) -> FormResult<Option<NaiveDate>> {
        let picked = *read_lock(&self.date, "reading date control")?;
        Ok(picked.or_else(|| match self.untouched {
            UntouchedDate::Absent => None,
            UntouchedDate::Today => Some(Local::now().date_naive()),
        }))
    }
}

impl ControlHandle for DateControl {
    fn control_kind(&self) -> ControlKind {
        ControlKind::Date
    }

    fn current_value(&self) -> FormResult<Option<DynamicValue>> {
        Ok(self.date()?.map(DynamicValue::Date))
    }
}

/// A control matching a field's kind, ready to hand to a renderer.
#[derive(Clone, Debug)]
pub enum Control {
    Text(TextControl),
    Toggle(ToggleControl),
    Select(SelectControl),
    Date(DateControl),
    ChoiceGroup(ChoiceGroupControl),
}

impl Control {
    /// `None` for actions and unsupported placeholders.
    pub fn for_field(field: &FieldSpec, options: &FormOptions) -> Option<Self> {
        let control = match field.kind() {
            kind if kind.is_text_like() => Self::Text(TextControl::new()),
            FieldKind::Boolean => Self::Toggle(ToggleControl::new()),
            FieldKind::Date => Self::Date(DateControl::with_untouched(options.untouched_date)),
            FieldKind::SingleSelect(choices) => {
                Self::Select(SelectControl::new(choices.iter().cloned()))
            }
            FieldKind::SingleChoiceGroup(members) => {
                Self::ChoiceGroup(ChoiceGroupControl::new(members.iter().cloned()))
            }
            _ => return None,
        };
        Some(control)
    }

    fn handle(&self) -> &dyn ControlHandle {
        match self {
            Self::Text(control) => control,
            Self::Toggle(control) => control,
            Self::Select(control) => control,
            Self::Date(control) => control,
            Self::ChoiceGroup(control) => control,
        }
    }
}

impl ControlHandle for Control {
    fn control_kind(&self) -> ControlKind {
        self.handle().control_kind()
    }

    fn current_value(&self) -> FormResult<Option<DynamicValue>> {
        self.handle().current_value()
    }

    fn options(&self) -> Option<&[String]> {
        self.handle().options()
    }
}

/// Field key to live control. Owned by one form session; cleared on rebuild.
#[derive(Default)]
pub struct BindingRegistry {
    handles: IndexMap<String, Box<dyn ControlHandle>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handle` to `key`, replacing any previous binding.
    pub fn register(&mut self, key: impl Into<String>, handle: impl ControlHandle) {
        self.handles.insert(key.into(), Box::new(handle));
    }

    pub fn current_value(&self, key: &str) -> FormResult<Option<DynamicValue>> {
        match self.handles.get(key) {
            Some(handle) => handle.current_value(),
            None => Ok(None),
        }
    }

    pub fn control_kind(&self, key: &str) -> Option<ControlKind> {
        self.handles.get(key).map(|handle| handle.control_kind())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handles.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_control_reads_what_the_renderer_wrote() {
        let control = TextControl::new();
        let renderer_side = control.clone();
        assert_eq!(
            control.current_value().expect("read"),
            Some(DynamicValue::from(""))
        );
        renderer_side.set_text("Ann").expect("write");
        assert_eq!(
            control.current_value().expect("read"),
            Some(DynamicValue::from("Ann"))
        );
    }

    #[test]
    fn select_is_absent_until_a_known_option_is_chosen() {
        let control = SelectControl::new(["India", "USA"]);
        assert_eq!(control.current_value().expect("read"), None);
        assert!(!control.select("Mars").expect("select"));
        assert_eq!(control.current_value().expect("read"), None);
        assert!(control.select("USA").expect("select"));
        assert_eq!(
            control.current_value().expect("read"),
            Some(DynamicValue::from("USA"))
        );
        assert!(!control.select_index(5).expect("select index"));
        control.clear_selection().expect("clear");
        assert_eq!(control.current_value().expect("read"), None);
    }

    #[test]
    fn choice_group_keeps_a_single_checked_member() {
        let group = ChoiceGroupControl::new(["Male", "Female", "Other"]);
        assert_eq!(group.current_value().expect("read"), None);
        group.check("Male").expect("check");
        group.check_index(2).expect("check index");
        assert!(!group.is_checked("Male").expect("is checked"));
        assert_eq!(
            group.current_value().expect("read"),
            Some(DynamicValue::from("Other"))
        );
    }

    #[test]
    fn untouched_date_follows_configured_default() {
        let absent = DateControl::new();
        assert_eq!(absent.current_value().expect("read"), None);

        let today = DateControl::with_untouched(UntouchedDate::Today);
        assert!(today.date().expect("read").is_some());

        let picked = NaiveDate::from_ymd_opt(2001, 1, 31).expect("valid date");
        absent.set_date(picked).expect("write");
        assert_eq!(
            absent.current_value().expect("read"),
            Some(DynamicValue::Date(picked))
        );
        absent.reset().expect("reset");
        assert_eq!(absent.current_value().expect("read"), None);
    }

    #[test]
    fn registry_overwrites_and_clears() {
        let mut registry = BindingRegistry::new();
        registry.register("name", TextControl::with_text("old"));
        registry.register("name", TextControl::with_text("new"));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.current_value("name").expect("read"),
            Some(DynamicValue::from("new"))
        );

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.current_value("name").expect("read"), None);
    }

    #[test]
    fn control_for_field_matches_kind() {
        let options = FormOptions::default();
        let action = FieldSpec::new("submit", FieldKind::Action);
        assert!(Control::for_field(&action, &options).is_none());
        let odd = FieldSpec::new("odd", FieldKind::Unsupported);
        assert!(Control::for_field(&odd, &options).is_none());

        let country = FieldSpec::new("country", FieldKind::parse("select:India,USA"));
        let Some(Control::Select(select)) = Control::for_field(&country, &options) else {
            panic!("select field should produce a select control");
        };
        assert_eq!(select.options(), ["India".to_string(), "USA".to_string()]);

        let age = FieldSpec::new("age", FieldKind::IntegerNumber);
        let control = Control::for_field(&age, &options).expect("text control");
        assert_eq!(control.control_kind(), ControlKind::Text);
    }
}
