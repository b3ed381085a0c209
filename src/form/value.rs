use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use indexmap::map::Iter;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};

/// Value read from a bound control at submit time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DynamicValue {
    Text(String),
    Bool(bool),
    Date(NaiveDate),
}

impl DynamicValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// True for empty or all-whitespace text. Non-text values are never blank.
    pub fn is_blank(&self) -> bool {
        self.as_str().is_some_and(|text| text.trim().is_empty())
    }

    /// Numeric entries are collected as text; this parses them on demand.
    pub fn as_decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.as_str()?.trim()).ok()
    }

    pub fn as_integer(&self) -> Option<i64> {
        let decimal = self.as_decimal()?;
        if !decimal.fract().is_zero() {
            return None;
        }
        decimal.to_i64()
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Bool(value) => Value::Bool(*value),
            Self::Date(date) => Value::String(date.to_string()),
        }
    }
}

impl Display for DynamicValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for DynamicValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// Values collected by a successful submit, in schema order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubmissionRecord {
    values: IndexMap<String, DynamicValue>,
}

impl SubmissionRecord {
    pub(super) fn insert(&mut self, key: impl Into<String>, value: DynamicValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, DynamicValue> {
        self.values.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `key: value` lines in schema order.
    pub fn summary(&self) -> String {
        self.values
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect::<Map<_, _>>(),
        )
    }

    pub fn into_inner(self) -> IndexMap<String, DynamicValue> {
        self.values
    }
}

impl<'a> IntoIterator for &'a SubmissionRecord {
    type Item = (&'a String, &'a DynamicValue);
    type IntoIter = Iter<'a, String, DynamicValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
