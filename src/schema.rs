use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use futures_timer::Delay;
use indexmap::IndexMap;
use tracing::debug;

use crate::form::{FormError, FormResult};

pub use schemaform_derive::SchemaModel;

/// Ordered mapping from field name to type descriptor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FormSchema {
    entries: IndexMap<String, String>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JSON object whose values are descriptor strings, keeping
    /// document order.
    pub fn from_json(json: &str) -> FormResult<Self> {
        let entries = serde_json::from_str::<IndexMap<String, String>>(json)
            .map_err(|error| FormError::SchemaDecode(error.to_string()))?;
        debug!(entries = entries.len(), "decoded form schema");
        Ok(Self { entries })
    }

    /// Appends a field, or replaces the descriptor of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: impl Into<String>) {
        self.entries.insert(key.into(), descriptor.into());
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, descriptor)| (key.as_str(), descriptor.as_str()))
    }

    pub fn descriptor(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormSchema
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, descriptor)| (key.into(), descriptor.into()))
                .collect(),
        }
    }
}

/// Types that carry a schema known at compile time.
pub trait SchemaModel {
    fn form_schema() -> FormSchema;
}

pub type BoxedSchemaFuture<'a> = Pin<Box<dyn Future<Output = FormResult<String>> + Send + 'a>>;

/// Asynchronous provider of raw schema text.
pub trait SchemaSource: Send + Sync {
    type Fut<'a>: Future<Output = FormResult<String>> + Send + 'a
    where
        Self: 'a;

    fn fetch(&self) -> Self::Fut<'_>;
}

impl<F> SchemaSource for F
where
    F: Fn() -> BoxedSchemaFuture<'static> + Send + Sync,
{
    type Fut<'a>
        = BoxedSchemaFuture<'static>
    where
        Self: 'a;

    fn fetch(&self) -> Self::Fut<'_> {
        (self)()
    }
}

const SAMPLE_SCHEMA: &str = r#"{
    "firstName": "string",
    "password": "password",
    "age": "int",
    "email": "email",
    "gender": "radio:Male,Female,Other",
    "country": "select:India,USA,Canada",
    "dob": "date",
    "isMember": "bool",
    "submit": "button"
}"#;

/// Serves fixed schema text, optionally after a simulated round trip.
#[derive(Clone, Debug)]
pub struct StaticSchemaSource {
    json: String,
    latency: Duration,
}

impl StaticSchemaSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json: json.into(),
            latency: Duration::ZERO,
        }
    }

    pub fn latency(mut self, value: Duration) -> Self {
        self.latency = value;
        self
    }

    /// The registration form used by the demo backend, with its 500 ms delay.
    pub fn sample() -> Self {
        Self::new(SAMPLE_SCHEMA).latency(Duration::from_millis(500))
    }
}

impl SchemaSource for StaticSchemaSource {
    type Fut<'a> = BoxedSchemaFuture<'a>;

    fn fetch(&self) -> Self::Fut<'_> {
        Box::pin(async move {
            if !self.latency.is_zero() {
                Delay::new(self.latency).await;
            }
            Ok(self.json.clone())
        })
    }
}
