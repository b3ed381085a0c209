use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::binding::{BindingRegistry, Control, ControlHandle};
use super::kind::ControlKind;
use super::model::{FieldSpec, build_form_model};
use super::validation::{SchemaValidationError, SubmitResult, collect_submission};
use super::value::DynamicValue;
use crate::schema::{FormSchema, SchemaSource};

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitState {
    Idle,
    Validating,
    Succeeded,
    Failed,
}

/// Which fields the email format rule applies to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EmailRule {
    /// Fields whose key is `email`, compared case-insensitively, whatever
    /// their declared kind.
    #[default]
    ByFieldName,
    /// Fields declared with the `email` descriptor.
    ByKind,
    ByNameOrKind,
}

/// Value of a date control nobody has touched yet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UntouchedDate {
    /// No value, so the required rule rejects it.
    #[default]
    Absent,
    /// The local calendar date at read time.
    Today,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FormOptions {
    pub email_rule: EmailRule,
    pub untouched_date: UntouchedDate,
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("form state lock poisoned while {0}")]
    StatePoisoned(&'static str),
    #[error("invalid submit state transition: {from:?} -> {to:?}")]
    InvalidStateTransition { from: SubmitState, to: SubmitState },
    #[error("form submit is already in progress")]
    AlreadySubmitting,
    #[error("no field named '{0}' in the form model")]
    UnknownField(String),
    #[error("field '{0}' does not hold a value and cannot be bound")]
    NotBindable(String),
    #[error("field '{key}' expects a {expected:?} control, got {actual:?}")]
    ControlKindMismatch {
        key: String,
        expected: ControlKind,
        actual: ControlKind,
    },
    #[error("field '{key}' offers {expected:?}, control offers {actual:?}")]
    OptionMismatch {
        key: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("failed to decode schema: {0}")]
    SchemaDecode(String),
    #[error("failed to fetch schema: {0}")]
    SchemaFetch(String),
}

pub type FormResult<T> = Result<T, FormError>;

#[derive(Clone, Debug)]
pub struct FormSnapshot {
    pub id: FormId,
    pub fields: Vec<FieldSpec>,
    pub bound_keys: Vec<String>,
    pub submit_state: SubmitState,
    pub submit_count: u32,
    pub last_error: Option<SchemaValidationError>,
}

struct SessionState {
    id: FormId,
    fields: Vec<FieldSpec>,
    submit_state: SubmitState,
    submit_count: u32,
    last_error: Option<SchemaValidationError>,
}

/// One rendered form: its model, its bindings and its submit lifecycle.
///
/// Clones share state, so a submit trigger can hold its own handle to the
/// session.
#[derive(Clone)]
pub struct FormSession {
    options: FormOptions,
    state: Arc<RwLock<SessionState>>,
    bindings: Arc<RwLock<BindingRegistry>>,
}

impl FormSession {
    pub fn new(options: FormOptions) -> Self {
        Self {
            options,
            state: Arc::new(RwLock::new(SessionState {
                id: FormId::next(),
                fields: Vec::new(),
                submit_state: SubmitState::Idle,
                submit_count: 0,
                last_error: None,
            })),
            bindings: Arc::new(RwLock::new(BindingRegistry::new())),
        }
    }

    pub fn from_schema(schema: &FormSchema, options: FormOptions) -> FormResult<Self> {
        let session = Self::new(options);
        session.rebuild(schema)?;
        Ok(session)
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    /// Replaces the model. Every existing binding is dropped first.
    pub fn rebuild(&self, schema: &FormSchema) -> FormResult<()> {
        write_lock(&self.bindings, "clearing bindings for rebuild")?.clear();
        let fields = build_form_model(schema);
        let mut state = write_lock(&self.state, "rebuilding form model")?;
        debug!(form = state.id.0, fields = fields.len(), "rebuilding form");
        state.fields = fields;
        state.last_error = None;
        state.submit_count = 0;
        transition_submit_state(&mut state, SubmitState::Idle)
    }

    /// Fetches, decodes and applies a schema.
    pub async fn load<S>(&self, source: &S) -> FormResult<()>
    where
        S: SchemaSource,
    {
        let raw = source.fetch().await?;
        let schema = FormSchema::from_json(&raw)?;
        self.rebuild(&schema)
    }

    pub fn fields(&self) -> FormResult<Vec<FieldSpec>> {
        Ok(read_lock(&self.state, "reading form fields")?.fields.clone())
    }

    pub fn field(&self, key: &str) -> FormResult<Option<FieldSpec>> {
        Ok(read_lock(&self.state, "reading form field")?
            .fields
            .iter()
            .find(|field| field.key() == key)
            .cloned())
    }

    /// Binds a live control to a field, replacing any earlier binding.
    pub fn register(&self, key: &str, handle: impl ControlHandle) -> FormResult<()> {
        let field = self.bindable_field(key)?;
        let expected = field
            .kind()
            .control_kind()
            .ok_or_else(|| FormError::NotBindable(key.to_string()))?;
        let actual = handle.control_kind();
        if actual != expected {
            warn!(key, ?expected, ?actual, "rejected control binding");
            return Err(FormError::ControlKindMismatch {
                key: key.to_string(),
                expected,
                actual,
            });
        }
        let declared = field.options().unwrap_or_default();
        let offered = handle.options().unwrap_or_default();
        if declared != offered {
            warn!(key, "rejected control with foreign options");
            return Err(FormError::OptionMismatch {
                key: key.to_string(),
                expected: declared.to_vec(),
                actual: offered.to_vec(),
            });
        }
        write_lock(&self.bindings, "registering control")?.register(key, handle);
        debug!(key, ?actual, "bound control");
        Ok(())
    }

    /// Creates a control for `key`, binds it and returns it to the renderer.
    pub fn bind(&self, key: &str) -> FormResult<Control> {
        let field = self
            .field(key)?
            .ok_or_else(|| FormError::UnknownField(key.to_string()))?;
        let control = Control::for_field(&field, &self.options)
            .ok_or_else(|| FormError::NotBindable(key.to_string()))?;
        self.register(key, control.clone())?;
        Ok(control)
    }

    /// Binds a fresh control for every bindable field, in schema order.
    pub fn bind_all(&self) -> FormResult<Vec<(FieldSpec, Control)>> {
        let mut bound = Vec::new();
        for field in self.fields()? {
            if let Some(control) = Control::for_field(&field, &self.options) {
                self.register(field.key(), control.clone())?;
                bound.push((field, control));
            }
        }
        Ok(bound)
    }

    pub fn current_value(&self, key: &str) -> FormResult<Option<DynamicValue>> {
        read_lock(&self.bindings, "reading bound value")?.current_value(key)
    }

    pub fn is_bound(&self, key: &str) -> FormResult<bool> {
        Ok(read_lock(&self.bindings, "checking binding")?.contains(key))
    }

    /// Runs the submit pass. The outer error is reserved for session faults;
    /// validation failures come back in the inner result.
    pub fn submit(&self) -> FormResult<SubmitResult> {
        let (id, fields) = {
            let mut state = write_lock(&self.state, "preparing submit")?;
            if state.submit_state == SubmitState::Validating {
                return Err(FormError::AlreadySubmitting);
            }
            transition_submit_state(&mut state, SubmitState::Validating)?;
            state.submit_count = state.submit_count.saturating_add(1);
            (state.id, state.fields.clone())
        };
        debug!(form = id.0, fields = fields.len(), "submitting form");

        let outcome = read_lock(&self.bindings, "reading bindings for submit")
            .and_then(|bindings| collect_submission(&fields, &bindings, &self.options));

        let mut state = write_lock(&self.state, "completing submit")?;
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                transition_submit_state(&mut state, SubmitState::Idle)?;
                return Err(error);
            }
        };
        match &outcome {
            Ok(record) => {
                info!(form = id.0, values = record.len(), "form submitted");
                state.last_error = None;
                transition_submit_state(&mut state, SubmitState::Succeeded)?;
            }
            Err(error) => {
                warn!(form = id.0, field = %error.field, "form validation failed");
                state.last_error = Some(error.clone());
                transition_submit_state(&mut state, SubmitState::Failed)?;
            }
        }
        Ok(outcome)
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot> {
        let bound_keys = read_lock(&self.bindings, "listing bound keys")?
            .keys()
            .map(str::to_string)
            .collect();
        let state = read_lock(&self.state, "creating form snapshot")?;
        Ok(FormSnapshot {
            id: state.id,
            fields: state.fields.clone(),
            bound_keys,
            submit_state: state.submit_state,
            submit_count: state.submit_count,
            last_error: state.last_error.clone(),
        })
    }

    fn bindable_field(&self, key: &str) -> FormResult<FieldSpec> {
        self.field(key)?.ok_or_else(|| {
            warn!(key, "rejected binding for unknown field");
            FormError::UnknownField(key.to_string())
        })
    }
}

fn transition_submit_state(state: &mut SessionState, next: SubmitState) -> FormResult<()> {
    let current = state.submit_state;
    if current == next {
        return Ok(());
    }

    let allowed = matches!(
        (current, next),
        (SubmitState::Idle, SubmitState::Validating)
            | (SubmitState::Validating, SubmitState::Succeeded)
            | (SubmitState::Validating, SubmitState::Failed)
            | (SubmitState::Succeeded, SubmitState::Validating)
            | (SubmitState::Failed, SubmitState::Validating)
            | (_, SubmitState::Idle)
    );
    if !allowed {
        return Err(FormError::InvalidStateTransition {
            from: current,
            to: next,
        });
    }
    state.submit_state = next;
    Ok(())
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
