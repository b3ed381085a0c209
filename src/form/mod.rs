mod binding;
mod controller;
mod kind;
mod model;
mod presentation;
mod validation;
mod value;


pub use binding::{
    BindingRegistry, ChoiceGroupControl, Control, ControlHandle, DateControl, SelectControl,
    TextControl, ToggleControl,
};
pub use controller::{
    EmailRule, FormError, FormId, FormOptions, FormResult, FormSession, FormSnapshot, SubmitState,
    UntouchedDate,
};
pub use kind::{ControlKind, FieldKind};
pub use model::{FieldSpec, build_form_model};
pub use presentation::{FieldPresentation, Keyboard, UNSUPPORTED_CAPTION};
pub use validation::{
    INVALID_EMAIL_MESSAGE, SchemaValidationError, SubmitResult, collect_submission, is_valid_email,
};
pub use value::{DynamicValue, SubmissionRecord};
