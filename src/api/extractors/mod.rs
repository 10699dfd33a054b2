//! Custom request extractors.

mod property_form;
mod validated_json;

pub use property_form::PropertyForm;
pub use validated_json::{ValidatedForm, ValidatedJson};

pub(crate) use validated_json::format_validation_errors;
