use std::error::Error;
use std::fmt::Display;

use crate::config::{FieldId, FieldSpec};

/// A failure reported by a form service, either when creating a form or
/// when adding a field to it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FormServiceError {
    message: String,
}

impl FormServiceError {
    pub fn new(message: impl Into<String>) -> FormServiceError {
        FormServiceError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Error for FormServiceError {}

impl Display for FormServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Something that can host forms.
///
/// The builder only ever creates forms through this trait, which makes it possible
/// to write the form to a file, to keep it in memory, or to send it to a remote service.
pub trait FormService {
    type Form: FormHandle;

    fn create_form(&mut self, title: &str, description: &str)
        -> Result<Self::Form, FormServiceError>;
}

/// A form that has been created and that can receive fields.
pub trait FormHandle {
    /// Appends a field at the end of the form.
    fn add_field(&mut self, spec: &FieldSpec) -> Result<FieldId, FormServiceError>;

    /// The address at which the form can be edited.
    fn edit_url(&self) -> String;
}
