use std::collections::HashSet;

use log::debug;

use crate::config::{FieldId, FieldSpec};
use crate::service::{FormHandle, FormService, FormServiceError};

/// A form service that keeps everything in memory.
///
/// Mostly useful for testing: it can be told to refuse to create forms, or to
/// reject the fields with a given title.
///
/// ```
/// use form_builder::{FormHandle, FormService, MemoryFormService, FieldSpec};
///
/// let mut service = MemoryFormService::new();
/// let mut form = service.create_form("My form", "")?;
/// form.add_field(&FieldSpec::ShortText { title: "Name".to_string() })?;
/// assert_eq!(form.fields().len(), 1);
/// assert_eq!(form.edit_url(), "memory://forms/1/edit");
/// # Ok::<(), form_builder::FormServiceError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFormService {
    created: usize,
    refuse_forms: bool,
    rejected_titles: HashSet<String>,
}

impl MemoryFormService {
    pub fn new() -> MemoryFormService {
        MemoryFormService::default()
    }

    /// All the forms created afterwards will fail to add a field with this title.
    pub fn reject_field(mut self, title: &str) -> MemoryFormService {
        self.rejected_titles.insert(title.to_string());
        self
    }

    /// Makes every call to create_form fail.
    pub fn refuse_forms(mut self) -> MemoryFormService {
        self.refuse_forms = true;
        self
    }

    /// The number of forms created so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl FormService for MemoryFormService {
    type Form = MemoryForm;

    fn create_form(&mut self, title: &str, description: &str) -> Result<MemoryForm, FormServiceError> {
        if self.refuse_forms {
            return Err(FormServiceError::new("the service does not accept new forms"));
        }
        self.created += 1;
        debug!("create_form: id: {} title: {:?}", self.created, title);
        Ok(MemoryForm {
            id: self.created,
            title: title.to_string(),
            description: description.to_string(),
            fields: Vec::new(),
            rejected_titles: self.rejected_titles.clone(),
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MemoryForm {
    id: usize,
    title: String,
    description: String,
    fields: Vec<FieldSpec>,
    rejected_titles: HashSet<String>,
}

impl MemoryForm {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The fields, in the order in which they were added.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

impl FormHandle for MemoryForm {
    fn add_field(&mut self, spec: &FieldSpec) -> Result<FieldId, FormServiceError> {
        if self.rejected_titles.contains(spec.title()) {
            return Err(FormServiceError::new(format!(
                "field {:?} rejected by the service",
                spec.title()
            )));
        }
        self.fields.push(spec.clone());
        Ok(FieldId(self.fields.len() - 1))
    }

    fn edit_url(&self) -> String {
        format!("memory://forms/{}/edit", self.id)
    }
}
