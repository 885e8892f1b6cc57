// Writing forms as JSON documents.

use std::io::Write;

use crate::sheet::*;

/// Where the form is written.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn parse(s: &str) -> OutputTarget {
        if s == "stdout" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(s))
        }
    }
}

/// A form service that writes every form to a JSON document.
pub struct JsonFormService {
    target: OutputTarget,
}

impl JsonFormService {
    pub fn new(target: OutputTarget) -> JsonFormService {
        JsonFormService { target }
    }
}

impl FormService for JsonFormService {
    type Form = JsonForm;

    fn create_form(&mut self, title: &str, description: &str) -> Result<JsonForm, FormServiceError> {
        let target = match &self.target {
            OutputTarget::File(p) if p.is_relative() => {
                let cwd = std::env::current_dir().map_err(|e| {
                    FormServiceError::new(format!("cannot find the current directory: {}", e))
                })?;
                OutputTarget::File(cwd.join(p))
            }
            t => t.clone(),
        };
        Ok(JsonForm {
            target,
            title: title.to_string(),
            description: description.to_string(),
            items: Vec::new(),
        })
    }
}

/// A form being built. Nothing is written before calling save.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct JsonForm {
    target: OutputTarget,
    title: String,
    description: String,
    items: Vec<JSValue>,
}

impl JsonForm {
    pub fn to_json(&self) -> JSValue {
        json!({
            "title": self.title,
            "description": self.description,
            "items": self.items,
        })
    }

    pub fn save(&self) -> SheetResult<()> {
        let pretty_js = serde_json::to_string_pretty(&self.to_json()).context(ParsingJsonSnafu {
            path: self.edit_url(),
        })?;
        match &self.target {
            OutputTarget::Stdout => {
                println!("{}", pretty_js);
            }
            OutputTarget::File(p) => {
                let path = p.display().to_string();
                info!("Writing form to {:?}", path);
                let mut f = fs::File::create(p).context(WritingOutputSnafu { path: path.clone() })?;
                writeln!(f, "{}", pretty_js).context(WritingOutputSnafu { path })?;
            }
        }
        Ok(())
    }
}

impl FormHandle for JsonForm {
    fn add_field(&mut self, spec: &FieldSpec) -> Result<FieldId, FormServiceError> {
        self.items.push(field_to_json(spec));
        Ok(FieldId(self.items.len() - 1))
    }

    fn edit_url(&self) -> String {
        match &self.target {
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::File(p) => format!("file://{}", p.display()),
        }
    }
}

/// The item types follow the names used by online form services.
pub fn field_to_json(spec: &FieldSpec) -> JSValue {
    match spec {
        FieldSpec::MultipleChoice { title, choices } => {
            json!({"type": "MULTIPLE_CHOICE", "title": title, "choices": choices})
        }
        FieldSpec::Checkbox { title, choices } => {
            json!({"type": "CHECKBOX", "title": title, "choices": choices})
        }
        FieldSpec::Dropdown { title, choices } => {
            json!({"type": "LIST", "title": title, "choices": choices})
        }
        FieldSpec::ShortText { title } => json!({"type": "TEXT", "title": title}),
        FieldSpec::Paragraph { title } => json!({"type": "PARAGRAPH_TEXT", "title": title}),
        FieldSpec::LinearScale {
            title,
            lower,
            upper,
        } => json!({"type": "SCALE", "title": title, "lowerBound": lower, "upperBound": upper}),
        FieldSpec::Date { title } => json!({"type": "DATE", "title": title}),
        FieldSpec::Time { title } => json!({"type": "TIME", "title": title}),
        FieldSpec::DateTime { title } => json!({"type": "DATETIME", "title": title}),
        FieldSpec::Duration { title } => json!({"type": "DURATION", "title": title}),
    }
}
