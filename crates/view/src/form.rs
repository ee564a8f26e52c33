//! Form projection and submission collection
//!
//! `FormView` describes the modal form for a table: title, and per field the
//! widget, label, initial value and flags. `FormDraft` holds what the
//! operator has typed or picked, and turns it into `FormValues` on submit.

use crate::format::{normalize_date, truncate_time};
use crate::session::FormMode;
use careadmin_core::{
    AdminError, AdminResult, FieldInput, FieldType, FileUpload, FormValues, Record, is_present,
    scalar_text,
};
use careadmin_schema::{FieldDescriptor, TableSchema};
use serde_json::Value;

// ============================================================================
// Form View
// ============================================================================

/// Input widget for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Plain `input` element of the given HTML type
    Input { html_type: &'static str },
    TextArea,
    Select { options: Vec<String> },
    File,
}

/// One rendered form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub name: String,
    /// Label text, with ` *` appended when the field is required
    pub label: String,
    pub widget: Widget,
    /// Initial value (always empty for file fields)
    pub value: String,
    pub disabled: bool,
    pub required: bool,
    /// Shown under a file input when a file is already stored
    pub note: Option<String>,
}

/// A rendered form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FormFieldView>,
}

impl FormView {
    /// Build the form for the open mode, seeded from a record when updating
    pub fn build(schema: &TableSchema, mode: FormMode, seed: Option<&Record>) -> AdminResult<Self> {
        let verb = match mode {
            FormMode::Create => "Create",
            FormMode::Update => "Update",
            FormMode::Closed => return Err(AdminError::transition("no form is open")),
        };
        let updating = mode.is_update();
        let seed = if updating { seed } else { None };

        Ok(Self {
            title: format!("{} {}", verb, schema.singular_title()),
            fields: schema
                .fields
                .iter()
                .map(|field| field_view(field, updating, seed))
                .collect(),
        })
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FormFieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn field_view(field: &FieldDescriptor, updating: bool, seed: Option<&Record>) -> FormFieldView {
    let required = field.is_required(updating);
    let label = if required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };

    let raw = seed.and_then(|r| r.get(&field.name));

    let widget = match field.field_type {
        FieldType::Textarea => Widget::TextArea,
        FieldType::Select => Widget::Select {
            options: field.options.clone(),
        },
        FieldType::File => Widget::File,
        other => Widget::Input {
            html_type: other.html_input_type().unwrap_or("text"),
        },
    };

    let value = match field.field_type {
        FieldType::File => String::new(),
        FieldType::Select => select_value(field, raw),
        _ => raw.map(|v| seed_text(field.field_type, v)).unwrap_or_default(),
    };

    let note = match (field.field_type, raw) {
        (FieldType::File, Some(v)) if updating && is_present(v) => Some(format!(
            "Current: {}\nSelect new file to replace",
            scalar_text(v)
        )),
        _ => None,
    };

    FormFieldView {
        name: field.name.clone(),
        label,
        widget,
        value,
        disabled: field.readonly,
        required,
        note,
    }
}

/// The seed value when it is one of the options, else the first option
fn select_value(field: &FieldDescriptor, raw: Option<&Value>) -> String {
    raw.map(scalar_text)
        .filter(|v| field.options.contains(v))
        .or_else(|| field.options.first().cloned())
        .unwrap_or_default()
}

fn seed_text(field_type: FieldType, value: &Value) -> String {
    match (field_type, value) {
        (FieldType::Date, Value::String(s)) if !s.is_empty() => normalize_date(s),
        (FieldType::Time, Value::String(s)) if !s.is_empty() => truncate_time(s),
        _ => scalar_text(value),
    }
}

// ============================================================================
// Form Draft
// ============================================================================

/// Editable state of one form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValue {
    Text(String),
    File(Option<FileUpload>),
}

/// What the operator has entered so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    values: Vec<(String, DraftValue)>,
}

impl FormDraft {
    /// Seed a draft from a rendered form
    pub fn from_view(view: &FormView) -> Self {
        let values = view
            .fields
            .iter()
            .map(|f| {
                let value = match f.widget {
                    Widget::File => DraftValue::File(None),
                    _ => DraftValue::Text(f.value.clone()),
                };
                (f.name.clone(), value)
            })
            .collect();
        Self { values }
    }

    /// Set a text value
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) {
        self.set(name, DraftValue::Text(text.into()));
    }

    /// Set or clear the chosen file
    pub fn set_file(&mut self, name: &str, file: Option<FileUpload>) {
        self.set(name, DraftValue::File(file));
    }

    fn set(&mut self, name: &str, value: DraftValue) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    /// Current text of a field
    pub fn text(&self, name: &str) -> &str {
        match self.values.iter().find(|(n, _)| n == name) {
            Some((_, DraftValue::Text(s))) => s,
            _ => "",
        }
    }

    /// Name of the chosen file, if any
    pub fn file_name(&self, name: &str) -> Option<&str> {
        match self.values.iter().find(|(n, _)| n == name) {
            Some((_, DraftValue::File(Some(f)))) => Some(&f.file_name),
            _ => None,
        }
    }

    /// Collect the values to submit
    ///
    /// Readonly fields are skipped, files are included only when one was
    /// chosen and text only when it is non-empty. Values are in schema order.
    pub fn collect(&self, schema: &TableSchema) -> FormValues {
        let mut values = FormValues::new();
        for field in schema.fields.iter().filter(|f| !f.readonly) {
            match self.values.iter().find(|(n, _)| *n == field.name) {
                Some((_, DraftValue::Text(s))) if !s.is_empty() && !field.is_file() => {
                    values.push(&field.name, FieldInput::Text(s.clone()));
                }
                Some((_, DraftValue::File(Some(file)))) if field.is_file() && !file.is_empty() => {
                    values.push(&field.name, FieldInput::File(file.clone()));
                }
                _ => {}
            }
        }
        values
    }
}

/// Fail with the first required field missing from a create submission
pub fn check_required(schema: &TableSchema, values: &FormValues) -> AdminResult<()> {
    match schema
        .fields
        .iter()
        .find(|f| f.is_required(false) && !values.has_value(&f.name))
    {
        Some(field) => Err(AdminError::MissingRequired {
            field: field.name.clone(),
            label: field.label.clone(),
        }),
        None => Ok(()),
    }
}

// ============================================================================
// Tests
// ============================================================================
