//! Core types used throughout Care Admin
//!
//! This module contains the field type vocabulary shared by schema
//! descriptors and forms, the untyped record shape returned by the backend,
//! and the values an operator submits through a form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Records
// ============================================================================

/// A backend record: field name to JSON scalar, in the backend's key order
pub type Record = serde_json::Map<String, Value>;

/// Render a JSON scalar the way a table cell or form input shows it
///
/// `null` becomes the empty string, strings are taken verbatim and numbers
/// and booleans use their JSON text (`3`, `12.5`, `true`).
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Whether a record value counts as present (not null, empty or `false`)
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

// ============================================================================
// Field Types
// ============================================================================

/// Input types a field descriptor can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text
    #[default]
    Text,
    /// Numeric input
    Number,
    /// Email address
    Email,
    /// Multi-line text
    Textarea,
    /// Choice from a fixed option list
    Select,
    /// Calendar date (`YYYY-MM-DD`)
    Date,
    /// Time of day (`HH:MM`)
    Time,
    /// Binary attachment
    File,
}

impl FieldType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Email => "Email",
            FieldType::Textarea => "Text Area",
            FieldType::Select => "Select",
            FieldType::Date => "Date",
            FieldType::Time => "Time",
            FieldType::File => "File",
        }
    }

    /// The HTML `input` type for scalar inputs, `None` for widgets that are
    /// not a plain `input` element
    pub fn html_input_type(&self) -> Option<&'static str> {
        match self {
            FieldType::Text => Some("text"),
            FieldType::Number => Some("number"),
            FieldType::Email => Some("email"),
            FieldType::Date => Some("date"),
            FieldType::Time => Some("time"),
            FieldType::Textarea | FieldType::Select | FieldType::File => None,
        }
    }

    /// Check if this is a binary attachment type
    pub fn is_file(&self) -> bool {
        matches!(self, FieldType::File)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Form Values
// ============================================================================

/// A file chosen in a form's file picker
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// File name sent in the multipart part
    pub file_name: String,
    /// MIME type sent in the multipart part
    pub mime: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create an upload, guessing the MIME type from the file extension
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One submitted form value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Scalar value as typed (numbers, dates and times are sent as text)
    Text(String),
    /// Binary attachment
    File(FileUpload),
}

impl FieldInput {
    /// Check if this is a file value
    pub fn is_file(&self) -> bool {
        matches!(self, FieldInput::File(_))
    }

    /// Text value, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldInput::Text(s) => Some(s),
            FieldInput::File(_) => None,
        }
    }

    /// Whether the value carries nothing worth sending
    pub fn is_blank(&self) -> bool {
        match self {
            FieldInput::Text(s) => s.is_empty(),
            FieldInput::File(f) => f.is_empty(),
        }
    }
}

/// Ordered values collected from a submitted form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(String, FieldInput)>,
}

impl FormValues {
    /// Create an empty set of values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a text value
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, FieldInput::Text(value.into()));
        self
    }

    /// Builder: add a file value
    pub fn with_file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.push(name, FieldInput::File(file));
        self
    }

    /// Append a value, replacing an earlier value of the same name
    pub fn push(&mut self, name: impl Into<String>, value: FieldInput) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Get a value by field name
    pub fn get(&self, name: &str) -> Option<&FieldInput> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Whether a non-blank value exists for the field
    pub fn has_value(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_blank())
    }

    /// Iterate over values in submission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldInput)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no values were submitted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
