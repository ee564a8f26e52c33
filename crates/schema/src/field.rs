//! Field descriptors
//!
//! A `FieldDescriptor` describes one column of a table as the admin panel
//! sees it: the form input it gets, its label and the flags that decide
//! whether it is sent on create and whether it must be filled in.

use careadmin_core::{AdminError, AdminResult, FieldType, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// FieldDescriptor
// ============================================================================

/// One field of a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Record key and form input name (unique within the table)
    pub name: String,

    /// Label shown next to the form input
    pub label: String,

    /// Input type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the form requires a value
    #[serde(default)]
    pub required: bool,

    /// Server-assigned: omitted on create, shown disabled on update
    #[serde(default)]
    pub readonly: bool,

    /// File fields only: may be left empty on update
    #[serde(default)]
    pub optional_in_update: bool,

    /// Allowed values (select fields only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FieldDescriptor {
    /// Create a new optional, editable field
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            readonly: false,
            optional_in_update: false,
            options: Vec::new(),
        }
    }

    /// Create a text field
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Text)
    }

    /// Create a number field
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Number)
    }

    /// Create an email field
    pub fn email(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Email)
    }

    /// Create a multi-line text field
    pub fn textarea(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Textarea)
    }

    /// Create a date field
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Date)
    }

    /// Create a time field
    pub fn time(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::Time)
    }

    /// Create a file field
    pub fn file(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldType::File)
    }

    /// Create a select field with its options
    pub fn select<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(name, label, FieldType::Select);
        field.options = options.into_iter().map(Into::into).collect();
        field
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as read-only (server-assigned)
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Allow the field to be skipped on update
    pub fn optional_in_update(mut self) -> Self {
        self.optional_in_update = true;
        self
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Check if this is a binary attachment field
    pub fn is_file(&self) -> bool {
        self.field_type.is_file()
    }

    /// Whether the form must have a value for this field
    ///
    /// Readonly fields are never required, and `optional_in_update` excuses
    /// the field while updating.
    pub fn is_required(&self, updating: bool) -> bool {
        self.required && !self.readonly && !(self.optional_in_update && updating)
    }

    /// Check if this field is sent when creating a record
    pub fn in_create_payload(&self) -> bool {
        !self.readonly
    }
}

impl Validatable for FieldDescriptor {
    fn validate(&self) -> AdminResult<()> {
        if self.name.is_empty() {
            return Err(AdminError::validation("Field name cannot be empty"));
        }

        if self.label.is_empty() {
            return Err(AdminError::validation(format!(
                "Field '{}' has no label",
                self.name
            )));
        }

        match (self.field_type, self.options.is_empty()) {
            (FieldType::Select, true) => {
                return Err(AdminError::validation(format!(
                    "Select field '{}' must declare options",
                    self.name
                )));
            }
            (FieldType::Select, false) | (_, true) => {}
            (_, false) => {
                return Err(AdminError::validation(format!(
                    "Field '{}' declares options but is not a select",
                    self.name
                )));
            }
        }

        if self.readonly && self.required {
            return Err(AdminError::validation(format!(
                "Field '{}' cannot be both readonly and required",
                self.name
            )));
        }

        if self.optional_in_update && !self.is_file() {
            return Err(AdminError::validation(format!(
                "Only file fields can be optional in update ('{}')",
                self.name
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
