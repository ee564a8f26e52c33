//! Table schema descriptors
//!
//! A `TableSchema` ties a registry key to a REST endpoint, a display title,
//! the ordered field list and the identity scheme used to address a single
//! record in update and delete URLs.

use crate::field::FieldDescriptor;
use careadmin_core::{AdminError, AdminResult, Record, Validatable};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

// ============================================================================
// Identity
// ============================================================================

/// One part of a composite key path template
///
/// The record value of `field` is placed after the fixed `segment`, so the
/// parts `[caregiver_user_id → caregiver, job_id → job]` address
/// `{endpoint}/caregiver/{caregiver_user_id}/job/{job_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySegment {
    /// Record field holding the key value
    pub field: String,
    /// Fixed path segment preceding the value
    pub segment: String,
}

impl KeySegment {
    /// Create a key segment
    pub fn new(field: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            segment: segment.into(),
        }
    }
}

/// How a single record is addressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    /// `{endpoint}/{id}`
    Single { field: String },
    /// `{endpoint}/{segment}/{value}/{segment}/{value}...`
    Composite { parts: Vec<KeySegment> },
}

impl Identity {
    /// Single id field identity
    pub fn single(field: impl Into<String>) -> Self {
        Identity::Single {
            field: field.into(),
        }
    }

    /// Composite key identity
    pub fn composite(parts: impl IntoIterator<Item = KeySegment>) -> Self {
        Identity::Composite {
            parts: parts.into_iter().collect(),
        }
    }

    /// Field names making up the identity, in path order
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Identity::Single { field } => vec![field.as_str()],
            Identity::Composite { parts } => parts.iter().map(|p| p.field.as_str()).collect(),
        }
    }

    /// The single id field, if this is not a composite key
    pub fn id_field(&self) -> Option<&str> {
        match self {
            Identity::Single { field } => Some(field),
            Identity::Composite { .. } => None,
        }
    }

    /// Check if this is a composite key
    pub fn is_composite(&self) -> bool {
        matches!(self, Identity::Composite { .. })
    }
}

// ============================================================================
// TableSchema
// ============================================================================

/// Schema descriptor for one backend table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Registry key (e.g. `job-applications`)
    pub key: String,

    /// Base path for REST calls (e.g. `/job-applications`)
    pub endpoint: String,

    /// Display title (e.g. `Job Applications`)
    pub title: String,

    /// Item label for modal titles; derived from the title when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,

    /// Ordered fields (form order)
    pub fields: Vec<FieldDescriptor>,

    /// Identity scheme
    pub identity: Identity,
}

impl TableSchema {
    /// Create a schema with no fields
    pub fn new(
        key: impl Into<String>,
        endpoint: impl Into<String>,
        title: impl Into<String>,
        identity: Identity,
    ) -> Self {
        Self {
            key: key.into(),
            endpoint: endpoint.into(),
            title: title.into(),
            singular: None,
            fields: Vec::new(),
            identity,
        }
    }

    /// Builder: append a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Builder: set the item label
    pub fn with_singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = Some(singular.into());
        self
    }

    /// Item label used in "Create X" / "Update X"
    pub fn singular_title(&self) -> String {
        match &self.singular {
            Some(s) => s.clone(),
            None => self
                .title
                .strip_suffix('s')
                .unwrap_or(&self.title)
                .to_string(),
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The binary attachment field, if the table has one
    pub fn attachment_field(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.is_file())
    }

    /// Whether updates are split into an attachment request and a field request
    pub fn is_dual_channel(&self) -> bool {
        self.attachment_field().is_some()
    }

    /// Path for the list request
    pub fn list_path(&self) -> &str {
        &self.endpoint
    }

    /// Path for the create request (note the trailing slash)
    pub fn create_path(&self) -> String {
        format!("{}/", self.endpoint)
    }

    /// Path addressing one record, built from its identity values
    pub fn record_path(&self, record: &Record) -> AdminResult<String> {
        let mut path = self.endpoint.clone();
        match &self.identity {
            Identity::Single { field } => {
                path.push('/');
                path.push_str(&identity_segment(record, field)?);
            }
            Identity::Composite { parts } => {
                for part in parts {
                    path.push('/');
                    path.push_str(&part.segment);
                    path.push('/');
                    path.push_str(&identity_segment(record, &part.field)?);
                }
            }
        }
        Ok(path)
    }

    /// Path of a record's binary attachment (`{record_path}/{file_field}`)
    pub fn attachment_path(&self, record: &Record) -> AdminResult<Option<String>> {
        match self.attachment_field() {
            Some(field) => Ok(Some(format!("{}/{}", self.record_path(record)?, field.name))),
            None => Ok(None),
        }
    }
}

/// Render an identity value as a percent-encoded path segment
fn identity_segment(record: &Record, field: &str) -> AdminResult<String> {
    let text = match record.get(field) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(Value::Bool(b)) => b.to_string(),
        _ => return Err(AdminError::MissingIdentity(field.to_string())),
    };
    Ok(urlencoding::encode(&text).into_owned())
}

impl Validatable for TableSchema {
    fn validate(&self) -> AdminResult<()> {
        let fail = |msg: String| Err(AdminError::schema(&self.key, msg));

        if self.key.is_empty() {
            return Err(AdminError::validation("Table key cannot be empty"));
        }

        if !self.endpoint.starts_with('/') || self.endpoint.ends_with('/') {
            return fail(format!(
                "endpoint '{}' must start with '/' and have no trailing slash",
                self.endpoint
            ));
        }

        if self.fields.is_empty() {
            return fail("table declares no fields".to_string());
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            field
                .validate()
                .map_err(|e| AdminError::schema(&self.key, e.to_string()))?;
            if !seen.insert(field.name.as_str()) {
                return fail(format!("duplicate field '{}'", field.name));
            }
        }

        if self.fields.iter().filter(|f| f.is_file()).count() > 1 {
            return fail("at most one file field is supported".to_string());
        }

        if let Identity::Composite { parts } = &self.identity {
            if parts.len() < 2 {
                return fail("composite key needs at least two parts".to_string());
            }
            if let Some(part) = parts.iter().find(|p| p.segment.is_empty()) {
                return fail(format!("composite key part '{}' has no path segment", part.field));
            }
        }

        for name in self.identity.fields() {
            if !seen.contains(name) {
                return fail(format!("identity field '{}' is not a declared field", name));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn applications() -> TableSchema {
        TableSchema::new(
            "job-applications",
            "/job-applications",
            "Job Applications",
            Identity::composite([
                KeySegment::new("caregiver_user_id", "caregiver"),
                KeySegment::new("job_id", "job"),
            ]),
        )
        .with_field(FieldDescriptor::number("caregiver_user_id", "Caregiver User ID").required())
        .with_field(FieldDescriptor::number("job_id", "Job ID").required())
        .with_field(FieldDescriptor::date("date_applied", "Date Applied"))
    }

    #[test]
    fn test_identity_fields() {
        let schema = applications();
        assert!(schema.identity.is_composite());
        assert_eq!(schema.identity.fields(), vec!["caregiver_user_id", "job_id"]);
        assert_eq!(schema.identity.id_field(), None);
        assert!(schema.is_valid());
    }

    #[test]
    fn test_paths_and_titles() {
        let schema = applications();
        assert_eq!(schema.list_path(), "/job-applications");
        assert_eq!(schema.create_path(), "/job-applications/");
        assert_eq!(schema.singular_title(), "Job Application");
        assert_eq!(
            schema.clone().with_singular("Application").singular_title(),
            "Application"
        );
    }

    #[test]
    fn test_composite_needs_two_parts() {
        let mut schema = applications();
        schema.identity = Identity::composite([KeySegment::new("job_id", "job")]);
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("at least two parts"));
    }

    #[test]
    fn test_identity_must_be_declared() {
        let mut schema = applications();
        schema.identity = Identity::single("application_id");
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("application_id"));
    }

    #[test]
    fn test_duplicate_fields_rejected() {
        let schema = applications().with_field(FieldDescriptor::number("job_id", "Job"));
        assert!(!schema.is_valid());
    }

    #[test]
    fn test_endpoint_shape() {
        let mut schema = applications();
        schema.endpoint = "/job-applications/".to_string();
        assert!(!schema.is_valid());
        schema.endpoint = "job-applications".to_string();
        assert!(!schema.is_valid());
    }

    #[test]
    fn test_single_file_field() {
        let schema = applications()
            .with_field(FieldDescriptor::file("cv", "CV"))
            .with_field(FieldDescriptor::file("letter", "Letter"));
        assert!(!schema.is_valid());
    }

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_composite_record_path() {
        let schema = applications();
        let row = record(serde_json::json!({ "caregiver_user_id": 3, "job_id": 7 }));
        assert_eq!(
            schema.record_path(&row).unwrap(),
            "/job-applications/caregiver/3/job/7"
        );
        assert_eq!(schema.attachment_path(&row).unwrap(), None);
    }

    #[test]
    fn test_single_record_path_encodes() {
        let schema = TableSchema::new("towns", "/towns", "Towns", Identity::single("name"))
            .with_field(FieldDescriptor::text("name", "Name"))
            .with_field(FieldDescriptor::file("crest", "Crest"));
        let row = record(serde_json::json!({ "name": "San Jose/North" }));
        assert_eq!(schema.record_path(&row).unwrap(), "/towns/San%20Jose%2FNorth");
        assert_eq!(
            schema.attachment_path(&row).unwrap().as_deref(),
            Some("/towns/San%20Jose%2FNorth/crest")
        );
    }

    #[test]
    fn test_integral_float_identity() {
        let schema = applications();
        let row = record(serde_json::json!({ "caregiver_user_id": 3.0, "job_id": 7.5 }));
        assert_eq!(
            schema.record_path(&row).unwrap(),
            "/job-applications/caregiver/3/job/7.5"
        );
    }

    #[test]
    fn test_missing_identity_value() {
        let schema = applications();
        let row = record(serde_json::json!({ "caregiver_user_id": 3, "job_id": null }));
        let err = schema.record_path(&row).unwrap_err();
        assert!(matches!(err, AdminError::MissingIdentity(ref f) if f == "job_id"));
    }

    #[test]
    fn test_identity_serde_shape() {
        let json = serde_json::to_value(Identity::single("user_id")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "single", "field": "user_id" }));
    }
}
