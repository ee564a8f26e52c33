//! Request building
//!
//! Pure functions from a table schema, the selected record and submitted
//! form values to transport-neutral request descriptors. Nothing here
//! performs I/O, so every URL and payload rule is covered by plain tests.
//!
//! Three update protocols exist side by side:
//!
//! - single id: `PUT {endpoint}/{id}?{fields}`
//! - composite key: `PUT {endpoint}/{segment}/{value}/...?{fields}`
//! - dual channel (table with a file field): an optional multipart
//!   `PUT {endpoint}/{id}/{file_field}` plus an optional
//!   `PUT {endpoint}/{id}?{fields}`, sent concurrently

use careadmin_core::{AdminError, AdminResult, FieldInput, FileUpload, FormValues, Record};
use careadmin_schema::TableSchema;
use tracing::debug;

// ============================================================================
// Request Descriptors
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a request is for; decides the error fallback text and variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Update,
    UpdateAttachment,
    Delete,
}

impl Action {
    /// Message used when a failed response carries no `detail`
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Action::Load => "Failed to load data",
            Action::Create => "Failed to create record",
            Action::Update => "Failed to update record",
            Action::UpdateAttachment => "Failed to update photo",
            Action::Delete => "Failed to delete record",
        }
    }

    /// Wrap a failure message in the matching error variant
    pub fn error(&self, message: impl Into<String>) -> AdminError {
        match self {
            Action::Load => AdminError::load(message),
            Action::Create => AdminError::create(message),
            Action::Update | Action::UpdateAttachment => AdminError::update(message),
            Action::Delete => AdminError::delete(message),
        }
    }
}

/// One part of a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, upload: FileUpload },
}

impl Part {
    /// Form field name of the part
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body {
    #[default]
    Empty,
    Multipart(Vec<Part>),
}

/// A request ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub action: Action,
    pub method: Method,
    /// Path relative to the API base, already percent-encoded
    pub path: String,
    /// Query pairs, encoded by the transport
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    fn new(action: Action, method: Method, path: impl Into<String>) -> Self {
        Self {
            action,
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Path plus encoded query, for logs and tests
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

/// Requests making up one update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlan {
    /// One `PUT` carrying the fields in the query string
    Single(ApiRequest),
    /// Independent attachment and field requests; at least one is present
    DualChannel {
        attachment: Option<ApiRequest>,
        fields: Option<ApiRequest>,
    },
}

impl UpdatePlan {
    /// Requests in dispatch order
    pub fn requests(&self) -> Vec<&ApiRequest> {
        match self {
            UpdatePlan::Single(req) => vec![req],
            UpdatePlan::DualChannel { attachment, fields } => {
                attachment.iter().chain(fields.iter()).collect()
            }
        }
    }
}

// ============================================================================
// Builders
// ============================================================================

/// `GET {endpoint}`
pub fn list(schema: &TableSchema) -> ApiRequest {
    ApiRequest::new(Action::Load, Method::Get, schema.list_path())
}

/// `POST {endpoint}/` with every non-empty, non-readonly value as a part
pub fn create(schema: &TableSchema, values: &FormValues) -> ApiRequest {
    let mut parts = Vec::new();
    for (name, input) in values.iter() {
        let Some(field) = schema.field(name) else {
            debug!(table = %schema.key, field = name, "Skipping value for unknown field");
            continue;
        };
        if !field.in_create_payload() || input.is_blank() {
            continue;
        }
        match input {
            FieldInput::Text(value) if !field.is_file() => parts.push(Part::Text {
                name: name.to_string(),
                value: value.clone(),
            }),
            FieldInput::File(upload) if field.is_file() => parts.push(Part::File {
                name: name.to_string(),
                upload: upload.clone(),
            }),
            _ => {}
        }
    }

    let mut request = ApiRequest::new(Action::Create, Method::Post, schema.create_path());
    request.body = Body::Multipart(parts);
    debug!(target = %request.target(), "Built create request");
    request
}

/// Build the request(s) updating `record` with `values`
///
/// Fails with `NoFields` when the dual-channel table gets neither a new
/// file nor a field value, and with `MissingIdentity` when the record lacks
/// an identity value.
pub fn update(schema: &TableSchema, record: &Record, values: &FormValues) -> AdminResult<UpdatePlan> {
    let path = schema.record_path(record)?;
    let query = query_pairs(schema, values);

    let Some(file_field) = schema.attachment_field() else {
        let mut request = ApiRequest::new(Action::Update, Method::Put, path);
        request.query = query;
        debug!(target = %request.target(), "Built update request");
        return Ok(UpdatePlan::Single(request));
    };

    let attachment = match values.get(&file_field.name) {
        Some(FieldInput::File(upload)) if !upload.is_empty() => {
            let mut request = ApiRequest::new(
                Action::UpdateAttachment,
                Method::Put,
                format!("{}/{}", path, file_field.name),
            );
            request.body = Body::Multipart(vec![Part::File {
                name: file_field.name.clone(),
                upload: upload.clone(),
            }]);
            Some(request)
        }
        _ => None,
    };

    let fields = (!query.is_empty()).then(|| {
        let mut request = ApiRequest::new(Action::Update, Method::Put, path);
        request.query = query;
        request
    });

    if attachment.is_none() && fields.is_none() {
        return Err(AdminError::NoFields);
    }

    debug!(
        attachment = attachment.as_ref().map(|r| r.path.as_str()),
        fields = fields.as_ref().map(|r| r.target()),
        "Built dual-channel update"
    );
    Ok(UpdatePlan::DualChannel { attachment, fields })
}

/// `DELETE` to the record's identity path
pub fn delete(schema: &TableSchema, record: &Record) -> AdminResult<ApiRequest> {
    let request = ApiRequest::new(Action::Delete, Method::Delete, schema.record_path(record)?);
    debug!(target = %request.target(), "Built delete request");
    Ok(request)
}

/// Absolute URL of a record's attachment, if the table has one
pub fn attachment_url(
    base_url: &str,
    schema: &TableSchema,
    record: &Record,
) -> AdminResult<Option<String>> {
    Ok(schema
        .attachment_path(record)?
        .map(|path| format!("{}{}", base_url.trim_end_matches('/'), path)))
}

/// Non-empty, non-file, non-readonly values in submission order
fn query_pairs(schema: &TableSchema, values: &FormValues) -> Vec<(String, String)> {
    values
        .iter()
        .filter(|(name, _)| {
            schema
                .field(name)
                .is_some_and(|f| !f.readonly && !f.is_file())
        })
        .filter_map(|(name, input)| match input {
            FieldInput::Text(value) if !value.is_empty() => {
                Some((name.to_string(), value.clone()))
            }
            _ => None,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
