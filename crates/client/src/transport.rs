//! HTTP transport
//!
//! The `Transport` trait is the seam between request building and the
//! network. `HttpTransport` sends requests with `reqwest`; tests substitute
//! a recording mock.

use crate::config::AdminConfig;
use crate::request::{ApiRequest, Body, Method, Part};
use crate::response::ApiResponse;
use async_trait::async_trait;
use careadmin_core::{AdminError, AdminResult};
use reqwest::multipart;
use reqwest::{Client, Url};
use tracing::{debug, warn};

/// Sends requests and returns raw responses
///
/// Only failures to obtain a response are errors; non-2xx responses are
/// returned as-is for the caller to interpret.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &ApiRequest) -> AdminResult<ApiResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the configured backend
    pub fn new(config: &AdminConfig) -> AdminResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdminError::InvalidConfig(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Backend origin
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a request, query pairs form-urlencoded
    pub fn url_for(&self, request: &ApiRequest) -> AdminResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))
            .map_err(|e| AdminError::transport(format!("invalid URL for '{}': {}", request.path, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    fn multipart_form(parts: &[Part]) -> AdminResult<multipart::Form> {
        let mut form = multipart::Form::new();
        for part in parts {
            form = match part {
                Part::Text { name, value } => form.text(name.clone(), value.clone()),
                Part::File { name, upload } => {
                    let file = multipart::Part::bytes(upload.bytes.clone())
                        .file_name(upload.file_name.clone())
                        .mime_str(&upload.mime)
                        .map_err(|e| AdminError::transport(format!("invalid MIME type: {}", e)))?;
                    form.part(name.clone(), file)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> AdminResult<ApiResponse> {
        let url = self.url_for(request)?;
        debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        if let Body::Multipart(parts) = &request.body {
            builder = builder.multipart(Self::multipart_form(parts)?);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(method = %request.method, path = %request.path, error = %e, "Request failed");
            AdminError::transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AdminError::transport(format!("failed to read response body: {}", e)))?;

        debug!(status = status.as_u16(), len = body.len(), "Received response");
        Ok(ApiResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body.to_vec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request;
    use careadmin_core::FormValues;
    use careadmin_schema::TableRegistry;
    use serde_json::json;

    fn transport() -> HttpTransport {
        let config = AdminConfig {
            api_base: "http://127.0.0.1:8000/".to_string(),
            ..AdminConfig::default()
        };
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn test_url_for_list() {
        let registry = TableRegistry::standard();
        let url = transport()
            .url_for(&request::list(registry.get("users").unwrap()))
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/users");
    }

    #[test]
    fn test_url_for_update_query() {
        let registry = TableRegistry::standard();
        let row = json!({ "member_user_id": 5 }).as_object().cloned().unwrap();
        let values = FormValues::new().with_text("house_rules", "No shoes & no pets");
        let plan = request::update(registry.get("members").unwrap(), &row, &values).unwrap();

        let url = transport().url_for(plan.requests()[0]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/members/5?house_rules=No+shoes+%26+no+pets"
        );
    }

    #[test]
    fn test_multipart_form_builds() {
        let registry = TableRegistry::standard();
        let values = FormValues::new()
            .with_text("caregiver_user_id", "3")
            .with_file("photo", careadmin_core::FileUpload::new("me.png", vec![1]));
        let request = request::create(registry.get("caregivers").unwrap(), &values);
        let Body::Multipart(parts) = &request.body else {
            panic!("expected multipart body");
        };
        assert!(HttpTransport::multipart_form(parts).is_ok());
    }
}
