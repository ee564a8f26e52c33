//! Response interpretation
//!
//! The backend (FastAPI) reports failures as `{"detail": ...}` where
//! `detail` is either a message string or, for request validation errors,
//! a list of `{loc, msg, type}` objects. Bodies that are not JSON at all
//! degrade to the HTTP status line.

use crate::request::Action;
use careadmin_core::{AdminError, AdminResult, Record};
use serde::Deserialize;
use serde_json::Value;

/// A response as seen by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// Canonical reason phrase (`Not Found`), empty when unknown
    pub reason: String,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Create a response with a JSON body
    pub fn json(status: u16, reason: impl Into<String>, body: &Value) -> Self {
        Self::new(status, reason, body.to_string())
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `HTTP {status}: {reason}`
    pub fn status_line(&self) -> String {
        format!("HTTP {}: {}", self.status, self.reason)
    }

    /// Parse a successful list response
    pub fn records(&self) -> AdminResult<Vec<Record>> {
        serde_json::from_slice(&self.body)
            .map_err(|e| AdminError::load(format!("Invalid list response: {}", e)))
    }

    /// Succeed on 2xx (without reading the body), otherwise fail with the
    /// message extracted for `action`
    pub fn check(&self, action: Action) -> AdminResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(action.error(error_message(self, action.fallback_message())))
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Value,
}

/// Message for a failed response
///
/// - JSON with a string `detail` → the string
/// - JSON with a validation-error list → each `msg`, joined by `; `
/// - JSON with no usable `detail` → `fallback`
/// - anything else → `HTTP {status}: {reason}`
pub fn error_message(response: &ApiResponse, fallback: &str) -> String {
    let Ok(body) = serde_json::from_slice::<ErrorBody>(&response.body) else {
        return response.status_line();
    };

    match body.detail {
        Value::String(s) if !s.is_empty() => s,
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            if messages.is_empty() {
                fallback.to_string()
            } else {
                messages.join("; ")
            }
        }
        Value::Null | Value::String(_) => fallback.to_string(),
        other => other.to_string(),
    }
}
