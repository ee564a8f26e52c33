//! Error types for Care Admin
//!
//! This module provides unified error handling across the admin panel:
//! CRUD failures reported by the backend, form and selection preconditions,
//! schema validation, transport and configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Care Admin
#[derive(Debug, Error)]
pub enum AdminError {
    // ========================================================================
    // CRUD Errors
    // ========================================================================
    /// Listing a table failed
    #[error("Failed to load records: {0}")]
    Load(String),

    /// Creating a record failed
    #[error("Failed to create record: {0}")]
    Create(String),

    /// Updating a record failed
    #[error("Failed to update record: {0}")]
    Update(String),

    /// Deleting a record failed
    #[error("Failed to delete record: {0}")]
    Delete(String),

    // ========================================================================
    // Precondition Errors
    // ========================================================================
    /// An update carried neither a new file nor any field value
    #[error("No fields to update")]
    NoFields,

    /// An operation needs a selected row but none is selected
    #[error("{0}")]
    NoSelection(String),

    /// A required form field was left empty
    #[error("Missing required field '{field}' ({label})")]
    MissingRequired { field: String, label: String },

    /// The selected record has no value for an identity field
    #[error("Record has no value for identity field '{0}'")]
    MissingIdentity(String),

    /// A state transition was requested from the wrong state
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// Table key not present in the registry
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// A schema descriptor failed validation
    #[error("Schema validation failed for '{table}': {message}")]
    SchemaValidation { table: String, message: String },

    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The request never produced an HTTP response (connect, timeout, ...)
    #[error("Request failed: {0}")]
    Transport(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl AdminError {
    /// Create a load error
    pub fn load(msg: impl Into<String>) -> Self {
        AdminError::Load(msg.into())
    }

    /// Create a create error
    pub fn create(msg: impl Into<String>) -> Self {
        AdminError::Create(msg.into())
    }

    /// Create an update error
    pub fn update(msg: impl Into<String>) -> Self {
        AdminError::Update(msg.into())
    }

    /// Create a delete error
    pub fn delete(msg: impl Into<String>) -> Self {
        AdminError::Delete(msg.into())
    }

    /// Create a missing-selection error for the given action ("delete", "update")
    pub fn no_selection(action: &str) -> Self {
        AdminError::NoSelection(format!("Please select a row to {}", action))
    }

    /// Create a schema validation error
    pub fn schema(table: impl Into<String>, msg: impl Into<String>) -> Self {
        AdminError::SchemaValidation {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AdminError::Validation(msg.into())
    }

    /// Create an invalid transition error
    pub fn transition(msg: impl Into<String>) -> Self {
        AdminError::InvalidTransition(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        AdminError::Transport(msg.into())
    }

    /// The text shown in the transient notification banner
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Load(msg) => format!("Error loading data: {}", msg),
            AdminError::Create(msg) | AdminError::Update(msg) | AdminError::Delete(msg) => {
                format!("Error: {}", msg)
            }
            AdminError::NoSelection(msg) => msg.clone(),
            AdminError::MissingRequired { label, .. } => format!("Error: {} is required", label),
            other => format!("Error: {}", other),
        }
    }

    /// Check if this error came back from a CRUD call
    pub fn is_crud(&self) -> bool {
        matches!(
            self,
            AdminError::Load(_)
                | AdminError::Create(_)
                | AdminError::Update(_)
                | AdminError::Delete(_)
        )
    }

    /// Check if this error was raised before any network call
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AdminError::NoFields
                | AdminError::NoSelection(_)
                | AdminError::MissingRequired { .. }
                | AdminError::MissingIdentity(_)
                | AdminError::InvalidTransition(_)
        )
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AdminError::Validation(_) | AdminError::SchemaValidation { .. }
        )
    }
}

/// Result type alias using AdminError
pub type AdminResult<T> = Result<T, AdminError>;

// ============================================================================
// Tests
// ============================================================================
