//! Registry files
//!
//! A deployment can replace the built-in registry with a JSON file
//! (`CAREADMIN_SCHEMA_FILE`). The file is either the versioned wrapper
//! `{ "schema_version": 1, "tables": [...] }` or a bare array of tables.
//! Loaded registries are always validated before they are returned.

use crate::{SCHEMA_VERSION, TableRegistry};
use careadmin_core::{AdminError, AdminResult, Validatable};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// Registry File Wrapper
// ============================================================================

/// Wrapper for registry files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Format version
    pub schema_version: u32,

    /// Tables in tab order
    pub tables: TableRegistry,
}

impl RegistryFile {
    /// Wrap a registry at the current format version
    pub fn new(tables: TableRegistry) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            tables,
        }
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a registry as a pretty-printed, versioned JSON file
pub fn save_registry(registry: &TableRegistry, path: impl AsRef<Path>) -> AdminResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&RegistryFile::new(registry.clone()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| AdminError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| AdminError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(path = %path.display(), tables = registry.len(), "Registry saved");
    Ok(())
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load and validate a registry file
pub fn load_registry(path: impl AsRef<Path>) -> AdminResult<TableRegistry> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| AdminError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let registry = load_registry_from_str(&json).map_err(|e| match e {
        AdminError::JsonSerialization(je) => AdminError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid registry file format: {}", je),
        },
        other => other,
    })?;

    info!(path = %path.display(), tables = registry.len(), "Loaded table registry");
    Ok(registry)
}

/// Parse and validate a registry from JSON text
pub fn load_registry_from_str(json: &str) -> AdminResult<TableRegistry> {
    let registry = match serde_json::from_str::<RegistryFile>(json) {
        Ok(file) => {
            if file.schema_version > SCHEMA_VERSION {
                return Err(AdminError::validation(format!(
                    "Registry file version {} is newer than supported version {}",
                    file.schema_version, SCHEMA_VERSION
                )));
            }
            file.tables
        }
        Err(_) => serde_json::from_str::<TableRegistry>(json)?,
    };

    registry.validate()?;
    Ok(registry)
}

// ============================================================================
// Tests
// ============================================================================
