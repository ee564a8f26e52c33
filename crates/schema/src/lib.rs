//! # Care Admin Schema
//!
//! The table registry: a static mapping from table key to a schema
//! descriptor (endpoint path, display title, ordered field list and identity
//! scheme). Pure data, validated once at startup.
//!
//! ## Core Concepts
//!
//! - **FieldDescriptor**: one form input / record key with type and flags
//! - **TableSchema**: one backend table and how its records are addressed
//! - **Identity**: single id field or composite key path template
//! - **TableRegistry**: all tables, in tab order
//!

// Module declarations
pub mod field;
pub mod registry;
pub mod serialization;
pub mod table;

// Re-export commonly used types at crate root
pub use field::FieldDescriptor;
pub use registry::{DEFAULT_TABLE, TableRegistry};
pub use serialization::{load_registry, load_registry_from_str, save_registry};
pub use table::{Identity, KeySegment, TableSchema};

// Re-export core types that are commonly used with schemas
pub use careadmin_core::{AdminError, AdminResult, FieldType, Validatable};

/// Current version of the registry file format
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
