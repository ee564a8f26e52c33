//! # Care Admin Core
//!
//! Core types, traits, and error handling for Care Admin.
//!
//! This crate provides the foundational building blocks used throughout
//! the admin panel, including:
//!
//! - **Types**: Field types, backend records, submitted form values
//! - **Traits**: `Validatable` for schema descriptors
//! - **Errors**: Unified error handling with `AdminError` and `AdminResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{AdminError, AdminResult};
pub use traits::Validatable;
pub use types::{
    FieldInput, FieldType, FileUpload, FormValues, Record, is_present, scalar_text,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
