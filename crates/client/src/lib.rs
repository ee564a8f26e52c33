//! # Care Admin Client
//!
//! Everything between a form submission and the REST backend:
//!
//! - `request`: pure request building for list, create, update (single id,
//!   composite key and dual-channel) and delete
//! - `response`: status checks and error-message extraction
//! - `transport`: the `Transport` seam and its `reqwest` implementation
//! - `orchestrator`: the CRUD cycle of dispatch, reload and notify
//! - `config`: environment-driven configuration
//!
//! ## Example
//!
//! ```rust,ignore
//! use careadmin_client::{AdminConfig, CrudOrchestrator, HttpTransport};
//! use careadmin_schema::TableRegistry;
//! use careadmin_view::{MemoryStore, Session};
//! use std::sync::Arc;
//!
//! let config = AdminConfig::from_env()?;
//! let registry = Arc::new(TableRegistry::standard());
//! let store = MemoryStore::new(Session::for_registry(&registry)?);
//! let transport = Arc::new(HttpTransport::new(&config)?);
//! let admin = CrudOrchestrator::new(registry, transport, store);
//! admin.refresh().await?;
//! ```

pub mod config;
pub mod orchestrator;
pub mod request;
pub mod response;
pub mod transport;

pub use config::{AdminConfig, DEFAULT_API_BASE, DEFAULT_NOTIFY_MS};
pub use orchestrator::{ConfirmGate, CrudOrchestrator, DELETE_PROMPT};
pub use request::{Action, ApiRequest, Body, Method, Part, UpdatePlan};
pub use response::{ApiResponse, error_message};
pub use transport::{HttpTransport, Transport};
