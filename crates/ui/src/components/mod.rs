//! # UI Components
//!
//! ```text
//! App
//! ├── Toolbar
//! ├── TableTabs
//! ├── MessageBanner
//! ├── DataTable
//! ├── FormModal
//! │   └── FormFieldInput (one per field)
//! └── ConfirmDialog
//! ```

pub mod confirm_dialog;
pub mod data_table;
pub mod form_modal;
pub mod inputs;

pub use confirm_dialog::ConfirmDialog;
pub use data_table::DataTable;
pub use form_modal::FormModal;
pub use inputs::FormFieldInput;
