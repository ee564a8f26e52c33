//! # Care Admin View
//!
//! UI-independent presentation logic: the session state machine (selected
//! table, selected row, form mode, notifications) and pure projections of
//! records into table rows and of schemas into forms.
//!
//! Nothing here touches the network or a GUI toolkit, so every rule about
//! what the operator sees is testable on its own.

pub mod form;
pub mod format;
pub mod session;
pub mod table;

pub use form::{DraftValue, FormDraft, FormFieldView, FormView, Widget, check_required};
pub use format::{humanize, normalize_date, truncate_time};
pub use session::{
    FormMode, LoadTicket, MemoryStore, Notification, NotificationLevel, Session, SessionStore,
};
pub use table::{CellView, EMPTY_PLACEHOLDER, RowView, TableView};
