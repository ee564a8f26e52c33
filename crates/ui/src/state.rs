//! Application State Management for Care Admin
//!
//! The panel's state lives in one Dioxus global signal. The CRUD
//! orchestrator reaches it through `UiStore`, so every session change made by
//! a request (loaded records, notifications, closing the form) re-renders
//! the components that read it.

use async_trait::async_trait;
use careadmin_client::{ConfirmGate, CrudOrchestrator, HttpTransport};
use careadmin_core::AdminResult;
use careadmin_schema::{DEFAULT_TABLE, TableRegistry, TableSchema};
use careadmin_view::{FormDraft, FormView, Session, SessionStore};
use dioxus::prelude::*;
use tokio::sync::oneshot;

/// Orchestrator type used by the desktop app
pub type Admin = CrudOrchestrator<HttpTransport, UiStore>;

// ============================================================================
// App State
// ============================================================================

/// Main application state container
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Table, records, selection, form mode and notification
    pub session: Session,
    /// Values entered in the open form
    pub draft: FormDraft,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: Session::new(DEFAULT_TABLE),
            draft: FormDraft::default(),
        }
    }
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self::default()
    }

    /// Form for the open mode, if a form is open
    pub fn form_view(&self, schema: &TableSchema) -> Option<FormView> {
        if !self.session.mode().is_open() {
            return None;
        }
        FormView::build(schema, self.session.mode(), self.session.selected_record()).ok()
    }

    /// Re-seed the draft from the freshly opened form
    pub fn reset_draft(&mut self, registry: &TableRegistry) {
        self.draft = registry
            .get(self.session.table())
            .ok()
            .and_then(|schema| self.form_view(schema))
            .map(|view| FormDraft::from_view(&view))
            .unwrap_or_default();
    }
}

/// Global application state signal
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

// ============================================================================
// Session Store
// ============================================================================

/// `SessionStore` over the global state signal
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiStore;

impl SessionStore for UiStore {
    fn snapshot(&self) -> Session {
        APP_STATE.read().session.clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut state = APP_STATE.write();
        f(&mut state.session)
    }
}

// ============================================================================
// Confirmation
// ============================================================================

/// A question waiting for the operator's answer
#[derive(Debug)]
pub struct PendingConfirm {
    pub prompt: String,
    reply: oneshot::Sender<bool>,
}

/// The open confirmation dialog, if any
pub static CONFIRM: GlobalSignal<Option<PendingConfirm>> = Signal::global(|| None);

/// Answer the open confirmation dialog
pub fn answer_confirm(yes: bool) {
    if let Some(pending) = CONFIRM.write().take() {
        // the asking task may already be gone
        let _ = pending.reply.send(yes);
    }
}

/// `ConfirmGate` that shows the confirmation dialog and waits for a button
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogConfirm;

#[async_trait(?Send)]
impl ConfirmGate for DialogConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        // a newer question replaces (and declines) an unanswered one
        answer_confirm(false);
        *CONFIRM.write() = Some(PendingConfirm {
            prompt: prompt.to_string(),
            reply,
        });
        answer.await.unwrap_or(false)
    }
}

// ============================================================================
// Hooks
// ============================================================================

/// The orchestrator provided by `App`
pub fn use_admin() -> Admin {
    use_context::<Admin>()
}

/// Key of the table shown
pub fn use_current_table() -> String {
    APP_STATE.read().session.table().to_string()
}

/// Open the create form and seed an empty draft
pub fn open_create(admin: &Admin) -> AdminResult<()> {
    admin.open_create()?;
    APP_STATE.write().reset_draft(admin.registry());
    Ok(())
}

/// Open the update form and seed the draft from the selected row
pub fn open_update(admin: &Admin) -> AdminResult<()> {
    admin.open_update()?;
    APP_STATE.write().reset_draft(admin.registry());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
