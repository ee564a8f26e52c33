//! Selection and mode state
//!
//! `Session` is the whole mutable state of the panel: which table is shown,
//! the records last loaded for it, the selected row, whether the form modal
//! is open (and for what), and the transient notification.
//!
//! Transitions are methods returning `AdminResult` so an illegal request
//! (opening an update form with nothing selected, selecting a row while the
//! form is open) is reported instead of silently corrupting state.

use careadmin_core::{AdminError, AdminResult, Record};
use careadmin_schema::TableRegistry;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::debug;

// ============================================================================
// Form Mode
// ============================================================================

/// Whether the form modal is open, and for which operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// No modal shown
    #[default]
    Closed,
    /// Modal shows an empty create form
    Create,
    /// Modal shows an update form seeded from the selected row
    Update,
}

impl FormMode {
    /// Check if a form is open
    pub fn is_open(&self) -> bool {
        !matches!(self, FormMode::Closed)
    }

    /// Check if the open form updates an existing record
    pub fn is_update(&self) -> bool {
        matches!(self, FormMode::Update)
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl NotificationLevel {
    /// CSS class for the banner
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        }
    }
}

/// A transient message shown in the banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifies this message for expiry
    pub id: u64,
    pub text: String,
    pub level: NotificationLevel,
}

// ============================================================================
// Load Tickets
// ============================================================================

/// Sequence number handed out when a list load starts
///
/// Only the result of the most recently issued load is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

// ============================================================================
// Session
// ============================================================================

/// Panel state
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    table: String,
    records: Vec<Record>,
    selected: Option<usize>,
    mode: FormMode,
    notification: Option<Notification>,
    load_seq: u64,
    notification_seq: u64,
}

impl Session {
    /// Create a session showing the given table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            records: Vec::new(),
            selected: None,
            mode: FormMode::Closed,
            notification: None,
            load_seq: 0,
            notification_seq: 0,
        }
    }

    /// Create a session on the registry's start table
    pub fn for_registry(registry: &TableRegistry) -> AdminResult<Self> {
        registry
            .default_key()
            .map(Self::new)
            .ok_or_else(|| AdminError::validation("Registry declares no tables"))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Key of the table shown
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Records from the last applied load
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Index of the selected row
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected record
    pub fn selected_record(&self) -> Option<&Record> {
        self.selected.and_then(|i| self.records.get(i))
    }

    /// Current form mode
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Current notification
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Show another table: clears records and selection, closes the form
    pub fn switch_table(&mut self, registry: &TableRegistry, key: &str) -> AdminResult<()> {
        registry.get(key)?;
        self.table = key.to_string();
        self.records.clear();
        self.selected = None;
        self.mode = FormMode::Closed;
        // loads issued for the previous table are now stale
        self.load_seq += 1;
        Ok(())
    }

    /// Select a row of the loaded records
    pub fn select_row(&mut self, index: usize) -> AdminResult<()> {
        if self.mode.is_open() {
            return Err(AdminError::transition("cannot select a row while a form is open"));
        }
        if index >= self.records.len() {
            return Err(AdminError::transition(format!(
                "row {} is out of range ({} rows)",
                index,
                self.records.len()
            )));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Drop the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Open the create form
    pub fn open_create(&mut self) -> AdminResult<()> {
        if self.mode.is_open() {
            return Err(AdminError::transition("a form is already open"));
        }
        self.mode = FormMode::Create;
        Ok(())
    }

    /// Open the update form for the selected row
    pub fn open_update(&mut self) -> AdminResult<()> {
        if self.selected_record().is_none() {
            return Err(AdminError::no_selection("update"));
        }
        if self.mode.is_open() {
            return Err(AdminError::transition("a form is already open"));
        }
        self.mode = FormMode::Update;
        Ok(())
    }

    /// Close the form modal
    pub fn close_form(&mut self) {
        self.mode = FormMode::Closed;
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Start a list load
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        LoadTicket(self.load_seq)
    }

    /// Check if a ticket belongs to the most recently issued load
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.load_seq
    }

    /// Apply a load result; returns `false` and changes nothing if stale
    ///
    /// Applying replaces the records and clears the selection.
    pub fn finish_load(&mut self, ticket: LoadTicket, records: Vec<Record>) -> bool {
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, latest = self.load_seq, "Discarding stale load");
            return false;
        }
        self.records = records;
        self.selected = None;
        true
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Show a notification, replacing the current one
    pub fn notify(&mut self, level: NotificationLevel, text: impl Into<String>) -> u64 {
        self.notification_seq += 1;
        self.notification = Some(Notification {
            id: self.notification_seq,
            text: text.into(),
            level,
        });
        self.notification_seq
    }

    /// Clear a notification if it is still the one shown
    pub fn expire_notification(&mut self, id: u64) -> bool {
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            true
        } else {
            false
        }
    }
}

// ============================================================================
// Session Stores
// ============================================================================

/// Owner of the live session
///
/// The orchestrator only reads and mutates the session through this trait,
/// so the same CRUD logic runs against the UI's reactive state and against
/// a plain in-memory store.
pub trait SessionStore {
    /// Copy of the current session
    fn snapshot(&self) -> Session;

    /// Mutate the session
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R;
}

/// Shared in-memory session with change notifications
#[derive(Debug, Clone)]
pub struct MemoryStore {
    session: Arc<Mutex<Session>>,
    changes: Arc<watch::Sender<Session>>,
}

impl MemoryStore {
    /// Create a store holding the given session
    pub fn new(session: Session) -> Self {
        let (changes, _) = watch::channel(session.clone());
        Self {
            session: Arc::new(Mutex::new(session)),
            changes: Arc::new(changes),
        }
    }

    /// Receive a copy of the session after every update
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.changes.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemoryStore {
    fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let (result, snapshot) = {
            let mut session = self.lock();
            let result = f(&mut session);
            (result, session.clone())
        };
        self.changes.send_replace(snapshot);
        result
    }
}

// ============================================================================
// Tests
// ============================================================================
