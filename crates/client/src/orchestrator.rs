//! CRUD orchestration
//!
//! `CrudOrchestrator` ties the session, the request builder and a transport
//! together. Every operation follows the same cycle: check preconditions
//! against the session, build requests, dispatch them, interpret the
//! responses, then reload the table and report the outcome as a transient
//! notification. Failures are reported the same way and also returned, so
//! the UI can ignore the result while tests inspect it.

use crate::request::{self, ApiRequest, UpdatePlan};
use crate::transport::Transport;
use async_trait::async_trait;
use careadmin_core::{AdminError, AdminResult, FormValues};
use careadmin_schema::{TableRegistry, TableSchema};
use careadmin_view::{FormMode, NotificationLevel, Session, SessionStore, check_required};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Question asked before a record is deleted
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this record?";

/// Interactive yes/no confirmation
#[async_trait(?Send)]
pub trait ConfirmGate {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Drives CRUD operations against the backend
pub struct CrudOrchestrator<T, S> {
    registry: Arc<TableRegistry>,
    transport: Arc<T>,
    store: S,
}

impl<T, S: Clone> Clone for CrudOrchestrator<T, S> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            transport: Arc::clone(&self.transport),
            store: self.store.clone(),
        }
    }
}

impl<T: Transport, S: SessionStore> CrudOrchestrator<T, S> {
    /// Create an orchestrator
    pub fn new(registry: Arc<TableRegistry>, transport: Arc<T>, store: S) -> Self {
        Self {
            registry,
            transport,
            store,
        }
    }

    /// The table registry
    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    /// The session store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Copy of the current session
    pub fn session(&self) -> Session {
        self.store.snapshot()
    }

    fn schema(&self, session: &Session) -> AdminResult<&TableSchema> {
        self.registry.get(session.table())
    }

    fn report(&self, err: &AdminError) {
        if err.is_precondition() {
            debug!(error = %err, "Rejected before sending");
        } else if !err.is_crud() {
            warn!(error = %err, "Operation failed");
        }
        let text = err.user_message();
        self.store.update(|s| s.notify(NotificationLevel::Error, text));
    }

    fn succeed(&self, text: &str) {
        self.store.update(|s| s.notify(NotificationLevel::Success, text));
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Show another table and load it
    pub async fn switch_table(&self, key: &str) -> AdminResult<usize> {
        let registry = &self.registry;
        if let Err(e) = self.store.update(|s| s.switch_table(registry, key)) {
            self.report(&e);
            return Err(e);
        }
        info!(table = key, "Switched table");
        self.load(true).await
    }

    /// Reload the current table
    pub async fn refresh(&self) -> AdminResult<usize> {
        self.load(true).await
    }

    /// Load the current table; returns the number of records fetched
    ///
    /// An announced load reports success; a quiet one (after a mutation)
    /// only reports failure. A failed load shows an empty table. Results
    /// overtaken by a later load are dropped.
    pub async fn load(&self, announce: bool) -> AdminResult<usize> {
        let (ticket, key) = self.store.update(|s| (s.begin_load(), s.table().to_string()));
        let schema = self.registry.get(&key)?;

        match self.fetch(&request::list(schema)).await {
            Ok(records) => {
                let count = records.len();
                let applied = self.store.update(|s| {
                    let applied = s.finish_load(ticket, records);
                    if applied && announce {
                        s.notify(NotificationLevel::Success, "Data loaded successfully");
                    }
                    applied
                });
                if applied {
                    info!(table = %key, count, "Loaded records");
                }
                Ok(count)
            }
            Err(e) => {
                warn!(table = %key, error = %e, "Failed to load records");
                let text = e.user_message();
                self.store.update(|s| {
                    if s.finish_load(ticket, Vec::new()) {
                        s.notify(NotificationLevel::Error, text);
                    }
                });
                Err(e)
            }
        }
    }

    async fn fetch(&self, request: &ApiRequest) -> AdminResult<Vec<careadmin_core::Record>> {
        let response = self.dispatch(request).await?;
        response.check(request.action)?;
        response.records()
    }

    // ========================================================================
    // Selection and forms
    // ========================================================================

    /// Select a row of the displayed table
    pub fn select_row(&self, index: usize) -> AdminResult<()> {
        self.store.update(|s| s.select_row(index))
    }

    /// Open the create form
    pub fn open_create(&self) -> AdminResult<()> {
        self.store.update(|s| s.open_create())
    }

    /// Open the update form for the selected row
    pub fn open_update(&self) -> AdminResult<()> {
        let result = self.store.update(|s| s.open_update());
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    /// Close the form without submitting
    pub fn close_form(&self) {
        self.store.update(|s| s.close_form());
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Submit the open form
    ///
    /// On success the form closes and the table reloads; on failure the
    /// form stays open with the operator's input.
    pub async fn submit(&self, values: &FormValues) -> AdminResult<()> {
        match self.try_submit(values).await {
            Ok(message) => {
                info!(table = %self.session().table(), "{}", message);
                self.close_form();
                self.succeed(message);
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Submit failed");
                self.report(&e);
                Err(e)
            }
        }
    }

    async fn try_submit(&self, values: &FormValues) -> AdminResult<&'static str> {
        let session = self.session();
        let schema = self.schema(&session)?;

        match session.mode() {
            FormMode::Closed => Err(AdminError::transition("no form is open")),
            FormMode::Create => {
                check_required(schema, values)?;
                let request = request::create(schema, values);
                self.execute(&request).await?;
                Ok("Record created successfully")
            }
            FormMode::Update => {
                let record = session
                    .selected_record()
                    .ok_or_else(|| AdminError::no_selection("update"))?;
                match request::update(schema, record, values)? {
                    UpdatePlan::Single(request) => self.execute(&request).await?,
                    UpdatePlan::DualChannel { attachment, fields } => {
                        self.execute_dual(attachment.as_ref(), fields.as_ref()).await?
                    }
                }
                Ok("Record updated successfully")
            }
        }
    }

    /// Delete the selected record after confirmation
    ///
    /// Returns `Ok(false)` when the operator declines.
    pub async fn delete(&self, gate: &impl ConfirmGate) -> AdminResult<bool> {
        let session = self.session();
        let Some(record) = session.selected_record() else {
            let err = AdminError::no_selection("delete");
            self.report(&err);
            return Err(err);
        };

        if !gate.confirm(DELETE_PROMPT).await {
            info!("Delete declined");
            return Ok(false);
        }

        let result = match self.schema(&session) {
            Ok(schema) => match request::delete(schema, record) {
                Ok(request) => self.execute(&request).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!(table = %session.table(), "Record deleted");
                self.store.update(|s| s.clear_selection());
                self.succeed("Record deleted successfully");
                self.reload_after_mutation().await;
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Delete failed");
                self.report(&e);
                Err(e)
            }
        }
    }

    async fn reload_after_mutation(&self) {
        // failures are already reported by the load itself
        if let Err(e) = self.load(false).await {
            warn!(error = %e, "Reload after mutation failed");
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    async fn dispatch(&self, request: &ApiRequest) -> AdminResult<crate::ApiResponse> {
        self.transport
            .send(request)
            .await
            .map_err(|e| match e {
                AdminError::Transport(msg) => request.action.error(msg),
                other => other,
            })
    }

    async fn execute(&self, request: &ApiRequest) -> AdminResult<()> {
        self.dispatch(request).await?.check(request.action)
    }

    async fn execute_optional(&self, request: Option<&ApiRequest>) -> Option<AdminResult<()>> {
        match request {
            Some(request) => Some(self.execute(request).await),
            None => None,
        }
    }

    /// Send the attachment and field requests concurrently
    ///
    /// There is no rollback: when one side fails the other may already have
    /// been applied. The attachment failure wins when both fail.
    async fn execute_dual(
        &self,
        attachment: Option<&ApiRequest>,
        fields: Option<&ApiRequest>,
    ) -> AdminResult<()> {
        let (attachment_result, fields_result) = tokio::join!(
            self.execute_optional(attachment),
            self.execute_optional(fields)
        );

        match (attachment_result, fields_result) {
            (Some(Err(e)), fields) => {
                if matches!(fields, Some(Ok(()))) {
                    warn!(error = %e, "Photo update failed after fields were updated");
                }
                Err(e)
            }
            (attachment, Some(Err(e))) => {
                if matches!(attachment, Some(Ok(()))) {
                    warn!(error = %e, "Field update failed after photo was updated");
                }
                Err(e)
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiResponse;
    use crate::request::{Body, Method};
    use careadmin_core::FileUpload;
    use careadmin_view::{MemoryStore, Notification};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, VecDeque};
    use tokio::sync::oneshot;

    // ------------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------------

    #[derive(Default)]
    struct MockTransport {
        sent: RefCell<Vec<ApiRequest>>,
        routes: RefCell<HashMap<(Method, String), VecDeque<ApiResponse>>>,
        hold: RefCell<Option<oneshot::Receiver<()>>>,
        offline: Cell<bool>,
    }

    impl MockTransport {
        fn on(&self, method: Method, path: &str, response: ApiResponse) {
            self.routes
                .borrow_mut()
                .entry((method, path.to_string()))
                .or_default()
                .push_back(response);
        }

        fn replace(&self, method: Method, path: &str, response: ApiResponse) {
            self.routes
                .borrow_mut()
                .insert((method, path.to_string()), VecDeque::from([response]));
        }

        fn on_json(&self, method: Method, path: &str, status: u16, body: Value) {
            self.on(method, path, ApiResponse::json(status, reason(status), &body));
        }

        fn sent(&self) -> Vec<ApiRequest> {
            self.sent.borrow().clone()
        }

        fn count(&self, method: Method) -> usize {
            self.sent.borrow().iter().filter(|r| r.method == method).count()
        }

        fn respond(&self, request: &ApiRequest) -> ApiResponse {
            let mut routes = self.routes.borrow_mut();
            if let Some(queue) = routes.get_mut(&(request.method, request.path.clone())) {
                if queue.len() > 1 {
                    return queue.pop_front().unwrap();
                }
                if let Some(last) = queue.front() {
                    return last.clone();
                }
            }
            match request.method {
                Method::Get => ApiResponse::json(200, "OK", &json!([])),
                Method::Delete => ApiResponse::new(204, "No Content", Vec::new()),
                _ => ApiResponse::json(200, "OK", &json!({})),
            }
        }
    }

    fn reason(status: u16) -> &'static str {
        match status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            422 => "Unprocessable Entity",
            _ => "Internal Server Error",
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send(&self, request: &ApiRequest) -> AdminResult<ApiResponse> {
            self.sent.borrow_mut().push(request.clone());
            if self.offline.get() {
                return Err(AdminError::transport("connection refused"));
            }
            let response = self.respond(request);
            let hold = self.hold.borrow_mut().take();
            if let Some(rx) = hold {
                let _ = rx.await;
            }
            Ok(response)
        }
    }

    /// Session store that keeps every notification shown
    #[derive(Clone)]
    struct RecordingStore {
        inner: MemoryStore,
        shown: std::rc::Rc<RefCell<Vec<Notification>>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(Session::new("users")),
                shown: Default::default(),
            }
        }

        fn texts(&self) -> Vec<String> {
            self.shown.borrow().iter().map(|n| n.text.clone()).collect()
        }
    }

    impl SessionStore for RecordingStore {
        fn snapshot(&self) -> Session {
            self.inner.snapshot()
        }

        fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
            let (result, after) = self.inner.update(|s| {
                let before = s.notification().map(|n| n.id);
                let result = f(s);
                let after = s.notification().filter(|n| Some(n.id) != before).cloned();
                (result, after)
            });
            if let Some(n) = after {
                self.shown.borrow_mut().push(n);
            }
            result
        }
    }

    struct Answer(bool);

    #[async_trait(?Send)]
    impl ConfirmGate for Answer {
        async fn confirm(&self, prompt: &str) -> bool {
            assert_eq!(prompt, DELETE_PROMPT);
            self.0
        }
    }

    type Harness = (
        CrudOrchestrator<MockTransport, RecordingStore>,
        Arc<MockTransport>,
        RecordingStore,
    );

    fn harness() -> Harness {
        let transport = Arc::new(MockTransport::default());
        let store = RecordingStore::new();
        let orchestrator = CrudOrchestrator::new(
            Arc::new(TableRegistry::standard()),
            Arc::clone(&transport),
            store.clone(),
        );
        (orchestrator, transport, store)
    }

    async fn on_table(key: &str, rows: Value) -> Harness {
        let (orchestrator, transport, store) = harness();
        let path = orchestrator.registry().get(key).unwrap().endpoint.clone();
        transport.on_json(Method::Get, &path, 200, rows);
        orchestrator.switch_table(key).await.unwrap();
        transport.sent.borrow_mut().clear();
        store.shown.borrow_mut().clear();
        (orchestrator, transport, store)
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_refresh_success() {
        let (orchestrator, transport, store) = harness();
        transport.on_json(Method::Get, "/users", 200, json!([{ "user_id": 1 }, { "user_id": 2 }]));

        assert_eq!(orchestrator.refresh().await.unwrap(), 2);
        assert_eq!(orchestrator.session().records().len(), 2);
        assert_eq!(store.texts(), vec!["Data loaded successfully"]);
    }

    #[tokio::test]
    async fn test_load_failure_shows_empty_table() {
        let (orchestrator, transport, store) = on_table("users", json!([{ "user_id": 1 }])).await;
        transport.replace(Method::Get, "/users", ApiResponse::new(500, "Internal Server Error", "oops"));

        let err = orchestrator.refresh().await.unwrap_err();
        assert!(matches!(err, AdminError::Load(_)));
        assert!(orchestrator.session().records().is_empty());
        assert_eq!(
            store.texts(),
            vec!["Error loading data: HTTP 500: Internal Server Error"]
        );
    }

    #[tokio::test]
    async fn test_load_failure_without_detail_uses_fallback() {
        let (orchestrator, transport, store) = harness();
        transport.on_json(Method::Get, "/users", 503, json!({}));

        assert!(orchestrator.refresh().await.is_err());
        assert_eq!(store.texts(), vec!["Error loading data: Failed to load data"]);
    }

    #[tokio::test]
    async fn test_load_offline() {
        let (orchestrator, transport, store) = harness();
        transport.offline.set(true);

        let err = orchestrator.refresh().await.unwrap_err();
        assert!(matches!(err, AdminError::Load(_)));
        assert_eq!(store.texts(), vec!["Error loading data: connection refused"]);
    }

    #[tokio::test]
    async fn test_switch_to_unknown_table() {
        let (orchestrator, transport, store) = harness();
        let err = orchestrator.switch_table("payments").await.unwrap_err();
        assert!(matches!(err, AdminError::UnknownTable(_)));
        assert!(transport.sent().is_empty());
        assert_eq!(store.texts(), vec!["Error: Unknown table: payments"]);
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let (orchestrator, transport, _store) = harness();
        transport.on_json(Method::Get, "/users", 200, json!([{ "user_id": 1 }, { "user_id": 2 }, { "user_id": 3 }]));
        transport.on_json(Method::Get, "/users", 200, json!([{ "user_id": 9 }]));

        let (release, held) = oneshot::channel();
        *transport.hold.borrow_mut() = Some(held);

        let (slow, fast) = tokio::join!(orchestrator.refresh(), async {
            let fast = orchestrator.refresh().await;
            let _ = release.send(());
            fast
        });

        assert_eq!(slow.unwrap(), 3);
        assert_eq!(fast.unwrap(), 1);
        let session = orchestrator.session();
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.records()[0]["user_id"], json!(9));
    }

    // ------------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------------

    fn new_user() -> FormValues {
        FormValues::new()
            .with_text("email", "aru@care.kz")
            .with_text("given_name", "Aru")
            .with_text("surname", "Bek")
            .with_text("city", "Almaty")
            .with_text("phone_number", "+77010000000")
            .with_text("password", "secret")
    }

    #[tokio::test]
    async fn test_create_success() {
        let (orchestrator, transport, store) = on_table("users", json!([])).await;
        orchestrator.open_create().unwrap();

        orchestrator.submit(&new_user()).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].path, "/users/");
        assert!(matches!(&sent[0].body, Body::Multipart(parts) if parts.len() == 6));
        assert_eq!(sent[1].method, Method::Get);
        assert_eq!(store.texts(), vec!["Record created successfully"]);
        assert_eq!(orchestrator.session().mode(), FormMode::Closed);
    }

    #[tokio::test]
    async fn test_create_missing_required() {
        let (orchestrator, transport, store) = on_table("users", json!([])).await;
        orchestrator.open_create().unwrap();

        let values = FormValues::new().with_text("email", "aru@care.kz");
        let err = orchestrator.submit(&values).await.unwrap_err();

        assert!(matches!(err, AdminError::MissingRequired { ref field, .. } if field == "given_name"));
        assert!(transport.sent().is_empty());
        assert_eq!(store.texts(), vec!["Error: Given Name is required"]);
        assert_eq!(orchestrator.session().mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn test_create_backend_error_keeps_form_open() {
        let (orchestrator, transport, store) = on_table("users", json!([])).await;
        transport.on_json(Method::Post, "/users/", 400, json!({ "detail": "Email already registered" }));
        orchestrator.open_create().unwrap();

        let err = orchestrator.submit(&new_user()).await.unwrap_err();
        assert!(matches!(err, AdminError::Create(_)));
        assert_eq!(transport.count(Method::Get), 0);
        assert_eq!(store.texts(), vec!["Error: Email already registered"]);
        assert_eq!(orchestrator.session().mode(), FormMode::Create);
    }

    // ------------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------------

    async fn caregiver_update() -> Harness {
        let harness = on_table(
            "caregivers",
            json!([{ "caregiver_user_id": 3, "gender": "MALE", "photo": "photos/3.jpg" }]),
        )
        .await;
        harness.0.select_row(0).unwrap();
        harness.0.open_update().unwrap();
        harness
    }

    fn photo() -> FileUpload {
        FileUpload::new("face.png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_dual_channel_file_only() {
        let (orchestrator, transport, store) = caregiver_update().await;
        orchestrator
            .submit(&FormValues::new().with_file("photo", photo()))
            .await
            .unwrap();

        assert_eq!(transport.count(Method::Put), 1);
        assert_eq!(transport.sent()[0].path, "/caregivers/3/photo");
        assert_eq!(store.texts(), vec!["Record updated successfully"]);
    }

    #[tokio::test]
    async fn test_dual_channel_fields_only() {
        let (orchestrator, transport, _store) = caregiver_update().await;
        orchestrator
            .submit(&FormValues::new().with_text("gender", "FEMALE"))
            .await
            .unwrap();

        assert_eq!(transport.count(Method::Put), 1);
        assert_eq!(transport.sent()[0].target(), "/caregivers/3?gender=FEMALE");
    }

    #[tokio::test]
    async fn test_dual_channel_both() {
        let (orchestrator, transport, _store) = caregiver_update().await;
        let values = FormValues::new()
            .with_text("gender", "FEMALE")
            .with_file("photo", photo());
        orchestrator.submit(&values).await.unwrap();

        assert_eq!(transport.count(Method::Put), 2);
        assert_eq!(transport.count(Method::Get), 1);
    }

    #[tokio::test]
    async fn test_dual_channel_nothing() {
        let (orchestrator, transport, store) = caregiver_update().await;
        let err = orchestrator.submit(&FormValues::new()).await.unwrap_err();

        assert!(matches!(err, AdminError::NoFields));
        assert!(transport.sent().is_empty());
        assert_eq!(store.texts(), vec!["Error: No fields to update"]);
        assert_eq!(orchestrator.session().mode(), FormMode::Update);
    }

    #[tokio::test]
    async fn test_dual_channel_photo_failure_reported() {
        let (orchestrator, transport, store) = caregiver_update().await;
        transport.on_json(Method::Put, "/caregivers/3/photo", 500, json!({}));
        let values = FormValues::new()
            .with_text("gender", "FEMALE")
            .with_file("photo", photo());

        let err = orchestrator.submit(&values).await.unwrap_err();
        assert!(matches!(err, AdminError::Update(_)));
        assert_eq!(transport.count(Method::Put), 2);
        assert_eq!(store.texts(), vec!["Error: Failed to update photo"]);
    }

    #[tokio::test]
    async fn test_dual_channel_fields_failure_reported() {
        let (orchestrator, transport, store) = caregiver_update().await;
        transport.on_json(
            Method::Put,
            "/caregivers/3",
            422,
            json!({ "detail": [{ "loc": ["query", "hourly_rate"], "msg": "bad rate" }] }),
        );
        let values = FormValues::new()
            .with_text("hourly_rate", "-5")
            .with_file("photo", photo());

        let err = orchestrator.submit(&values).await.unwrap_err();
        assert!(matches!(err, AdminError::Update(ref m) if m == "bad rate"));
        assert_eq!(transport.count(Method::Put), 2);
        assert_eq!(transport.count(Method::Get), 0);
        assert_eq!(store.texts(), vec!["Error: bad rate"]);
        assert_eq!(orchestrator.session().mode(), FormMode::Update);
    }

    #[tokio::test]
    async fn test_composite_update_path() {
        let (orchestrator, transport, _store) = on_table(
            "job-applications",
            json!([{ "caregiver_user_id": 3, "job_id": 7, "date_applied": "2024-03-01" }]),
        )
        .await;
        orchestrator.select_row(0).unwrap();
        orchestrator.open_update().unwrap();

        orchestrator
            .submit(&FormValues::new().with_text("date_applied", "2024-03-02"))
            .await
            .unwrap();
        assert_eq!(transport.sent()[0].path, "/job-applications/caregiver/3/job/7");
    }

    #[tokio::test]
    async fn test_open_update_without_selection() {
        let (orchestrator, _transport, store) = on_table("users", json!([{ "user_id": 1 }])).await;
        let err = orchestrator.open_update().unwrap_err();
        assert!(matches!(err, AdminError::NoSelection(_)));
        assert_eq!(store.texts(), vec!["Please select a row to update"]);
    }

    // ------------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_delete_without_selection() {
        let (orchestrator, transport, store) = on_table("users", json!([{ "user_id": 1 }])).await;
        let err = orchestrator.delete(&Answer(true)).await.unwrap_err();

        assert!(matches!(err, AdminError::NoSelection(_)));
        assert!(transport.sent().is_empty());
        assert_eq!(store.texts(), vec!["Please select a row to delete"]);
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let (orchestrator, transport, store) = on_table("users", json!([{ "user_id": 1 }])).await;
        orchestrator.select_row(0).unwrap();

        assert!(!orchestrator.delete(&Answer(false)).await.unwrap());
        assert!(transport.sent().is_empty());
        assert!(store.texts().is_empty());
        assert_eq!(orchestrator.session().selected(), Some(0));
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let (orchestrator, transport, store) = on_table(
            "job-applications",
            json!([{ "caregiver_user_id": 3, "job_id": 7 }]),
        )
        .await;
        orchestrator.select_row(0).unwrap();

        assert!(orchestrator.delete(&Answer(true)).await.unwrap());
        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, Method::Delete);
        assert_eq!(sent[0].path, "/job-applications/caregiver/3/job/7");
        assert_eq!(store.texts(), vec!["Record deleted successfully"]);
        assert_eq!(orchestrator.session().selected(), None);
    }

    #[tokio::test]
    async fn test_delete_backend_error() {
        let (orchestrator, transport, store) = on_table("users", json!([{ "user_id": 1 }])).await;
        transport.on(Method::Delete, "/users/1", ApiResponse::new(404, "Not Found", ""));
        orchestrator.select_row(0).unwrap();

        let err = orchestrator.delete(&Answer(true)).await.unwrap_err();
        assert!(matches!(err, AdminError::Delete(_)));
        assert_eq!(transport.count(Method::Get), 0);
        assert_eq!(store.texts(), vec!["Error: HTTP 404: Not Found"]);
    }
}
