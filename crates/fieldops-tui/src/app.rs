//! Application state
//!
//! Screen state machine plus the async bridge: every network call runs in
//! a spawned task and reports back over an unbounded channel. Fetches are
//! stamped with a per-slot sequence number; results arriving after a
//! newer fetch was issued are dropped instead of clobbering fresh state.

use std::sync::Arc;

use fieldops_client::api::PendingRequest;
use fieldops_client::{ApiClient, ImageUploader, Session};
use fieldops_core::{ApprovalStatus, Capabilities, User};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::entity::{Collection, EntityKind, Record};
use crate::viewmodel::{AssignVm, CreateVm, DetailVm, ListVm, PhotosVm, VisitVm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    List,
    Detail,
    Create,
    Approvals,
}

/// Modal layered over the current screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    ConfirmDelete,
    Assign,
    Photos,
    Visits,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Entity(EntityKind),
    Approvals,
    Exit,
}

impl MenuItem {
    pub fn all() -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = EntityKind::all().iter().copied().map(MenuItem::Entity).collect();
        items.push(MenuItem::Approvals);
        items.push(MenuItem::Exit);
        items
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Entity(kind) => kind.label(),
            MenuItem::Approvals => "User Approvals",
            MenuItem::Exit => "Exit",
        }
    }
}

/// Results reported by spawned tasks.
pub enum AppEvent {
    ListLoaded {
        kind: EntityKind,
        seq: u64,
        result: Result<Collection, String>,
    },
    DetailLoaded {
        seq: u64,
        result: Result<(Record, Vec<User>), String>,
    },
    RecordSaved {
        result: Result<Record, String>,
    },
    RecordCreated {
        kind: EntityKind,
        result: Result<Record, String>,
    },
    RecordDeleted {
        kind: EntityKind,
        result: Result<(), String>,
    },
    WorkersAssigned {
        result: Result<Vec<String>, String>,
    },
    PendingLoaded {
        seq: u64,
        result: Result<Vec<PendingRequest>, String>,
    },
    ApprovalDecided {
        result: Result<(), String>,
    },
    PhotoUploaded {
        result: Result<String, String>,
    },
}

pub struct App {
    pub screen: Screen,
    pub overlay: Option<Overlay>,
    /// Transient toast: (text, is_error). Any key dismisses it.
    pub message: Option<(String, bool)>,
    pub should_quit: bool,

    pub menu_index: usize,
    pub menu_items: Vec<MenuItem>,

    pub list: Option<ListVm>,
    pub detail: Option<DetailVm>,
    pub create: Option<CreateVm>,
    pub assign: Option<AssignVm>,
    pub photos: Option<PhotosVm>,
    pub visits: Option<VisitVm>,

    pub approvals: Vec<PendingRequest>,
    pub approvals_cursor: usize,
    pub approvals_loading: bool,

    api: Arc<ApiClient>,
    uploader: Option<Arc<ImageUploader>>,
    session: Arc<Session>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    // Latest issued fetch per slot; older results are stale.
    list_seq: u64,
    detail_seq: u64,
    pending_seq: u64,
    next_seq: u64,
}

impl App {
    pub fn new(api: ApiClient, uploader: Option<ImageUploader>, session: Session) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            screen: Screen::Menu,
            overlay: None,
            message: None,
            should_quit: false,
            menu_index: 0,
            menu_items: MenuItem::all(),
            list: None,
            detail: None,
            create: None,
            assign: None,
            photos: None,
            visits: None,
            approvals: Vec::new(),
            approvals_cursor: 0,
            approvals_loading: false,
            api: Arc::new(api),
            uploader: uploader.map(Arc::new),
            session: Arc::new(session),
            event_tx,
            event_rx,
            list_seq: 0,
            detail_seq: 0,
            pending_seq: 0,
            next_seq: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn capabilities(&self) -> Capabilities {
        self.session.capabilities()
    }

    pub fn selected_menu_item(&self) -> MenuItem {
        self.menu_items[self.menu_index]
    }

    pub fn menu_up(&mut self) {
        if self.menu_index > 0 {
            self.menu_index -= 1;
        }
    }

    pub fn menu_down(&mut self) {
        if self.menu_index + 1 < self.menu_items.len() {
            self.menu_index += 1;
        }
    }

    pub fn show_message(&mut self, text: impl Into<String>, is_error: bool) {
        self.message = Some((text.into(), is_error));
    }

    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    // ------------------------------------------------------------------
    // Navigation + spawned fetches
    // ------------------------------------------------------------------

    pub fn open_list(&mut self, kind: EntityKind) {
        self.screen = Screen::List;
        self.overlay = None;
        self.detail = None;
        self.create = None;
        self.list = Some(ListVm::new(kind));
        self.refresh_list(kind);
    }

    pub fn refresh_list(&mut self, kind: EntityKind) {
        let seq = self.bump();
        self.list_seq = seq;
        if let Some(list) = self.list.as_mut() {
            list.loading = true;
        }

        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match kind {
                EntityKind::Projects => {
                    api.list_projects(&session).await.map(Collection::Projects)
                }
                EntityKind::Complaints => {
                    api.list_complaints(&session).await.map(Collection::Complaints)
                }
                EntityKind::Maintenances => {
                    api.list_maintenances(&session).await.map(Collection::Maintenances)
                }
                EntityKind::Invoices => {
                    api.list_invoices(&session).await.map(Collection::Invoices)
                }
                EntityKind::Users => api.list_users(&session).await.map(Collection::Users),
            }
            .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ListLoaded { kind, seq, result });
        });
    }

    /// Fetch one record, and for assignable kinds the approved-user list
    /// alongside it; both must land before the detail screen renders.
    pub fn open_detail(&mut self, kind: EntityKind, id: String) {
        self.screen = Screen::Detail;
        self.overlay = None;
        self.detail = None;
        let seq = self.bump();
        self.detail_seq = seq;

        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match kind {
                EntityKind::Projects => {
                    let (record, users) = tokio::join!(
                        api.get_project(&session, &id),
                        api.list_approved_users(&session)
                    );
                    record
                        .map(Record::Project)
                        .and_then(|r| users.map(|u| (r, u)))
                }
                EntityKind::Complaints => {
                    let (record, users) = tokio::join!(
                        api.get_complaint(&session, &id),
                        api.list_approved_users(&session)
                    );
                    record
                        .map(Record::Complaint)
                        .and_then(|r| users.map(|u| (r, u)))
                }
                EntityKind::Maintenances => api
                    .get_maintenance(&session, &id)
                    .await
                    .map(|r| (Record::Maintenance(r), Vec::new())),
                EntityKind::Invoices => api
                    .get_invoice(&session, &id)
                    .await
                    .map(|r| (Record::Invoice(r), Vec::new())),
                EntityKind::Users => api
                    .get_user(&session, &id)
                    .await
                    .map(|r| (Record::User(r), Vec::new())),
            }
            .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::DetailLoaded { seq, result });
        });
    }

    pub fn open_create(&mut self, kind: EntityKind) {
        self.screen = Screen::Create;
        self.overlay = None;
        self.create = Some(CreateVm::new(kind));
    }

    pub fn open_approvals(&mut self) {
        self.screen = Screen::Approvals;
        self.overlay = None;
        self.approvals_cursor = 0;
        self.refresh_approvals();
    }

    pub fn refresh_approvals(&mut self) {
        let seq = self.bump();
        self.pending_seq = seq;
        self.approvals_loading = true;

        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api
                .pending_requests(&session)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::PendingLoaded { seq, result });
        });
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    pub fn save_detail(&mut self) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        let record = match detail.begin_save() {
            Ok(record) => record,
            Err(e) => {
                self.show_message(e.to_string(), true);
                return;
            }
        };
        self.submit_update(record);
    }

    fn submit_update(&mut self, record: Record) {
        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match &record {
                Record::Project(r) => api.update_project(&session, r).await.map(Record::Project),
                Record::Complaint(r) => {
                    api.update_complaint(&session, r).await.map(Record::Complaint)
                }
                Record::Maintenance(r) => {
                    api.update_maintenance(&session, r).await.map(Record::Maintenance)
                }
                Record::Invoice(r) => api.update_invoice(&session, r).await.map(Record::Invoice),
                Record::User(r) => api.update_user(&session, r).await.map(Record::User),
            }
            .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::RecordSaved { result });
        });
    }

    pub fn submit_create(&mut self) {
        let Some(create) = self.create.as_mut() else {
            return;
        };
        let draft = match create.begin_submit() {
            Ok(draft) => draft,
            Err(e) => {
                self.show_message(e.to_string(), true);
                return;
            }
        };
        let kind = draft.kind();

        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match &draft {
                Record::Project(r) => api.create_project(&session, r).await.map(Record::Project),
                Record::Complaint(r) => {
                    api.create_complaint(&session, r).await.map(Record::Complaint)
                }
                Record::Maintenance(r) => {
                    api.create_maintenance(&session, r).await.map(Record::Maintenance)
                }
                Record::Invoice(r) => api.create_invoice(&session, r).await.map(Record::Invoice),
                Record::User(_) => Err(fieldops_client::ClientError::Config(
                    "users are created through signup".into(),
                )),
            }
            .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::RecordCreated { kind, result });
        });
    }

    /// "Delete": hard delete for users, cancellation for everything else.
    pub fn confirm_delete(&mut self) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };
        let mut record = detail.record.clone();
        let kind = record.kind();
        let id = record.id().to_string();

        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();

        if record.cancel() {
            tokio::spawn(async move {
                let result = match &record {
                    Record::Project(r) => api.update_project(&session, r).await.map(|_| ()),
                    Record::Complaint(r) => api.update_complaint(&session, r).await.map(|_| ()),
                    Record::Maintenance(r) => {
                        api.update_maintenance(&session, r).await.map(|_| ())
                    }
                    Record::Invoice(r) => api.update_invoice(&session, r).await.map(|_| ()),
                    Record::User(_) => unreachable!("users do not cancel"),
                }
                .map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::RecordDeleted { kind, result });
            });
        } else {
            tokio::spawn(async move {
                let result = api
                    .delete_user(&session, &id)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(AppEvent::RecordDeleted { kind, result });
            });
        }
        self.overlay = None;
    }

    pub fn open_assign(&mut self) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };
        let Some(assigned) = detail.record.assigned_workers() else {
            return;
        };
        self.assign = Some(AssignVm::new(detail.reference_users.clone(), assigned));
        self.overlay = Some(Overlay::Assign);
    }

    pub fn confirm_assign(&mut self) {
        let (Some(detail), Some(assign)) = (self.detail.as_ref(), self.assign.as_ref()) else {
            return;
        };
        let kind = detail.record.kind();
        let id = detail.record.id().to_string();
        let ids = assign.confirmed();

        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match kind {
                EntityKind::Projects => {
                    api.assign_project_workers(&session, &id, &ids).await
                }
                EntityKind::Complaints => {
                    api.assign_complaint_workers(&session, &id, &ids).await
                }
                _ => Ok(()),
            }
            .map(|_| ids)
            .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::WorkersAssigned { result });
        });
    }

    pub fn cancel_assign(&mut self) {
        if let Some(assign) = self.assign.as_mut() {
            assign.reset();
        }
        self.assign = None;
        self.overlay = None;
    }

    pub fn open_photos(&mut self) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };
        let Some(photos) = detail.record.photos() else {
            return;
        };
        let max = self
            .uploader
            .as_ref()
            .map(|u| u.max_photos())
            .unwrap_or(fieldops_core::MAX_SURVEY_PHOTOS);
        self.photos = Some(PhotosVm::new(photos.clone(), max));
        self.overlay = Some(Overlay::Photos);
    }

    /// Read a local file, resize/re-encode it off the UI path and upload.
    pub fn upload_photo(&mut self, path: String) {
        let Some(uploader) = self.uploader.clone() else {
            if let Some(photos) = self.photos.as_mut() {
                photos.upload_failed("image upload is not configured".into());
            }
            return;
        };
        if let Some(photos) = self.photos.as_mut() {
            photos.uploading = true;
            photos.path_input = None;
        }

        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = async {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| format!("read {path}: {e}"))?;
                let prep = Arc::clone(&uploader);
                let jpeg = tokio::task::spawn_blocking(move || prep.prepare(&bytes))
                    .await
                    .map_err(|e| e.to_string())?
                    .map_err(|e| e.to_string())?;
                let filename = std::path::Path::new(&path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "photo.jpg".to_string());
                uploader.upload(jpeg, &filename).await.map_err(|e| e.to_string())
            }
            .await;
            let _ = tx.send(AppEvent::PhotoUploaded { result });
        });
    }

    /// Apply the photo manager's state to the record and persist it.
    pub fn close_photos(&mut self) {
        let Some(photos) = self.photos.take() else {
            self.overlay = None;
            return;
        };
        self.overlay = None;
        let mut changed = None;
        if let Some(detail) = self.detail.as_mut() {
            let updated = photos.into_photos();
            if detail.record.photos() != Some(&updated) {
                detail.record.set_photos(updated);
                changed = Some(detail.record.clone());
            }
        }
        if let Some(record) = changed {
            self.submit_update(record);
        }
    }

    /// Open the per-row visit editor; only meaningful while editing a
    /// maintenance contract.
    pub fn open_visits(&mut self) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };
        if !detail.edit_mode || !matches!(detail.record, Record::Maintenance(_)) {
            return;
        }
        self.visits = Some(VisitVm::new());
        self.overlay = Some(Overlay::Visits);
    }

    /// Commit the visit draft into the contract being edited. The change
    /// stays local until the detail save, and cancelling the edit restores
    /// the snapshot including visits.
    pub fn apply_visit_draft(&mut self) {
        let Some(draft) = self.visits.as_mut().and_then(|v| v.take_draft()) else {
            return;
        };
        let mut result = Ok(());
        if let Some(detail) = self.detail.as_mut() {
            if let Record::Maintenance(contract) = &mut detail.record {
                result = draft.apply(contract);
            }
        }
        if let Err(e) = result {
            self.show_message(e.to_string(), true);
        }
    }

    pub fn close_visits(&mut self) {
        self.visits = None;
        self.overlay = None;
    }

    pub fn decide_approval(&mut self, status: ApprovalStatus) {
        let Some(request) = self.approvals.get(self.approvals_cursor) else {
            return;
        };
        let id = request.user.id.clone();

        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api
                .set_approval(&session, "users", &id, status)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ApprovalDecided { result });
        });
    }

    // ------------------------------------------------------------------
    // Event drain
    // ------------------------------------------------------------------

    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ListLoaded { kind, seq, result } => {
                if seq != self.list_seq {
                    debug!(seq, latest = self.list_seq, "dropping stale list result");
                    return;
                }
                if self.list.as_ref().map(|l| l.kind()) != Some(kind) {
                    return;
                }
                match result {
                    Ok(collection) => {
                        if let Some(list) = self.list.as_mut() {
                            list.set_collection(collection);
                        }
                    }
                    Err(msg) => {
                        error!(%msg, "list fetch failed");
                        if let Some(list) = self.list.as_mut() {
                            list.loading = false;
                            list.last_error = Some(msg.clone());
                        }
                        self.show_message(msg, true);
                    }
                }
            }
            AppEvent::DetailLoaded { seq, result } => {
                if seq != self.detail_seq {
                    debug!(seq, latest = self.detail_seq, "dropping stale detail result");
                    return;
                }
                match result {
                    Ok((record, users)) => {
                        self.detail = Some(DetailVm::new(record, users));
                    }
                    Err(msg) => {
                        error!(%msg, "detail fetch failed");
                        self.show_message(msg, true);
                        self.screen = if self.list.is_some() {
                            Screen::List
                        } else {
                            Screen::Menu
                        };
                    }
                }
            }
            AppEvent::RecordSaved { result } => match result {
                Ok(record) => {
                    if let Some(detail) = self.detail.as_mut() {
                        detail.save_finished(Some(record));
                    }
                    self.show_message("Saved", false);
                }
                Err(msg) => {
                    if let Some(detail) = self.detail.as_mut() {
                        detail.save_finished(None);
                    }
                    self.show_message(msg, true);
                }
            },
            AppEvent::RecordCreated { kind, result } => match result {
                Ok(_) => {
                    self.create = None;
                    self.show_message("Created", false);
                    self.open_list(kind);
                }
                Err(msg) => {
                    if let Some(create) = self.create.as_mut() {
                        create.submit_failed();
                    }
                    self.show_message(msg, true);
                }
            },
            AppEvent::RecordDeleted { kind, result } => match result {
                Ok(()) => {
                    self.detail = None;
                    self.show_message("Deleted", false);
                    self.open_list(kind);
                }
                Err(msg) => self.show_message(msg, true),
            },
            AppEvent::WorkersAssigned { result } => match result {
                Ok(ids) => {
                    if let Some(detail) = self.detail.as_mut() {
                        detail.record.set_assigned_workers(ids);
                    }
                    self.assign = None;
                    self.overlay = None;
                    self.show_message("Assignment updated", false);
                }
                Err(msg) => self.show_message(msg, true),
            },
            AppEvent::PendingLoaded { seq, result } => {
                if seq != self.pending_seq {
                    debug!(seq, latest = self.pending_seq, "dropping stale approvals result");
                    return;
                }
                self.approvals_loading = false;
                match result {
                    Ok(requests) => {
                        self.approvals = requests;
                        if self.approvals_cursor >= self.approvals.len() {
                            self.approvals_cursor = self.approvals.len().saturating_sub(1);
                        }
                    }
                    Err(msg) => {
                        error!(%msg, "approvals fetch failed");
                        self.approvals.clear();
                        self.show_message(msg, true);
                    }
                }
            }
            AppEvent::ApprovalDecided { result } => match result {
                Ok(()) => self.refresh_approvals(),
                Err(msg) => self.show_message(msg, true),
            },
            AppEvent::PhotoUploaded { result } => {
                let Some(photos) = self.photos.as_mut() else {
                    return;
                };
                match result {
                    Ok(url) => photos.add_uploaded(url),
                    Err(msg) => photos.upload_failed(msg),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldops_client::{ApiConfig, ImageConfig, Settings};
    use fieldops_core::Project;

    fn test_app() -> App {
        let settings = Settings {
            api: ApiConfig {
                base_url: "http://localhost:1".into(),
                timeout_seconds: 1,
            },
            images: ImageConfig::default(),
        };
        let api = ApiClient::new(&settings).unwrap();
        App::new(api, None, Session::new("t", User::default()))
    }

    fn one_project() -> Collection {
        Collection::Projects(vec![Project {
            id: "p-1".into(),
            client_name: "Acme".into(),
            ..Default::default()
        }])
    }

    #[test]
    fn stale_list_result_is_dropped() {
        let mut app = test_app();
        app.list = Some(ListVm::new(EntityKind::Projects));
        app.list_seq = 5;

        // A result from a fetch issued before the latest one.
        app.apply_event(AppEvent::ListLoaded {
            kind: EntityKind::Projects,
            seq: 3,
            result: Ok(one_project()),
        });
        let list = app.list.as_ref().unwrap();
        assert!(list.collection.is_empty());
        assert!(list.loading);

        app.apply_event(AppEvent::ListLoaded {
            kind: EntityKind::Projects,
            seq: 5,
            result: Ok(one_project()),
        });
        let list = app.list.as_ref().unwrap();
        assert_eq!(list.collection.len(), 1);
        assert!(!list.loading);
    }

    #[test]
    fn stale_detail_result_is_dropped() {
        let mut app = test_app();
        app.screen = Screen::Detail;
        app.detail_seq = 4;

        app.apply_event(AppEvent::DetailLoaded {
            seq: 2,
            result: Ok((Record::Project(Project::default()), Vec::new())),
        });
        assert!(app.detail.is_none());

        app.apply_event(AppEvent::DetailLoaded {
            seq: 4,
            result: Ok((Record::Project(Project::default()), Vec::new())),
        });
        assert!(app.detail.is_some());
    }
}
