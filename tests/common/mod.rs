//! Shared test utilities and test doubles.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use parking_lot::Mutex;
use role_console::controller::{ControllerParts, RoleListController};
use role_console::directory::{DirectoryError, ListRequest, RoleDirectory};
use role_console::export::{ExportError, ExportSink, Spreadsheet};
use role_console::handoff::{HandoffSlot, Navigator, Route};
use role_console::roles::{PageQuery, PageResult, PageSize, Role, RoleId, RoleStatus};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

// -- Role factories -----------------------------------------------------------

pub fn role(id: RoleId, name: &str) -> Role {
    Role {
        id,
        name: name.to_string(),
        status: if id % 2 == 0 {
            RoleStatus::Inactive
        } else {
            RoleStatus::Active
        },
    }
}

/// Roles with ids `1..=count`, named "Role 01", "Role 02", ...
pub fn numbered_roles(count: usize) -> Vec<Role> {
    (1..=count as RoleId)
        .map(|id| role(id, &format!("Role {:02}", id)))
        .collect()
}

pub fn network_error() -> DirectoryError {
    DirectoryError::Status {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

// -- Scripted directory -------------------------------------------------------

/// In-memory directory that records every call.
///
/// Pages are cut from the stored roles the way the real service does it:
/// case-insensitive name filter, then `limit` rows from `(page - 1) * limit`.
/// Out-of-range pages come back empty; the service does not clamp.
#[derive(Default)]
pub struct ScriptedDirectory {
    roles: Mutex<Vec<Role>>,
    list_calls: Mutex<Vec<ListRequest>>,
    get_calls: Mutex<Vec<RoleId>>,
    delete_calls: Mutex<Vec<RoleId>>,
    list_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    list_failures: Mutex<VecDeque<DirectoryError>>,
    get_failures: Mutex<VecDeque<DirectoryError>>,
    delete_failures: Mutex<VecDeque<DirectoryError>>,
}

impl ScriptedDirectory {
    pub fn with_roles(roles: Vec<Role>) -> Arc<Self> {
        let directory = Self::default();
        *directory.roles.lock() = roles;
        Arc::new(directory)
    }

    /// Hold the next list call until the returned sender fires (or drops).
    pub fn hold_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().push_back(rx);
        tx
    }

    pub fn fail_next_list(&self, error: DirectoryError) {
        self.list_failures.lock().push_back(error);
    }

    pub fn fail_next_get(&self, error: DirectoryError) {
        self.get_failures.lock().push_back(error);
    }

    pub fn fail_next_delete(&self, error: DirectoryError) {
        self.delete_failures.lock().push_back(error);
    }

    pub fn list_calls(&self) -> Vec<ListRequest> {
        self.list_calls.lock().clone()
    }

    pub fn get_calls(&self) -> Vec<RoleId> {
        self.get_calls.lock().clone()
    }

    pub fn delete_calls(&self) -> Vec<RoleId> {
        self.delete_calls.lock().clone()
    }

    pub fn stored_roles(&self) -> Vec<Role> {
        self.roles.lock().clone()
    }

    fn page(&self, request: &ListRequest) -> PageResult {
        let needle = request.search.to_lowercase();
        let matching: Vec<Role> = self
            .roles
            .lock()
            .iter()
            .filter(|role| role.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let skip = request.page.saturating_sub(1).saturating_mul(request.limit);
        PageResult {
            total_count: matching.len() as u64,
            items: matching
                .into_iter()
                .skip(skip as usize)
                .take(request.limit as usize)
                .collect(),
        }
    }
}

#[async_trait]
impl RoleDirectory for ScriptedDirectory {
    async fn list(&self, request: &ListRequest) -> Result<PageResult, DirectoryError> {
        self.list_calls.lock().push(request.clone());

        let gate = self.list_gates.lock().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(error) = self.list_failures.lock().pop_front() {
            return Err(error);
        }
        Ok(self.page(request))
    }

    async fn get(&self, role_id: RoleId) -> Result<Role, DirectoryError> {
        self.get_calls.lock().push(role_id);
        if let Some(error) = self.get_failures.lock().pop_front() {
            return Err(error);
        }
        self.roles
            .lock()
            .iter()
            .find(|role| role.id == role_id)
            .cloned()
            .ok_or(DirectoryError::NotFound { role_id })
    }

    async fn delete(&self, role_id: RoleId) -> Result<(), DirectoryError> {
        self.delete_calls.lock().push(role_id);
        if let Some(error) = self.delete_failures.lock().pop_front() {
            return Err(error);
        }
        let mut roles = self.roles.lock();
        let before = roles.len();
        roles.retain(|role| role.id != role_id);
        if roles.len() == before {
            return Err(DirectoryError::NotFound { role_id });
        }
        Ok(())
    }
}

// -- Navigation and export doubles --------------------------------------------

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

/// Keeps exported sheets in memory.
#[derive(Default)]
pub struct MemoryExportSink {
    sheets: Mutex<Vec<Spreadsheet>>,
}

impl MemoryExportSink {
    pub fn sheets(&self) -> Vec<Spreadsheet> {
        self.sheets.lock().clone()
    }
}

impl ExportSink for MemoryExportSink {
    fn export(&self, sheet: &Spreadsheet) -> Result<PathBuf, ExportError> {
        self.sheets.lock().push(sheet.clone());
        Ok(PathBuf::from(format!("memory://{}.csv", sheet.base_name)))
    }
}

// -- Composite builders -------------------------------------------------------

pub struct Harness {
    pub controller: RoleListController,
    pub directory: Arc<ScriptedDirectory>,
    pub navigator: Arc<RecordingNavigator>,
    pub exporter: Arc<MemoryExportSink>,
    pub handoff: HandoffSlot,
}

pub fn harness(directory: Arc<ScriptedDirectory>, page_size: PageSize) -> Harness {
    let navigator = Arc::new(RecordingNavigator::default());
    let exporter = Arc::new(MemoryExportSink::default());
    let handoff = HandoffSlot::new();
    let controller = RoleListController::new(
        ControllerParts {
            directory: directory.clone(),
            navigator: navigator.clone(),
            exporter: exporter.clone(),
            handoff: handoff.clone(),
            export_name: "userRoles".to_string(),
        },
        PageQuery::new(page_size),
    );
    Harness {
        controller,
        directory,
        navigator,
        exporter,
        handoff,
    }
}

/// Harness over `count` numbered roles, already showing the first page.
pub async fn loaded_harness(count: usize, page_size: PageSize) -> Harness {
    let harness = harness(ScriptedDirectory::with_roles(numbered_roles(count)), page_size);
    harness.controller.refresh().await;
    harness
}

/// Poll until `condition` holds or the timeout passes.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

pub fn ids(roles: &[Role]) -> Vec<RoleId> {
    roles.iter().map(|role| role.id).collect()
}
