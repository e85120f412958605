use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::models::{
    build_workspace_tree, flatten_tree, Document, DocumentId, TracingTreeTrace, TreeRow,
    TreeTrace, Workspace, WorkspaceData, WorkspaceId, WorkspaceTreeItem,
};

use super::{Action, AppState, EditState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self { state_changed }
    }
}

/// Row count of the active workspace's tree at a given data revision.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowCount {
    workspace_id: WorkspaceId,
    revision: u64,
    count: usize,
}

/// Owns the application state. Every effective mutation goes through
/// [`Arc::make_mut`], so a snapshot taken with [`Store::snapshot`] never changes
/// underneath its holder.
pub struct Store {
    state: Arc<AppState>,
    trace_tree: bool,
    row_count: Option<RowCount>,
}

impl Store {
    pub fn new(data: WorkspaceData) -> Self {
        Self::with_state(AppState::new(data))
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
            trace_tree: false,
            row_count: None,
        }
    }

    /// Logs every derived tree level at `debug`.
    pub fn with_tree_trace(mut self, enabled: bool) -> Self {
        self.trace_tree = enabled;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    fn state_mut(&mut self) -> &mut AppState {
        Arc::make_mut(&mut self.state)
    }

    pub fn current_workspace(&self) -> Option<&Workspace> {
        let id = self.state.active_workspace_id.as_ref()?;
        self.state.data.workspace(id)
    }

    pub fn active_document(&self) -> Option<&Document> {
        let id = self.state.active_document_id.as_ref()?;
        self.state.data.document(id)
    }

    pub fn workspace_tree(&self, workspace_id: &WorkspaceId) -> Vec<WorkspaceTreeItem> {
        if self.trace_tree {
            self.workspace_tree_with(workspace_id, &mut TracingTreeTrace)
        } else {
            self.workspace_tree_with(workspace_id, &mut ())
        }
    }

    pub fn workspace_tree_with(
        &self,
        workspace_id: &WorkspaceId,
        trace: &mut dyn TreeTrace,
    ) -> Vec<WorkspaceTreeItem> {
        build_workspace_tree(&self.state.data, workspace_id, trace)
    }

    /// Flattened rows of the active workspace, empty when none is active.
    pub fn explorer_rows(&self) -> Vec<TreeRow> {
        match &self.state.active_workspace_id {
            Some(id) => flatten_tree(&self.workspace_tree(id)),
            None => Vec::new(),
        }
    }

    /// Number of explorer rows, re-derived only when the active workspace or the
    /// data revision changed.
    fn explorer_row_count(&mut self) -> usize {
        let Some(workspace_id) = self.state.active_workspace_id.clone() else {
            return 0;
        };
        let revision = self.state.revision;
        if let Some(cached) = &self.row_count {
            if cached.workspace_id == workspace_id && cached.revision == revision {
                return cached.count;
            }
        }

        let count = flatten_tree(&self.workspace_tree(&workspace_id)).len();
        self.row_count = Some(RowCount {
            workspace_id,
            revision,
            count,
        });
        count
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::SetActiveWorkspace(id) => {
                if self.state.active_workspace_id.as_ref() == Some(&id) {
                    return DispatchResult::changed(false);
                }
                tracing::debug!(workspace = %id, "set active workspace");
                let state = self.state_mut();
                state.active_workspace_id = Some(id);
                state.explorer.reset();
                DispatchResult::changed(true)
            }
            Action::SetActiveDocument(id) => {
                if self.state.active_document_id.as_ref() == Some(&id) {
                    return DispatchResult::changed(false);
                }
                tracing::debug!(document = %id, "set active document");
                self.state_mut().active_document_id = Some(id);
                DispatchResult::changed(true)
            }
            Action::UpdateDocumentContent { id, content } => {
                DispatchResult::changed(self.update_document_content(&id, content))
            }
            Action::CycleWorkspace => {
                let workspaces = &self.state.data.workspaces;
                if workspaces.is_empty() {
                    return DispatchResult::changed(false);
                }
                let next = self
                    .state
                    .active_workspace_id
                    .as_ref()
                    .and_then(|id| workspaces.iter().position(|ws| &ws.id == id))
                    .map(|idx| (idx + 1) % workspaces.len())
                    .unwrap_or(0);
                let id = workspaces[next].id.clone();
                self.dispatch(Action::SetActiveWorkspace(id))
            }
            Action::ExplorerSetViewHeight { height } => {
                let row_count = self.explorer_row_count();
                self.update_explorer(|explorer| explorer.set_view_height(height, row_count))
            }
            Action::ExplorerMoveSelection { delta } => {
                let row_count = self.explorer_row_count();
                self.update_explorer(|explorer| explorer.move_selection(delta, row_count))
            }
            Action::ExplorerSelectRow { row } => {
                let row_count = self.explorer_row_count();
                self.update_explorer(|explorer| explorer.select(row, row_count))
            }
            Action::EditBegin => {
                let Some(doc) = self.active_document() else {
                    return DispatchResult::changed(false);
                };
                if self
                    .state
                    .edit
                    .as_ref()
                    .is_some_and(|edit| edit.document_id == doc.id)
                {
                    return DispatchResult::changed(false);
                }
                let edit = EditState {
                    document_id: doc.id.clone(),
                    buffer: doc.content.clone(),
                };
                self.state_mut().edit = Some(edit);
                DispatchResult::changed(true)
            }
            Action::EditInsert(ch) => {
                if self.state.edit.is_none() {
                    return DispatchResult::changed(false);
                }
                if let Some(edit) = self.state_mut().edit.as_mut() {
                    edit.buffer.push(ch);
                }
                DispatchResult::changed(true)
            }
            Action::EditBackspace => {
                if self.state.edit.as_ref().map_or(true, |edit| edit.buffer.is_empty()) {
                    return DispatchResult::changed(false);
                }
                if let Some(edit) = self.state_mut().edit.as_mut() {
                    edit.buffer.pop();
                }
                DispatchResult::changed(true)
            }
            Action::EditCommit => {
                if self.state.edit.is_none() {
                    return DispatchResult::changed(false);
                }
                let edit = self.state_mut().edit.take();
                if let Some(edit) = edit {
                    self.update_document_content(&edit.document_id, edit.buffer);
                }
                DispatchResult::changed(true)
            }
            Action::EditCancel => {
                if self.state.edit.is_none() {
                    return DispatchResult::changed(false);
                }
                self.state_mut().edit = None;
                DispatchResult::changed(true)
            }
        }
    }

    fn update_document_content(&mut self, id: &DocumentId, content: String) -> bool {
        let Some(idx) = self.state.data.documents.iter().position(|d| &d.id == id) else {
            tracing::debug!(document = %id, "content update for unknown document ignored");
            return false;
        };

        let state = self.state_mut();
        let doc = &mut state.data.documents[idx];
        let now = SystemTime::now();
        // last_modified must advance even on a coarse clock.
        doc.last_modified = if now > doc.last_modified {
            now
        } else {
            doc.last_modified + Duration::from_nanos(1)
        };
        doc.content = content;
        state.revision += 1;

        tracing::debug!(document = %id, revision = state.revision, "document content updated");
        true
    }

    fn update_explorer(
        &mut self,
        f: impl FnOnce(&mut super::ExplorerState) -> bool,
    ) -> DispatchResult {
        let mut explorer = self.state.explorer.clone();
        if !f(&mut explorer) {
            return DispatchResult::changed(false);
        }
        self.state_mut().explorer = explorer;
        DispatchResult::changed(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
