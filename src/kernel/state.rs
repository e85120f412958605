use crate::models::{DocumentId, WorkspaceData, WorkspaceId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerState {
    pub selected: usize,
    pub scroll_offset: usize,
    pub view_height: usize,
}

impl ExplorerState {
    pub fn set_view_height(&mut self, height: usize, row_count: usize) -> bool {
        if self.view_height == height {
            return false;
        }
        self.view_height = height;
        self.clamp(row_count);
        true
    }

    pub fn move_selection(&mut self, delta: isize, row_count: usize) -> bool {
        if row_count == 0 {
            return false;
        }
        let max = row_count - 1;
        let next = if delta.is_negative() {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta as usize).min(max)
        };
        self.select(next, row_count)
    }

    pub fn select(&mut self, row: usize, row_count: usize) -> bool {
        if row >= row_count || row == self.selected {
            return false;
        }
        self.selected = row;
        self.clamp(row_count);
        true
    }

    pub fn reset(&mut self) -> bool {
        let changed = self.selected != 0 || self.scroll_offset != 0;
        self.selected = 0;
        self.scroll_offset = 0;
        changed
    }

    /// Keeps the selection inside the rows and the visible window.
    fn clamp(&mut self, row_count: usize) {
        self.selected = self.selected.min(row_count.saturating_sub(1));
        if self.view_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.view_height {
            self.scroll_offset = self.selected + 1 - self.view_height;
        }
    }
}

/// In-progress replacement of a document's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub document_id: DocumentId,
    pub buffer: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub data: WorkspaceData,
    pub active_workspace_id: Option<WorkspaceId>,
    pub active_document_id: Option<DocumentId>,
    pub explorer: ExplorerState,
    pub edit: Option<EditState>,
    /// Bumped whenever `data` changes.
    pub revision: u64,
}

impl AppState {
    pub fn new(data: WorkspaceData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
