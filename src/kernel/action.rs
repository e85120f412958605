use crate::models::{DocumentId, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetActiveWorkspace(WorkspaceId),
    SetActiveDocument(DocumentId),
    UpdateDocumentContent {
        id: DocumentId,
        content: String,
    },
    /// Moves to the workspace after the active one, wrapping around.
    CycleWorkspace,
    ExplorerSetViewHeight {
        height: usize,
    },
    ExplorerMoveSelection {
        delta: isize,
    },
    ExplorerSelectRow {
        row: usize,
    },
    EditBegin,
    EditInsert(char),
    EditBackspace,
    EditCommit,
    EditCancel,
}
