//! Workspace entities: workspaces, folders and documents held as flat lists.

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(CompactString);

        impl $name {
            pub fn new(id: impl Into<CompactString>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(WorkspaceId);
string_id!(FolderId);
string_id!(DocumentId);
string_id!(UserId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: CompactString,
    /// Stored only; nothing checks these.
    #[serde(default)]
    pub view_permission: Vec<UserId>,
    #[serde(default)]
    pub edit_permission: Vec<UserId>,
}

/// `parent_id == None` means the folder sits at the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: CompactString,
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    pub workspace_id: WorkspaceId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub name: CompactString,
    pub parent_id: Option<FolderId>,
    /// Must match the workspace of the parent folder, see [`WorkspaceData::validate`].
    pub workspace_id: WorkspaceId,
    pub content: String,
    pub last_modified: SystemTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    DanglingParent {
        child: CompactString,
        parent: FolderId,
    },
    WorkspaceMismatch {
        document: DocumentId,
        document_workspace: WorkspaceId,
        folder_workspace: WorkspaceId,
    },
    FolderWorkspaceMismatch {
        folder: FolderId,
        folder_workspace: WorkspaceId,
        parent_workspace: WorkspaceId,
    },
    /// The folder is its own ancestor; it and its subtree are unreachable.
    ParentCycle(FolderId),
    UnknownWorkspace {
        entity: CompactString,
        workspace: WorkspaceId,
    },
    DuplicateId(CompactString),
}

impl ValidationIssue {
    /// Dangling parents and cycles are tolerated: the nodes just never show up in a tree.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ValidationIssue::DanglingParent { .. } | ValidationIssue::ParentCycle(_)
        )
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DanglingParent { child, parent } => {
                write!(f, "{child} references missing folder {parent}")
            }
            ValidationIssue::WorkspaceMismatch {
                document,
                document_workspace,
                folder_workspace,
            } => write!(
                f,
                "document {document} belongs to {document_workspace} but its folder belongs to {folder_workspace}"
            ),
            ValidationIssue::FolderWorkspaceMismatch {
                folder,
                folder_workspace,
                parent_workspace,
            } => write!(
                f,
                "folder {folder} belongs to {folder_workspace} but its parent belongs to {parent_workspace}"
            ),
            ValidationIssue::ParentCycle(folder) => {
                write!(f, "folder {folder} is its own ancestor")
            }
            ValidationIssue::UnknownWorkspace { entity, workspace } => {
                write!(f, "{entity} references missing workspace {workspace}")
            }
            ValidationIssue::DuplicateId(id) => write!(f, "duplicate id {id}"),
        }
    }
}

/// The flat collections behind a store. List order is significant: it is the
/// display order within each parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceData {
    pub workspaces: Vec<Workspace>,
    pub folders: Vec<Folder>,
    pub documents: Vec<Document>,
}

impl WorkspaceData {
    pub fn workspace(&self, id: &WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|ws| &ws.id == id)
    }

    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let mut seen = FxHashSet::default();
        let ids = self
            .workspaces
            .iter()
            .map(|ws| ws.id.as_str())
            .chain(self.folders.iter().map(|f| f.id.as_str()))
            .chain(self.documents.iter().map(|d| d.id.as_str()));
        for id in ids {
            if !seen.insert(id) {
                issues.push(ValidationIssue::DuplicateId(id.into()));
            }
        }

        let mut folders_by_id: FxHashMap<&FolderId, &Folder> = FxHashMap::default();
        for folder in &self.folders {
            folders_by_id.entry(&folder.id).or_insert(folder);
        }

        for folder in &self.folders {
            if self.workspace(&folder.workspace_id).is_none() {
                issues.push(ValidationIssue::UnknownWorkspace {
                    entity: folder.id.as_str().into(),
                    workspace: folder.workspace_id.clone(),
                });
            }
            let Some(parent_id) = &folder.parent_id else {
                continue;
            };
            match folders_by_id.get(parent_id) {
                Some(parent) if parent.workspace_id != folder.workspace_id => {
                    issues.push(ValidationIssue::FolderWorkspaceMismatch {
                        folder: folder.id.clone(),
                        folder_workspace: folder.workspace_id.clone(),
                        parent_workspace: parent.workspace_id.clone(),
                    });
                }
                Some(_) => {
                    if is_own_ancestor(folder, &folders_by_id) {
                        issues.push(ValidationIssue::ParentCycle(folder.id.clone()));
                    }
                }
                None => issues.push(ValidationIssue::DanglingParent {
                    child: folder.id.as_str().into(),
                    parent: parent_id.clone(),
                }),
            }
        }

        for doc in &self.documents {
            if self.workspace(&doc.workspace_id).is_none() {
                issues.push(ValidationIssue::UnknownWorkspace {
                    entity: doc.id.as_str().into(),
                    workspace: doc.workspace_id.clone(),
                });
            }
            let Some(parent) = &doc.parent_id else {
                continue;
            };
            match self.folder(parent) {
                Some(folder) if folder.workspace_id != doc.workspace_id => {
                    issues.push(ValidationIssue::WorkspaceMismatch {
                        document: doc.id.clone(),
                        document_workspace: doc.workspace_id.clone(),
                        folder_workspace: folder.workspace_id.clone(),
                    });
                }
                Some(_) => {}
                None => issues.push(ValidationIssue::DanglingParent {
                    child: doc.id.as_str().into(),
                    parent: parent.clone(),
                }),
            }
        }

        issues
    }
}

/// Walks the parent chain of `folder`; stops at the root, a missing parent or a
/// cycle that does not pass through `folder`.
fn is_own_ancestor(folder: &Folder, folders_by_id: &FxHashMap<&FolderId, &Folder>) -> bool {
    let mut visited = FxHashSet::default();
    let mut current = folder.parent_id.as_ref();
    while let Some(id) = current {
        if id == &folder.id {
            return true;
        }
        if !visited.insert(id) {
            return false;
        }
        current = folders_by_id.get(id).and_then(|f| f.parent_id.as_ref());
    }
    false
}

#[cfg(test)]
#[path = "../../tests/unit/models/workspace.rs"]
mod tests;
