//! Seed data: the built-in sample workspace and the JSON seed file format.

use crate::models::workspace::{
    Document, DocumentId, Folder, FolderId, ValidationIssue, Workspace, WorkspaceData,
    WorkspaceId,
};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug)]
pub enum SeedError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(Vec<ValidationIssue>),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(err) => write!(f, "failed to read seed file: {err}"),
            SeedError::Parse(err) => write!(f, "failed to parse seed file: {err}"),
            SeedError::Invalid(issues) => {
                write!(f, "invalid seed data:")?;
                for issue in issues {
                    write!(f, " {issue};")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Io(err) => Some(err),
            SeedError::Parse(err) => Some(err),
            SeedError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for SeedError {
    fn from(err: io::Error) -> Self {
        SeedError::Io(err)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::Parse(err)
    }
}

impl From<SeedError> for io::Error {
    fn from(err: SeedError) -> Self {
        match err {
            SeedError::Io(err) => err,
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRecord {
    id: DocumentId,
    name: CompactString,
    #[serde(default)]
    parent_id: Option<FolderId>,
    workspace_id: WorkspaceId,
    #[serde(default)]
    content: String,
    /// Unix milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<u64>,
}

impl DocumentRecord {
    fn into_document(self, now: SystemTime) -> Document {
        let last_modified = self
            .last_modified
            .map(|ms| UNIX_EPOCH + Duration::from_millis(ms))
            .unwrap_or(now);
        Document {
            id: self.id,
            name: self.name,
            parent_id: self.parent_id,
            workspace_id: self.workspace_id,
            content: self.content,
            last_modified,
        }
    }

    fn from_document(doc: &Document) -> Self {
        let last_modified = doc
            .last_modified
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| u64::try_from(d.as_millis()).ok());
        Self {
            id: doc.id.clone(),
            name: doc.name.clone(),
            parent_id: doc.parent_id.clone(),
            workspace_id: doc.workspace_id.clone(),
            content: doc.content.clone(),
            last_modified,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SeedFile {
    #[serde(default)]
    workspaces: Vec<Workspace>,
    #[serde(default)]
    folders: Vec<Folder>,
    #[serde(default)]
    documents: Vec<DocumentRecord>,
}

pub fn parse_seed(json: &str) -> Result<WorkspaceData, SeedError> {
    let file: SeedFile = serde_json::from_str(json)?;
    let now = SystemTime::now();
    let data = WorkspaceData {
        workspaces: file.workspaces,
        folders: file.folders,
        documents: file
            .documents
            .into_iter()
            .map(|record| record.into_document(now))
            .collect(),
    };

    let (fatal, warnings): (Vec<_>, Vec<_>) =
        data.validate().into_iter().partition(ValidationIssue::is_fatal);
    for issue in &warnings {
        tracing::warn!(%issue, "seed data issue, node will not be shown");
    }
    if !fatal.is_empty() {
        return Err(SeedError::Invalid(fatal));
    }

    Ok(data)
}

pub fn load_seed(path: &Path) -> Result<WorkspaceData, SeedError> {
    let json = std::fs::read_to_string(path)?;
    let data = parse_seed(&json)?;
    tracing::info!(
        path = %path.display(),
        workspaces = data.workspaces.len(),
        folders = data.folders.len(),
        documents = data.documents.len(),
        "seed loaded"
    );
    Ok(data)
}

pub fn to_seed_json(data: &WorkspaceData) -> Result<String, SeedError> {
    let file = SeedFile {
        workspaces: data.workspaces.clone(),
        folders: data.folders.clone(),
        documents: data.documents.iter().map(DocumentRecord::from_document).collect(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// The built-in sample: one workspace, four folders, four documents.
pub fn sample_data() -> WorkspaceData {
    let ws = WorkspaceId::new("ws-001");
    let now = SystemTime::now();

    let folder = |id: &str, parent: Option<&str>| Folder {
        id: FolderId::new(id),
        name: "Main Projects".into(),
        parent_id: parent.map(FolderId::new),
        workspace_id: ws.clone(),
    };
    let document = |id: &str, parent: &str| Document {
        id: DocumentId::new(id),
        name: "Project A".into(),
        parent_id: Some(FolderId::new(parent)),
        workspace_id: ws.clone(),
        content: "# Welcome".to_string(),
        last_modified: now,
    };

    WorkspaceData {
        workspaces: vec![Workspace {
            id: ws.clone(),
            name: "Design Hub".into(),
            view_permission: vec!["user1".into(), "user2".into(), "user3".into()],
            edit_permission: vec!["user1".into()],
        }],
        folders: vec![
            folder("folder-1", None),
            folder("folder-2", Some("folder-1")),
            folder("folder-3", None),
            folder("folder-4", None),
        ],
        documents: vec![
            document("doc-1", "folder-1"),
            document("doc-2", "folder-2"),
            document("doc-3", "folder-1"),
            document("doc-4", "folder-1"),
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/seed.rs"]
mod tests;
