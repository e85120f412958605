//! Workspace tree derivation: flat parent-pointer lists -> nested tree -> flat rows.

use crate::models::workspace::{Document, Folder, FolderId, WorkspaceData, WorkspaceId};
use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::Write as _;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TreeItemKind {
    Workspace,
    Folder,
    Document,
}

/// Derived view node. Rebuilt on every query and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceTreeItem {
    pub id: CompactString,
    pub name: CompactString,
    pub kind: TreeItemKind,
    /// `Some` (possibly empty) for folders, `None` for documents.
    pub children: Option<Vec<WorkspaceTreeItem>>,
    pub level: u16,
}

impl WorkspaceTreeItem {
    fn folder(folder: &Folder, level: u16, children: Vec<WorkspaceTreeItem>) -> Self {
        Self {
            id: folder.id.as_str().into(),
            name: folder.name.clone(),
            kind: TreeItemKind::Folder,
            children: Some(children),
            level,
        }
    }

    fn document(doc: &Document, level: u16) -> Self {
        Self {
            id: doc.id.as_str().into(),
            name: doc.name.clone(),
            kind: TreeItemKind::Document,
            children: None,
            level,
        }
    }

    pub fn is_document(&self) -> bool {
        self.kind == TreeItemKind::Document
    }
}

/// Diagnostic hook called once per derived level, after the level is complete.
pub trait TreeTrace {
    fn level(&mut self, _parent: Option<&FolderId>, _level: u16, _items: &[WorkspaceTreeItem]) {}
}

impl TreeTrace for () {}

/// Dumps every level at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTreeTrace;

impl TreeTrace for TracingTreeTrace {
    fn level(&mut self, parent: Option<&FolderId>, level: u16, items: &[WorkspaceTreeItem]) {
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        tracing::debug!(
            parent = parent.map(FolderId::as_str).unwrap_or("<root>"),
            level,
            items = ?ids,
            "workspace tree level"
        );
    }
}

struct ChildIndex<'a> {
    folders: FxHashMap<Option<&'a FolderId>, Vec<&'a Folder>>,
    documents: FxHashMap<Option<&'a FolderId>, Vec<&'a Document>>,
}

impl<'a> ChildIndex<'a> {
    fn new(data: &'a WorkspaceData, workspace_id: &WorkspaceId) -> Self {
        let mut folders: FxHashMap<_, Vec<_>> = FxHashMap::default();
        for folder in data.folders.iter().filter(|f| &f.workspace_id == workspace_id) {
            folders.entry(folder.parent_id.as_ref()).or_default().push(folder);
        }

        let mut documents: FxHashMap<_, Vec<_>> = FxHashMap::default();
        for doc in data.documents.iter().filter(|d| &d.workspace_id == workspace_id) {
            documents.entry(doc.parent_id.as_ref()).or_default().push(doc);
        }

        Self { folders, documents }
    }

    fn build(
        &self,
        parent: Option<&'a FolderId>,
        level: u16,
        path: &mut FxHashSet<&'a FolderId>,
        trace: &mut dyn TreeTrace,
    ) -> Vec<WorkspaceTreeItem> {
        let mut items = Vec::new();

        for &folder in self.folders.get(&parent).into_iter().flatten() {
            // A folder id repeated on its own ancestor path would recurse forever.
            if !path.insert(&folder.id) {
                continue;
            }
            let children = self.build(Some(&folder.id), level.saturating_add(1), path, trace);
            path.remove(&folder.id);
            items.push(WorkspaceTreeItem::folder(folder, level, children));
        }

        for &doc in self.documents.get(&parent).into_iter().flatten() {
            items.push(WorkspaceTreeItem::document(doc, level));
        }

        trace.level(parent, level, &items);
        items
    }
}

/// Builds the nested tree of `workspace_id`.
///
/// Within each parent, folders come first and documents second, each group in
/// list order. Nodes whose parent folder is missing (or belongs to another
/// workspace) are never reached from the root and so are dropped.
pub fn build_workspace_tree(
    data: &WorkspaceData,
    workspace_id: &WorkspaceId,
    trace: &mut dyn TreeTrace,
) -> Vec<WorkspaceTreeItem> {
    let index = ChildIndex::new(data, workspace_id);
    let mut path = FxHashSet::default();
    index.build(None, 0, &mut path, trace)
}

/// One rendered line of the always-expanded tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: CompactString,
    pub name: CompactString,
    pub kind: TreeItemKind,
    pub level: u16,
}

/// Pre-order walk: each node is followed by its children.
pub fn flatten_tree(items: &[WorkspaceTreeItem]) -> Vec<TreeRow> {
    fn walk(items: &[WorkspaceTreeItem], out: &mut Vec<TreeRow>) {
        for item in items {
            out.push(TreeRow {
                id: item.id.clone(),
                name: item.name.clone(),
                kind: item.kind,
                level: item.level,
            });
            if let Some(children) = &item.children {
                walk(children, out);
            }
        }
    }

    let mut rows = Vec::new();
    walk(items, &mut rows);
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeGlyphs {
    pub workspace: CompactString,
    pub folder: CompactString,
    pub document: CompactString,
}

impl TreeGlyphs {
    pub fn glyph(&self, kind: TreeItemKind) -> &str {
        match kind {
            TreeItemKind::Workspace => &self.workspace,
            TreeItemKind::Folder => &self.folder,
            TreeItemKind::Document => &self.document,
        }
    }
}

impl Default for TreeGlyphs {
    fn default() -> Self {
        Self {
            workspace: "🗂".into(),
            folder: "📁".into(),
            document: "📄".into(),
        }
    }
}

/// Row label without indentation: `<glyph> <name>`.
pub fn row_label(row: &TreeRow, glyphs: &TreeGlyphs) -> String {
    format!("{} {}", glyphs.glyph(row.kind), row.name)
}

/// Plain-text rendering of the rows, one per line, `*` marking the active document.
pub fn render_plain(
    rows: &[TreeRow],
    active_document: Option<&str>,
    indent_width: usize,
    glyphs: &TreeGlyphs,
) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = if row.kind == TreeItemKind::Document && active_document == Some(row.id.as_str())
        {
            "* "
        } else {
            "  "
        };
        let indent = " ".repeat(row.level as usize * indent_width);
        let _ = writeln!(out, "{marker}{indent}{}", row_label(row, glyphs));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/models/tree.rs"]
mod tests;
