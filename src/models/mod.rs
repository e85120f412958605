//! 数据模型层

pub mod seed;
pub mod tree;
pub mod workspace;

pub use seed::{load_seed, parse_seed, sample_data, to_seed_json, SeedError};
pub use tree::{
    build_workspace_tree, flatten_tree, render_plain, row_label, TracingTreeTrace, TreeGlyphs,
    TreeItemKind, TreeRow, TreeTrace, WorkspaceTreeItem,
};
pub use workspace::{
    Document, DocumentId, Folder, FolderId, UserId, ValidationIssue, Workspace, WorkspaceData,
    WorkspaceId,
};
