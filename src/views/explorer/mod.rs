mod workspace_tree_view;

pub use workspace_tree_view::{TreeStyle, TreeViewProps, WorkspaceTreeView};
