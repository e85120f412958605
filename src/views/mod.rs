//! 视图层模块
//!
//! - WorkspaceTreeView: 工作区树（纯渲染 + 命中测试）
//! - DocumentView: 当前文档面板

pub mod document;
pub mod explorer;

pub use document::DocumentView;
pub use explorer::{TreeStyle, TreeViewProps, WorkspaceTreeView};
