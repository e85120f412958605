//! wstree - workspace browser library
//!
//! Module layout:
//! - models: workspaces, folders, documents and tree derivation
//! - kernel: state, actions, store and settings (headless)
//! - views: workspace tree and document panes (ratatui)
//! - app: the browser shell wiring the store to the views
//! - tui: terminal setup and the view trait

pub mod kernel;
pub mod models;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod tui;
#[cfg(feature = "tui")]
pub mod views;
