//! Headless application core (state/action/store).

pub mod action;
pub mod settings;
pub mod state;
pub mod store;

pub use action::Action;
pub use settings::{Settings, ThemeSettings, TreeSettings};
pub use state::{AppState, EditState, ExplorerState};
pub use store::{DispatchResult, Store};
