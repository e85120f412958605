//! 应用层：组合 Store 与视图

pub mod browser;
pub mod theme;

pub use browser::Browser;
pub use theme::UiTheme;
