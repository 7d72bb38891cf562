//! UI components grouped by feature domain.

mod data_panel;
mod selector_widget;
mod status_bar;
mod title_bar;

pub use data_panel::DataPanel;
pub use selector_widget::{DesktopSelector, IntervalSelectorWidget};
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
