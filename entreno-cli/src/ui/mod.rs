// Dashboard screen rendered with ratatui

mod app;
mod dashboard;
mod widgets;

pub use app::{App, Panel, QUICK_ACTIONS};
pub use dashboard::Dashboard;
