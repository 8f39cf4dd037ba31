//! UI layer for the console: app shell, chat panel, and sensor panel.

pub mod app;

pub use app::DesktopGuiApp;
