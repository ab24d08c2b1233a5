//! Guru99 demo site pages

pub mod drag_drop;
pub mod login;
pub mod tooltips;

pub use drag_drop::DragDropPage;
pub use login::LoginPage;
pub use tooltips::ToolTipsPage;
