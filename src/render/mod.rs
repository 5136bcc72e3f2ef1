pub mod dashboard_panel;
pub mod error_page;
pub mod layout;
