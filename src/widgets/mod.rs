pub mod chart;
pub mod controls;
pub mod metrics;
pub mod radio_block;
pub mod sidebar;
