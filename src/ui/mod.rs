pub mod dialogs;
pub mod phase_table;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
