pub mod files;
pub mod ui;
