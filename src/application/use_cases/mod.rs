pub mod file_selection;
pub mod workflow;
