pub mod use_cases;

pub use use_cases::file_selection::select;
pub use use_cases::workflow::{Submission, WorkflowController};
