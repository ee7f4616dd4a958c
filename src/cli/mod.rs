pub mod orchestration;

pub use orchestration::{run_workflow, ReleaseOutcome, WorkflowArgs, WorkflowResult};
