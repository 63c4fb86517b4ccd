mod batch_engine;
mod errors;
mod executor;
mod planner;
mod summary;

pub use batch_engine::BatchEngine;
pub use errors::PipelineError;
pub use executor::SubmissionExecutor;
pub use planner::BatchPlanner;
pub use summary::write_summary;
