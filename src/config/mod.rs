mod errors;
mod pipeline;

pub use errors::ConfigError;
pub use pipeline::{
    expand_home, PipelineConfig, SubmitMode, DEFAULT_BATCH_SIZE, DEFAULT_NODE, DEFAULT_QUERY_TIMEOUT,
    DEFAULT_TIMEOUT_PER_TX
};
