use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::backend::BackendError;
use crate::config::ConfigError;
use crate::credentials::PromptError;

/// Everything that ends a run early. Rejected rows never end up here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("[{}] is not a file", .0.display())]
    InputNotFound(PathBuf),
    #[error("CLI not in the expected location, [{}] is not a file", .0.display())]
    CliNotFound(PathBuf),
    #[error("Log directory [{}] is not a directory", .0.display())]
    LogDirNotFound(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Endpoint check failed: {0}")]
    Endpoint(#[source] BackendError),
    #[error("Could not fetch the shard count: {0}")]
    Topology(#[source] BackendError),
    #[error("Could not read CSV at [{}]: {source}", .path.display())]
    Input {
        path: PathBuf,
        source: csv::Error
    },
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("Could not prepare the artifact for batch [{index}]: {source}")]
    Artifact {
        index: usize,
        source: io::Error
    },
    #[error("Could not write the log for batch [{index}] to [{}]: {source}", .path.display())]
    AuditLog {
        index: usize,
        path: PathBuf,
        source: io::Error
    },
    #[error("Batch [{index}] failed, see [{}]: {source}", .log_path.display())]
    Batch {
        index: usize,
        log_path: PathBuf,
        source: BackendError
    }
}

/// Where in the run an error happened.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    /// Before any network state or transaction was touched.
    Preflight,
    /// While reading the input or talking to the operator.
    Input,
    /// While a batch was being sent; earlier batches may already be on chain.
    Batch
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InputNotFound(_)
            | PipelineError::CliNotFound(_)
            | PipelineError::LogDirNotFound(_)
            | PipelineError::Config(_)
            | PipelineError::Endpoint(_)
            | PipelineError::Topology(_) => ErrorKind::Preflight,
            PipelineError::Input { .. } | PipelineError::Prompt(_) => ErrorKind::Input,
            PipelineError::Artifact { .. }
            | PipelineError::AuditLog { .. }
            | PipelineError::Batch { .. } => ErrorKind::Batch
        }
    }
}
