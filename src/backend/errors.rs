use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Could not start [{command}]: {source}")]
    Spawn {
        command: String,
        source: io::Error
    },
    #[error("[{command}] did not finish within {timeout:?}")]
    Timeout {
        command: String,
        timeout: Duration
    },
    #[error("[{command}] failed with {status}")]
    NonZeroExit {
        command: String,
        status: ExitStatus,
        output: String
    },
    #[error("Unexpected response from [{command}]: {reason}")]
    MalformedResponse {
        command: String,
        reason: String
    },
    #[error("Unable to connect to node [{node}]: {source}")]
    Unreachable {
        node: String,
        source: reqwest::Error
    },
    #[error("Bad response code [{status}] from node [{node}]")]
    UnhealthyEndpoint {
        node: String,
        status: u16
    }
}

impl BackendError {
    /// Whatever the external process printed before failing, if anything.
    pub fn output(&self) -> &str {
        match self {
            BackendError::NonZeroExit { output, .. } => output,
            _ => ""
        }
    }
}
