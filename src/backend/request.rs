use std::path::PathBuf;
use std::time::Duration;

use crate::config::SubmitMode;
use crate::types::ChainId;

/// One invocation of `transfer --file` for a single batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    /// The temporary JSON array of transactions.
    pub artifact: PathBuf,
    pub node: String,
    pub chain_id: Option<ChainId>,
    pub mode: SubmitMode,
    pub timeout_per_tx: Duration,
    /// Hard bound on the whole invocation.
    pub deadline: Duration
}

impl SubmitRequest {
    pub fn cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "transfer".to_string(),
            "--file".to_string(),
            self.artifact.display().to_string(),
            "--node".to_string(),
            self.node.clone()
        ];

        if let Some(chain_id) = self.chain_id {
            args.push("--chain-id".to_string());
            args.push(chain_id.to_string());
        }

        let timeout = match self.mode {
            SubmitMode::Fast => 0,
            SubmitMode::Wait => self.timeout_per_tx.as_secs()
        };

        args.push("--timeout".to_string());
        args.push(timeout.to_string());

        args
    }
}
