use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::config::ConfigError;
use crate::types::ChainId;

pub const DEFAULT_NODE: &str = "https://api.s0.t.hmny.io/";
pub const DEFAULT_BATCH_SIZE: usize = 4;
pub const DEFAULT_TIMEOUT_PER_TX: Duration = Duration::from_secs(40);
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(200);

/// Whether the CLI should wait for each transaction to be confirmed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SubmitMode {
    /// `--timeout 0`: hand the batch over and return without polling for receipts.
    Fast,
    Wait
}

/// Everything one run of the pipeline needs to know, as given by the operator.
///
/// Values are kept as provided; `chain_id()` and the batch planner reject the
/// ones that are out of range during the pre-flight checks.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub node: String,
    pub batch_size: usize,
    pub timeout_per_tx: Duration,
    pub submit_mode: SubmitMode,
    pub chain_id: Option<String>,
    pub use_default_secret: bool,
    pub auto_confirm: bool,
    pub verbose: bool,
    /// The external transaction CLI, expected to live next to this binary.
    pub cli_path: PathBuf,
    /// Where the per-batch audit logs are written.
    pub log_dir: PathBuf,
    /// Bound for every CLI call other than a batch submission.
    pub query_timeout: Duration
}

impl PipelineConfig {
    pub fn new(input_path: PathBuf, cli_path: PathBuf, log_dir: PathBuf) -> Self {
        Self {
            input_path,
            node: DEFAULT_NODE.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_per_tx: DEFAULT_TIMEOUT_PER_TX,
            submit_mode: SubmitMode::Wait,
            chain_id: None,
            use_default_secret: false,
            auto_confirm: false,
            verbose: false,
            cli_path,
            log_dir,
            query_timeout: DEFAULT_QUERY_TIMEOUT
        }
    }

    pub fn chain_id(&self) -> Result<Option<ChainId>, ConfigError> {
        self.chain_id.as_deref()
            .map(ChainId::from_str)
            .transpose()
            .map_err(ConfigError::from)
    }

    /// The deadline for one submission: every transaction in the batch gets its own share.
    pub fn batch_deadline(&self, batch_len: usize) -> Duration {
        let transactions = u32::try_from(batch_len.max(1)).unwrap_or(u32::MAX);

        self.timeout_per_tx.saturating_mul(transactions)
    }
}

/// Expands a leading `~` to the current user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf, ConfigError> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };

    if !rest.is_empty() && !rest.starts_with('/') {
        return Ok(PathBuf::from(path));
    }

    let home = env::var_os("HOME").ok_or_else(|| ConfigError::HomeNotSet(path.to_string()))?;
    let mut expanded = PathBuf::from(home);

    if let Some(relative) = rest.strip_prefix('/').filter(|relative| !relative.is_empty()) {
        expanded.push(relative);
    }

    Ok(expanded)
}
