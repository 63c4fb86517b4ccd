use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::{Builder, NamedTempFile};
use tracing::{error, info, warn};

use crate::backend::{SubmissionBackend, SubmitRequest};
use crate::config::PipelineConfig;
use crate::engine::PipelineError;
use crate::models::{Batch, BatchOutcome};
use crate::types::ChainId;

/// Sends one batch at a time and leaves an audit log behind for each.
///
/// A batch moves through `Serialized -> Submitted -> Logged`. The temporary
/// artifact handed to the CLI is removed whatever the outcome, and a failed batch
/// is turned into `PipelineError::Batch` only after its log has been written.
pub struct SubmissionExecutor<'a, B: SubmissionBackend> {
    backend: &'a B,
    config: &'a PipelineConfig,
    chain_id: Option<ChainId>
}

impl<'a, B: SubmissionBackend> SubmissionExecutor<'a, B> {
    pub fn new(backend: &'a B, config: &'a PipelineConfig, chain_id: Option<ChainId>) -> Self {
        Self {
            backend,
            config,
            chain_id
        }
    }

    pub async fn execute(&self, batch: &Batch) -> Result<BatchOutcome, PipelineError> {
        let index = batch.index;
        let size = batch.len();
        let log_path = self.log_path(index);

        info!("Sending a batch of {size} transaction(s)");
        info!("Logs for this batch will be at {}", log_path.display());

        let sent = batch.redacted_json()
            .map_err(|source| PipelineError::Artifact { index, source: source.into() })?;
        let artifact = write_artifact(batch)
            .map_err(|source| PipelineError::Artifact { index, source })?;

        let request = SubmitRequest {
            artifact: artifact.path().to_path_buf(),
            node: self.config.node.clone(),
            chain_id: self.chain_id,
            mode: self.config.submit_mode,
            timeout_per_tx: self.config.timeout_per_tx,
            deadline: self.config.batch_deadline(size)
        };

        let result = self.backend.submit_batch(&request).await;

        if let Err(error) = artifact.close() {
            warn!("Could not remove the artifact for batch [{index}]: {error}");
        }

        let outcome = match &result {
            Ok(response) => BatchOutcome::Sent {
                index,
                size,
                log_path: log_path.clone(),
                response: response.clone()
            },
            Err(error) => BatchOutcome::Failed {
                index,
                size,
                log_path: log_path.clone(),
                detail: error.to_string(),
                output: error.output().to_string()
            }
        };

        let logged = write_log(&log_path, &outcome.render_log(&sent));

        match result {
            Ok(response) => {
                logged.map_err(|source| PipelineError::AuditLog { index, path: log_path, source })?;

                info!("Batched transaction(s) sent successfully!");
                info!("Transaction Hashes/Receipts: {response}");

                Ok(outcome)
            },
            Err(source) => {
                //NOTE: The batch failure is what the operator has to act on, so it wins over a failed log write.
                if let Err(log_error) = logged {
                    error!("Could not write the log for batch [{index}] to {}: {log_error}", log_path.display());
                }

                error!("Transaction failure: {source}");
                error!("Error output: {}", source.output());

                Err(PipelineError::Batch { index, log_path, source })
            }
        }
    }

    fn log_path(&self, index: usize) -> PathBuf {
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.6f");

        self.config.log_dir.join(format!("batch_tx_{timestamp}_{index}.log"))
    }
}

/// Writes the batch as the CLI's JSON array to an owner-only temporary file.
fn write_artifact(batch: &Batch) -> io::Result<NamedTempFile> {
    let mut artifact = Builder::new()
        .prefix("csv-batch-transfer-")
        .suffix(".json")
        .tempfile()?;

    serde_json::to_writer(artifact.as_file_mut(), &batch.transactions)?;
    artifact.as_file_mut().flush()?;

    #[cfg(unix)]
    {
        use std::fs::{set_permissions, Permissions};
        use std::os::unix::fs::PermissionsExt;

        set_permissions(artifact.path(), Permissions::from_mode(0o400))?;
    }

    Ok(artifact)
}

fn write_log(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;

    file.write_all(contents.as_bytes())?;
    file.flush()
}
