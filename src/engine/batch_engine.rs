use std::io::stdout;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, error, info, warn};

use crate::backend::SubmissionBackend;
use crate::config::PipelineConfig;
use crate::credentials::{CredentialResolver, OperatorPrompt};
use crate::engine::{write_summary, BatchPlanner, PipelineError, SubmissionExecutor};
use crate::models::{BatchOutcome, RawRecord, ValidatedTransaction};
use crate::types::ChainId;
use crate::validation::RowValidator;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunStatus {
    /// Every batch was accepted by the CLI.
    Completed,
    /// The operator did not confirm, nothing was sent.
    Declined,
    /// No row survived validation.
    NothingToSend
}

/// What a finished run did.
#[derive(Debug)]
pub struct RunReport {
    pub status: RunStatus,
    /// Non-blank rows read from the input.
    pub processed: usize,
    pub rejected: usize,
    pub outcomes: Vec<BatchOutcome>
}

/// Sequences a run: pre-flight checks, topology, validation and credentials for
/// every row, operator review, then one batch at a time in file order.
///
/// Batches are never sent concurrently, the CLI assigns nonces per sender and a
/// later batch overtaking an earlier one would desync them.
pub struct BatchEngine<B: SubmissionBackend, P: OperatorPrompt> {
    config: PipelineConfig,
    backend: B,
    prompt: P
}

impl<B: SubmissionBackend, P: OperatorPrompt> BatchEngine<B, P> {
    pub fn new(config: PipelineConfig, backend: B, prompt: P) -> Self {
        Self {
            config,
            backend,
            prompt
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub async fn run(&mut self) -> Result<RunReport, PipelineError> {
        let (chain_id, planner) = self.preflight().await?;

        let shard_count = self.backend.query_shard_count(&self.config.node).await
            .map_err(PipelineError::Topology)?;

        info!("Node [{}] reports {shard_count} shard(s)", self.config.node);

        let (transactions, processed, rejected) = self.parse_transactions(shard_count).await?;
        let mut report = RunReport {
            status: RunStatus::NothingToSend,
            processed,
            rejected,
            outcomes: Vec::new()
        };

        if transactions.is_empty() {
            warn!("No valid transactions in [{}], nothing to send", self.config.input_path.display());
            return Ok(report);
        }

        if let Err(error) = write_summary(&mut stdout().lock(), &transactions, &self.config.node, chain_id) {
            error!("Could not print the transaction summary: {error}");
        }

        if !self.config.auto_confirm && !self.prompt.confirm("Send Transactions?")? {
            info!("Transactions were not sent");
            report.status = RunStatus::Declined;
            return Ok(report);
        }

        let executor = SubmissionExecutor::new(&self.backend, &self.config, chain_id);

        for batch in planner.plan(transactions) {
            report.outcomes.push(executor.execute(&batch).await?);
        }

        info!("HOORAY! Sent all transactions!");
        report.status = RunStatus::Completed;

        Ok(report)
    }

    /// Fails fast on anything that would make the run pointless, before any row is looked at.
    async fn preflight(&self) -> Result<(Option<ChainId>, BatchPlanner), PipelineError> {
        if !self.config.input_path.is_file() {
            return Err(PipelineError::InputNotFound(self.config.input_path.clone()));
        }

        if !self.config.cli_path.is_file() {
            return Err(PipelineError::CliNotFound(self.config.cli_path.clone()));
        }

        if !self.config.log_dir.is_dir() {
            return Err(PipelineError::LogDirNotFound(self.config.log_dir.clone()));
        }

        let chain_id = self.config.chain_id()?;
        let planner = BatchPlanner::new(self.config.batch_size)?;

        self.backend.probe_endpoint(&self.config.node).await
            .map_err(PipelineError::Endpoint)?;

        Ok((chain_id, planner))
    }

    async fn parse_transactions(&mut self, shard_count: usize) -> Result<(Vec<ValidatedTransaction>, usize, usize), PipelineError> {
        let path = &self.config.input_path;
        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .from_path(path)
            .map_err(|source| PipelineError::Input { path: path.clone(), source })?;

        let mut validator = RowValidator::new(shard_count);
        let mut resolver = CredentialResolver::new(self.config.use_default_secret);
        let mut transactions = Vec::new();
        let mut processed = 0;
        let mut rejected = 0;

        info!("Parsing CSV at {}", path.display());

        for result in reader.deserialize::<RawRecord>() {
            let record = match result {
                Ok(record) if record.is_blank() => continue,
                Ok(record) => record,
                Err(error) => {
                    warn!("Skipping line {processed}: {error}");
                    processed += 1;
                    rejected += 1;
                    continue;
                }
            };

            let line = processed;
            processed += 1;

            info!("Parsing line {line} of {}", path.display());

            let candidate = match validator.validate(&self.backend, &record).await {
                Ok(candidate) => candidate,
                Err(rejection) => {
                    warn!("Skipping line {line}: {rejection}");
                    rejected += 1;
                    continue;
                }
            };

            let secret = resolver.resolve(&candidate, &mut self.prompt)?;

            transactions.push(candidate.into_validated(secret));
        }

        info!("Finished parsing CSV: {} transaction(s) from {processed} line(s), {rejected} skipped", transactions.len());
        debug!("Passphrases resolved for {} wallet(s)", resolver.cached_accounts());

        Ok((transactions, processed, rejected))
    }
}
