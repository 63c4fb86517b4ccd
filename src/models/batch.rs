use std::path::PathBuf;

use serde_json::to_string_pretty;

use crate::models::ValidatedTransaction;

/// An ordered, contiguous slice of the validated transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Position of the batch in submission order, starting at 0.
    pub index: usize,
    pub transactions: Vec<ValidatedTransaction>
}

impl Batch {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Pretty JSON of the batch with secret literals masked.
    pub fn redacted_json(&self) -> serde_json::Result<String> {
        let redacted: Vec<ValidatedTransaction> = self.transactions.iter()
            .map(ValidatedTransaction::redacted)
            .collect();

        to_string_pretty(&redacted)
    }
}

/// What the submission interface made of one batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Sent {
        index: usize,
        size: usize,
        log_path: PathBuf,
        response: String
    },
    Failed {
        index: usize,
        size: usize,
        log_path: PathBuf,
        detail: String,
        output: String
    }
}

impl BatchOutcome {
    pub fn index(&self) -> usize {
        match self {
            BatchOutcome::Sent { index, .. } | BatchOutcome::Failed { index, .. } => *index
        }
    }

    pub fn log_path(&self) -> &PathBuf {
        match self {
            BatchOutcome::Sent { log_path, .. } | BatchOutcome::Failed { log_path, .. } => log_path
        }
    }

    pub fn size(&self) -> usize {
        match self {
            BatchOutcome::Sent { size, .. } | BatchOutcome::Failed { size, .. } => *size
        }
    }

    #[cfg(test)]
    pub fn is_sent(&self) -> bool {
        matches!(self, BatchOutcome::Sent { .. })
    }

    /// The body of the per-batch audit log: what was sent, then what came back.
    pub fn render_log(&self, sent: &str) -> String {
        match self {
            BatchOutcome::Sent { response, .. } => format!("Sent-tx: {sent}\nResponse: {response}"),
            BatchOutcome::Failed { detail, output, .. } => format!("Sent-tx: {sent}\nError: {detail}\nResponse: {output}")
        }
    }
}
