use std::num::NonZeroUsize;

use crate::config::ConfigError;
use crate::models::{Batch, ValidatedTransaction};

/// Splits the validated transactions into fixed size batches, in file order.
pub struct BatchPlanner {
    batch_size: NonZeroUsize
}

impl BatchPlanner {
    pub fn new(batch_size: usize) -> Result<Self, ConfigError> {
        let batch_size = NonZeroUsize::new(batch_size)
            .ok_or(ConfigError::InvalidBatchSize(batch_size))?;

        Ok(Self { batch_size })
    }

    /// Every batch holds `batch_size` transactions except possibly the last one.
    pub fn plan(&self, transactions: Vec<ValidatedTransaction>) -> Vec<Batch> {
        let mut remaining = transactions.into_iter().peekable();
        let mut batches = Vec::new();

        while remaining.peek().is_some() {
            let transactions: Vec<_> = remaining.by_ref().take(self.batch_size.get()).collect();

            batches.push(Batch {
                index: batches.len(),
                transactions
            });
        }

        batches
    }
}
