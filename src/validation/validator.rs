use std::collections::HashMap;

use tracing::{debug, warn};

use crate::backend::{BackendError, SubmissionBackend};
use crate::models::{secret_field, trimmed_field, RawRecord, SecretReference, TransactionCandidate};
use crate::types::{Address, ShardId};
use crate::validation::{RowRejection, ShardField};

/// Checks rows against address format and the network's shard topology.
///
/// The shard count is fetched once per run and never changes afterwards. Address
/// checks go through the backend, and their verdicts are remembered for the rest
/// of the run since the same senders tend to appear on many rows.
pub struct RowValidator {
    shard_count: usize,
    checked_addresses: HashMap<Address, bool>
}

impl RowValidator {
    pub fn new(shard_count: usize) -> Self {
        Self {
            shard_count,
            checked_addresses: HashMap::new()
        }
    }

    /// Runs every check in order and stops at the first one that fails.
    pub async fn validate<B: SubmissionBackend>(&mut self, backend: &B, record: &RawRecord) -> Result<TransactionCandidate, RowRejection> {
        let (source, destination) = self.check_addresses(backend, record).await?;

        let (Some(source_shard), Some(destination_shard)) = (trimmed_field(&record.source_shard), trimmed_field(&record.destination_shard)) else {
            return Err(RowRejection::MissingShard);
        };

        let source_shard = self.check_shard(ShardField::From, source_shard)?;
        let destination_shard = self.check_shard(ShardField::To, destination_shard)?;

        let gas_price = match trimmed_field(&record.gas_price) {
            Some(value) if value.bytes().all(|byte| byte.is_ascii_digit()) => Some(value.to_string()),
            Some(value) => return Err(RowRejection::InvalidGasPrice { value: value.to_string() }),
            None => None
        };

        let row_secret = match (secret_field(&record.passphrase_file), secret_field(&record.passphrase_string)) {
            (Some(path), _) => Some(SecretReference::File(path.to_string())),
            (None, Some(literal)) => Some(SecretReference::Literal(literal.to_string())),
            (None, None) => None
        };

        Ok(TransactionCandidate {
            source,
            destination,
            amount: record.amount.clone().unwrap_or_default(),
            source_shard,
            destination_shard,
            gas_price,
            row_secret
        })
    }

    async fn check_addresses<B: SubmissionBackend>(&mut self, backend: &B, record: &RawRecord) -> Result<(Address, Address), RowRejection> {
        let source = trimmed_field(&record.source).unwrap_or_default();
        let destination = trimmed_field(&record.destination).unwrap_or_default();

        if !self.is_valid_address(backend, source).await || !self.is_valid_address(backend, destination).await {
            return Err(RowRejection::InvalidAddress {
                from: source.to_string(),
                to: destination.to_string()
            });
        }

        Ok((source.to_string(), destination.to_string()))
    }

    async fn is_valid_address<B: SubmissionBackend>(&mut self, backend: &B, address: &str) -> bool {
        if address.is_empty() {
            return false;
        }

        if let Some(valid) = self.checked_addresses.get(address) {
            return *valid;
        }

        //NOTE: Only answers from the CLI itself are verdicts, a timeout or spawn failure is retried on the next row.
        let valid = match backend.check_address(address).await {
            Ok(()) => true,
            Err(error @ BackendError::NonZeroExit { .. }) => {
                debug!("Address [{address}] failed the format check: {error} {}", error.output());
                false
            },
            Err(error) => {
                warn!("Could not check address [{address}]: {error}");
                return false;
            }
        };

        self.checked_addresses.insert(address.to_string(), valid);

        valid
    }

    fn check_shard(&self, field: ShardField, value: &str) -> Result<ShardId, RowRejection> {
        let shard = value.parse::<ShardId>()
            .map_err(|_| RowRejection::InvalidShard { field, value: value.to_string() })?;

        if usize::try_from(shard).map_or(true, |shard| shard >= self.shard_count) {
            return Err(RowRejection::ShardOutOfRange {
                field,
                value: value.to_string(),
                shard_count: self.shard_count
            });
        }

        Ok(shard)
    }
}
