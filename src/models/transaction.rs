use serde::{Serialize, Serializer};

use crate::models::SecretReference;
use crate::types::{Address, ShardId};

/// A row that passed every format and topology check but has no credential yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionCandidate {
    pub source: Address,
    pub destination: Address,
    pub amount: String,
    pub source_shard: ShardId,
    pub destination_shard: ShardId,
    pub gas_price: Option<String>,
    /// A secret given on the row itself, which always wins over account level resolution.
    pub row_secret: Option<SecretReference>
}

impl TransactionCandidate {
    pub fn into_validated(self, secret: SecretReference) -> ValidatedTransaction {
        ValidatedTransaction {
            source: self.source,
            destination: self.destination,
            amount: self.amount,
            source_shard: self.source_shard,
            destination_shard: self.destination_shard,
            secret,
            gas_price: self.gas_price,
            stop_on_error: true
        }
    }
}

/// One entry of the JSON array handed to `transfer --file`.
///
/// The amount and gas price are passed through verbatim, shards are re-emitted as
/// strings because that is what the CLI's batch format expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedTransaction {
    #[serde(rename = "from")]
    pub source: Address,
    #[serde(rename = "to")]
    pub destination: Address,
    pub amount: String,
    #[serde(rename = "from-shard", serialize_with = "as_string")]
    pub source_shard: ShardId,
    #[serde(rename = "to-shard", serialize_with = "as_string")]
    pub destination_shard: ShardId,
    #[serde(flatten)]
    pub secret: SecretReference,
    #[serde(rename = "gas-price", skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(rename = "stop-on-error")]
    pub stop_on_error: bool
}

impl ValidatedTransaction {
    /// A copy that is safe to print or log.
    pub fn redacted(&self) -> ValidatedTransaction {
        ValidatedTransaction {
            secret: self.secret.redacted(),
            ..self.clone()
        }
    }
}

fn as_string<S: Serializer>(shard: &ShardId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(shard)
}
