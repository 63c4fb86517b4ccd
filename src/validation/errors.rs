use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Why a row was left out of the batch. None of these stop the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowRejection {
    #[error("Address error! From: [{from}]; To: [{to}]")]
    InvalidAddress {
        from: String,
        to: String
    },
    #[error("To and/or from shard is not provided")]
    MissingShard,
    #[error("{field} shard [{value}] is not a valid shard index")]
    InvalidShard {
        field: ShardField,
        value: String
    },
    #[error("{field} shard [{value}] is >= number of shards [{shard_count}]")]
    ShardOutOfRange {
        field: ShardField,
        value: String,
        shard_count: usize
    },
    #[error("Gas price [{value}] is not an integer")]
    InvalidGasPrice {
        value: String
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShardField {
    From,
    To
}

impl Display for ShardField {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ShardField::From => formatter.write_str("From"),
            ShardField::To => formatter.write_str("To")
        }
    }
}
