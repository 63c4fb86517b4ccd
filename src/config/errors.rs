use thiserror::Error;

use crate::types::ChainIdError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Batch size must be at least 1, got [{0}]")]
    InvalidBatchSize(usize),
    #[error(transparent)]
    InvalidChainId(#[from] ChainIdError),
    #[error("Cannot expand [{0}], HOME is not set")]
    HomeNotSet(String)
}
