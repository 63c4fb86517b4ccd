use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::types::errors::ChainIdError;

/// Networks the external CLI accepts for `--chain-id`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ChainId {
    Mainnet,
    Testnet,
    Stressnet,
    Partner,
    Dryrun
}

impl ChainId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Mainnet => "mainnet",
            ChainId::Testnet => "testnet",
            ChainId::Stressnet => "stressnet",
            ChainId::Partner => "partner",
            ChainId::Dryrun => "dryrun"
        }
    }
}

impl Display for ChainId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    //NOTE: The CLI itself is case sensitive here, so we are too.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mainnet" => Ok(ChainId::Mainnet),
            "testnet" => Ok(ChainId::Testnet),
            "stressnet" => Ok(ChainId::Stressnet),
            "partner" => Ok(ChainId::Partner),
            "dryrun" => Ok(ChainId::Dryrun),
            other => Err(ChainIdError::Unknown(other.to_string()))
        }
    }
}
