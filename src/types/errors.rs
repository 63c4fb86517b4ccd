use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainIdError {
    #[error("Chain id [{0}] is not one of: mainnet, testnet, stressnet, partner, dryrun")]
    Unknown(String)
}
