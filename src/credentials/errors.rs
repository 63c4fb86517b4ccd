use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Could not read the passphrase for wallet [{account}]: {source}")]
    Secret {
        account: String,
        source: io::Error
    },
    #[error("Could not read the confirmation: {0}")]
    Confirmation(#[from] io::Error)
}
