use std::collections::HashMap;

use tracing::debug;

use crate::credentials::{OperatorPrompt, PromptError};
use crate::models::{SecretReference, TransactionCandidate};
use crate::types::Address;

/// The passphrase assumed when `--use-default-passphrase` is set and the row has none.
pub const DEFAULT_SECRET: &str = "";

/// Secrets resolved per sending account. Lives for one run and is never persisted.
pub type AccountSecretCache = HashMap<Address, SecretReference>;

/// Picks exactly one secret for every transaction.
///
/// A row's own `passphrase-file` or `passphrase-string` always wins. Otherwise the
/// account's secret is looked up in the cache, filled either with the default
/// passphrase or by asking the operator, so each account is asked for at most once.
pub struct CredentialResolver {
    use_default_secret: bool,
    cache: AccountSecretCache
}

impl CredentialResolver {
    pub fn new(use_default_secret: bool) -> Self {
        Self {
            use_default_secret,
            cache: AccountSecretCache::new()
        }
    }

    pub fn resolve<P: OperatorPrompt>(&mut self, candidate: &TransactionCandidate, prompt: &mut P) -> Result<SecretReference, PromptError> {
        if let Some(secret) = &candidate.row_secret {
            return Ok(secret.clone());
        }

        if self.use_default_secret {
            let secret = self.cache.entry(candidate.source.clone())
                .or_insert_with(|| SecretReference::Literal(DEFAULT_SECRET.to_string()));

            return Ok(secret.clone());
        }

        if let Some(secret) = self.cache.get(&candidate.source) {
            return Ok(secret.clone());
        }

        debug!("Asking for the passphrase of wallet [{}]", candidate.source);

        let secret = SecretReference::Literal(prompt.secret(&candidate.source)?);
        self.cache.insert(candidate.source.clone(), secret.clone());

        Ok(secret)
    }

    pub fn cached_accounts(&self) -> usize {
        self.cache.len()
    }
}
