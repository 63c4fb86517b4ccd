use std::fmt;
use std::fmt::{Debug, Formatter};

use serde::Serialize;

/// The credential attached to a transaction, exactly one per transaction.
///
/// Serializes as a single `passphrase-file` or `passphrase-string` key so that it
/// can be flattened into the transaction object the CLI reads.
#[derive(Clone, Eq, PartialEq, Serialize)]
pub enum SecretReference {
    #[serde(rename = "passphrase-file")]
    File(String),
    #[serde(rename = "passphrase-string")]
    Literal(String)
}

impl SecretReference {
    pub const REDACTED: &'static str = "********";

    /// The literal as it may be shown to an operator or written to a log.
    pub fn redacted(&self) -> SecretReference {
        match self {
            SecretReference::File(path) => SecretReference::File(path.clone()),
            SecretReference::Literal(literal) if literal.is_empty() => SecretReference::Literal(String::new()),
            SecretReference::Literal(_) => SecretReference::Literal(Self::REDACTED.to_string())
        }
    }
}

impl Debug for SecretReference {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SecretReference::File(path) => formatter.debug_tuple("File").field(path).finish(),
            SecretReference::Literal(_) => formatter.debug_tuple("Literal").field(&Self::REDACTED).finish()
        }
    }
}
