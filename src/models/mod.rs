mod batch;
mod record;
mod secret;
mod transaction;

pub use batch::{Batch, BatchOutcome};
pub use record::{secret_field, trimmed_field, RawRecord};
pub use secret::SecretReference;
pub use transaction::{TransactionCandidate, ValidatedTransaction};
