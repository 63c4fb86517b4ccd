mod errors;
#[cfg(test)]
pub mod fake;
mod hmy_cli;
mod request;
#[cfg(test)]
mod tests;

pub use errors::BackendError;
pub use hmy_cli::HmyCli;
pub use request::SubmitRequest;

/// The external capabilities the pipeline depends on.
///
/// Everything that touches the network or the transaction CLI goes through here so
/// that the pipeline can be driven by a scripted backend in tests.
#[allow(async_fn_in_trait)]
pub trait SubmissionBackend {
    /// Succeeds when the endpoint answers a plain request with a healthy status.
    async fn probe_endpoint(&self, node: &str) -> Result<(), BackendError>;

    /// Number of shards the endpoint's network currently has.
    async fn query_shard_count(&self, node: &str) -> Result<usize, BackendError>;

    /// Succeeds when `address` is a well formed bech32 account address.
    async fn check_address(&self, address: &str) -> Result<(), BackendError>;

    /// Hands a serialized batch to the CLI and returns its raw output.
    async fn submit_batch(&self, request: &SubmitRequest) -> Result<String, BackendError>;
}
