use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use serde_json::Value;

use crate::backend::{BackendError, SubmissionBackend, SubmitRequest};

/// What the fake saw for one `submit_batch` call.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    pub request: SubmitRequest,
    /// The artifact contents, read while the artifact still existed.
    pub payload: Value,
    #[cfg(unix)]
    pub mode: u32
}

/// A scripted backend: fixed topology, a set of rejected addresses and a queue of submission results.
pub struct FakeBackend {
    pub shard_count: Option<usize>,
    pub healthy: bool,
    pub invalid_addresses: HashSet<String>,
    pub address_checks: Cell<usize>,
    /// How many upcoming address checks time out before answering.
    pub address_timeouts: Cell<usize>,
    pub submit_results: RefCell<VecDeque<Result<String, BackendError>>>,
    pub submissions: RefCell<Vec<RecordedSubmission>>
}

impl FakeBackend {
    pub fn new(shard_count: usize) -> Self {
        Self {
            shard_count: Some(shard_count),
            healthy: true,
            invalid_addresses: HashSet::new(),
            address_checks: Cell::new(0),
            address_timeouts: Cell::new(0),
            submit_results: RefCell::new(VecDeque::new()),
            submissions: RefCell::new(Vec::new())
        }
    }

    pub fn with_invalid_address(mut self, address: &str) -> Self {
        self.invalid_addresses.insert(address.to_string());
        self
    }

    pub fn push_result(&self, result: Result<String, BackendError>) {
        self.submit_results.borrow_mut().push_back(result);
    }

    pub fn submitted_sizes(&self) -> Vec<usize> {
        self.submissions.borrow().iter()
            .map(|submission| submission.payload.as_array().map_or(0, Vec::len))
            .collect()
    }

    pub fn artifacts(&self) -> Vec<PathBuf> {
        self.submissions.borrow().iter()
            .map(|submission| submission.request.artifact.clone())
            .collect()
    }
}

pub fn failed_exit(output: &str) -> BackendError {
    BackendError::NonZeroExit {
        command: "hmy transfer".to_string(),
        status: exit_status(1),
        output: output.to_string()
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

impl SubmissionBackend for FakeBackend {
    async fn probe_endpoint(&self, node: &str) -> Result<(), BackendError> {
        if self.healthy {
            Ok(())
        } else {
            Err(BackendError::UnhealthyEndpoint { node: node.to_string(), status: 503 })
        }
    }

    async fn query_shard_count(&self, _node: &str) -> Result<usize, BackendError> {
        self.shard_count.ok_or_else(|| BackendError::MalformedResponse {
            command: "utility shards".to_string(),
            reason: "no result array".to_string()
        })
    }

    async fn check_address(&self, address: &str) -> Result<(), BackendError> {
        self.address_checks.set(self.address_checks.get() + 1);

        if self.address_timeouts.get() > 0 {
            self.address_timeouts.set(self.address_timeouts.get() - 1);

            return Err(BackendError::Timeout {
                command: format!("hmy utility bech32-to-addr {address}"),
                timeout: Duration::from_secs(200)
            });
        }

        if self.invalid_addresses.contains(address) {
            return Err(failed_exit(&format!("{address} is not a bech32 address")));
        }

        Ok(())
    }

    async fn submit_batch(&self, request: &SubmitRequest) -> Result<String, BackendError> {
        let contents = fs::read_to_string(&request.artifact).unwrap_or_default();
        let payload = serde_json::from_str(&contents).unwrap_or(Value::Null);

        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::PermissionsExt;

            fs::metadata(&request.artifact).map(|metadata| metadata.permissions().mode() & 0o777).unwrap_or(0)
        };

        self.submissions.borrow_mut().push(RecordedSubmission {
            request: request.clone(),
            payload,
            #[cfg(unix)]
            mode
        });

        self.submit_results.borrow_mut().pop_front()
            .unwrap_or_else(|| Ok("transaction-hash: 0xfeed".to_string()))
    }
}
