use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::backend::{BackendError, SubmissionBackend, SubmitRequest};

/// Drives the external transaction CLI as a subprocess.
pub struct HmyCli {
    binary: PathBuf,
    verbose: bool,
    query_timeout: Duration,
    http: Client
}

impl HmyCli {
    pub fn new(binary: PathBuf, verbose: bool, query_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(query_timeout)
            .build()?;

        Ok(Self {
            binary,
            verbose,
            query_timeout,
            http
        })
    }

    async fn run(&self, args: &[String], limit: Duration) -> Result<String, BackendError> {
        let command = format!("{} {}", self.binary.display(), args.join(" "));
        let mut process = Command::new(&self.binary);

        process.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if self.verbose {
            process.arg("--verbose");
        }

        debug!("Running [{command}] with a limit of {limit:?}");

        let output = match timeout(limit, process.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => return Err(BackendError::Spawn { command, source }),
            Err(_) => return Err(BackendError::Timeout { command, timeout: limit })
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            return Err(BackendError::NonZeroExit {
                command,
                status: output.status,
                output: format!("{stdout}{stderr}")
            });
        }

        Ok(stdout)
    }
}

impl SubmissionBackend for HmyCli {
    async fn probe_endpoint(&self, node: &str) -> Result<(), BackendError> {
        let response = self.http.get(node).send().await
            .map_err(|source| BackendError::Unreachable { node: node.to_string(), source })?;

        if response.status() != StatusCode::OK {
            return Err(BackendError::UnhealthyEndpoint {
                node: node.to_string(),
                status: response.status().as_u16()
            });
        }

        Ok(())
    }

    async fn query_shard_count(&self, node: &str) -> Result<usize, BackendError> {
        let args = ["utility", "shards", "-n", node].map(str::to_string);
        let response = self.run(&args, self.query_timeout).await?;

        parse_shard_count(&response)
    }

    async fn check_address(&self, address: &str) -> Result<(), BackendError> {
        let args = ["utility", "bech32-to-addr", address].map(str::to_string);

        self.run(&args, self.query_timeout).await.map(|_| ())
    }

    async fn submit_batch(&self, request: &SubmitRequest) -> Result<String, BackendError> {
        self.run(&request.cli_args(), request.deadline).await
    }
}

/// Reads the shard count out of a `utility shards` response: the length of its `result` array.
pub fn parse_shard_count(response: &str) -> Result<usize, BackendError> {
    let malformed = |reason: String| BackendError::MalformedResponse {
        command: "utility shards".to_string(),
        reason
    };

    let value: Value = serde_json::from_str(response)
        .map_err(|error| malformed(error.to_string()))?;

    match value.get("result").and_then(Value::as_array) {
        Some(shards) => Ok(shards.len()),
        None => match value.get("error") {
            Some(error) => Err(malformed(format!("node returned an error: {error}"))),
            None => Err(malformed("no result array".to_string()))
        }
    }
}
