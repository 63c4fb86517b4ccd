use super::hmy_cli::parse_shard_count;
use super::{BackendError, SubmitRequest};

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::config::SubmitMode;
use crate::types::ChainId;

fn create_request(mode: SubmitMode, chain_id: Option<ChainId>) -> SubmitRequest {
    SubmitRequest {
        artifact: PathBuf::from("/tmp/batch.json"),
        node: "https://api.s0.t.hmny.io/".to_string(),
        chain_id,
        mode,
        timeout_per_tx: Duration::from_secs(40),
        deadline: Duration::from_secs(160)
    }
}

#[test]
fn test_parse_shard_count_counts_result_entries() -> Result<()> {
    let response = r#"{"id":"1","jsonrpc":"2.0","result":[{"shardID":0},{"shardID":1},{"shardID":2},{"shardID":3}]}"#;

    assert_eq!(parse_shard_count(response)?, 4);

    Ok(())
}

#[test]
fn test_parse_shard_count_rejects_error_and_garbage_responses() {
    let error_response = r#"{"id":"1","jsonrpc":"2.0","error":{"code":-32601,"message":"method not found"}}"#;

    assert!(matches!(parse_shard_count(error_response), Err(BackendError::MalformedResponse { .. })));
    assert!(matches!(parse_shard_count("not json"), Err(BackendError::MalformedResponse { .. })));
    assert!(matches!(parse_shard_count(r#"{"result":"0x2"}"#), Err(BackendError::MalformedResponse { .. })));
}

#[test]
fn test_submit_request_waits_for_confirmation_per_transaction() {
    let args = create_request(SubmitMode::Wait, None).cli_args();

    assert_eq!(args, vec![
        "transfer", "--file", "/tmp/batch.json", "--node", "https://api.s0.t.hmny.io/", "--timeout", "40"
    ]);
}

#[test]
fn test_submit_request_in_fast_mode_does_not_wait_and_passes_chain_id() {
    let args = create_request(SubmitMode::Fast, Some(ChainId::Testnet)).cli_args();

    assert_eq!(args, vec![
        "transfer", "--file", "/tmp/batch.json", "--node", "https://api.s0.t.hmny.io/",
        "--chain-id", "testnet", "--timeout", "0"
    ]);
}

#[cfg(unix)]
mod cli {
    use super::super::{BackendError, HmyCli, SubmissionBackend};

    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::time::Duration;

    use anyhow::Result;
    use tempfile::TempDir;

    fn create_script(directory: &TempDir, body: &str) -> Result<PathBuf> {
        let path = directory.path().join("hmy");

        fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;

        Ok(path)
    }

    #[tokio::test]
    async fn test_cli_reads_shard_count_from_subprocess_output() -> Result<()> {
        let directory = TempDir::new()?;
        let script = create_script(&directory, r#"echo '{"result":[{"shardID":0},{"shardID":1}]}'"#)?;
        let cli = HmyCli::new(script, false, Duration::from_secs(5))?;

        assert_eq!(cli.query_shard_count("http://localhost:9500").await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_cli_reports_non_zero_exit_with_output() -> Result<()> {
        let directory = TempDir::new()?;
        let script = create_script(&directory, "echo 'invalid address' >&2\nexit 3")?;
        let cli = HmyCli::new(script, false, Duration::from_secs(5))?;

        let error = cli.check_address("one1garbage").await
            .err()
            .ok_or_else(|| anyhow::anyhow!("address check should have failed"))?;

        assert!(matches!(error, BackendError::NonZeroExit { .. }));
        assert!(error.output().contains("invalid address"));

        Ok(())
    }

    #[tokio::test]
    async fn test_cli_gives_up_after_the_limit() -> Result<()> {
        let directory = TempDir::new()?;
        let script = create_script(&directory, "sleep 5")?;
        let cli = HmyCli::new(script, false, Duration::from_millis(100))?;

        let result = cli.check_address("one1slow").await;

        assert!(matches!(result, Err(BackendError::Timeout { .. })));

        Ok(())
    }
}
