use std::path::Path;
use std::process::Stdio;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tokio::process::Command;

use crate::config::DeployConfig;

type HmacSha256 = Hmac<Sha256>;

/// Verify an `X-Hub-Signature-256` header (`sha256=<hex>`) against the raw
/// request body. Comparison is constant-time; any malformed or missing
/// header fails closed.
pub fn verify_signature(secret: &str, body: &[u8], header: Option<&str>) -> bool {
    let Some(header) = header else {
        return false;
    };
    let Some(hex_digest) = header.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(claimed) = hex::decode(hex_digest) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    let expected = mac.finalize().into_bytes();

    expected.as_slice().ct_eq(claimed.as_slice()).into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Pull reported "Already up to date"; no restart issued.
    UpToDate,
    Redeployed,
}

/// A subprocess failed. `output` carries captured stdout/stderr for the
/// operator log; only `step` is surfaced to the HTTP caller.
#[derive(Debug)]
pub struct DeployError {
    pub step: String,
    pub output: String,
}

impl std::fmt::Display for DeployError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.step, self.output)
    }
}

/// Fast-forward the working copy to the latest revision of the configured
/// branch and, if anything changed, rebuild and restart the compose service.
/// A pull that succeeded followed by a failed restart is surfaced as-is;
/// the working copy is not reverted.
pub async fn run(config: &DeployConfig) -> Result<DeployOutcome, DeployError> {
    run_step(
        "git checkout",
        "git",
        &["checkout", &config.branch],
        &config.repo_dir,
    )
    .await?;

    let pull_output = run_step(
        "git pull",
        "git",
        &["pull", "origin", &config.branch],
        &config.repo_dir,
    )
    .await?;
    tracing::info!("git pull: {}", pull_output.trim());

    if pull_output.contains("Already up to date") {
        return Ok(DeployOutcome::UpToDate);
    }

    tracing::info!("Changes pulled, rebuilding service {}", config.service);
    let compose_file = config.compose_file.to_string_lossy().into_owned();
    let compose_output = run_step(
        "compose rebuild",
        "docker",
        &[
            "compose",
            "-f",
            &compose_file,
            "up",
            "-d",
            "--build",
            &config.service,
        ],
        &config.repo_dir,
    )
    .await?;
    tracing::info!("compose rebuild: {}", compose_output.trim());

    Ok(DeployOutcome::Redeployed)
}

/// Run one deployment command, blocking until it exits, and capture its
/// output. Non-zero exit or a spawn failure becomes a `DeployError`.
async fn run_step(
    step: &str,
    program: &str,
    args: &[&str],
    cwd: &Path,
) -> Result<String, DeployError> {
    let result = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| DeployError {
            step: step.to_string(),
            output: format!("failed to spawn {program}: {e}"),
        })?;

    let stdout = String::from_utf8_lossy(&result.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&result.stderr).into_owned();

    if !result.status.success() {
        return Err(DeployError {
            step: step.to_string(),
            output: format!("exit {}\nstdout: {stdout}\nstderr: {stderr}", result.status),
        });
    }

    Ok(stdout)
}
