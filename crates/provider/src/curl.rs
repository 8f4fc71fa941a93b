//! Fallback transport: re-issue the call through an external `curl` process.
//!
//! Some provider edges reject or drop connections from the in-process client
//! while accepting the same request from the command-line tool. The
//! subprocess runs on the async runtime's process driver so it never blocks
//! a worker, and it is killed if it outlives its time bound.

use async_trait::async_trait;
use farelink_config::FallbackConfig;
use farelink_types::{FarelinkError, HttpCall, Transport, traits::Result};
use serde_json::Value;
use std::{process::Stdio, time::Duration};
use tokio::process::Command;

/// Longest slice of stdout quoted back in a decode error.
const MAX_QUOTED_OUTPUT: usize = 512;

pub struct CurlTransport {
    program: String,
    leading_args: Vec<String>,
    timeout: Duration,
}

impl CurlTransport {
    #[must_use]
    pub fn new(program: impl Into<String>, leading_args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            leading_args,
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(config: &FallbackConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone(), config.timeout())
    }
}

/// Builds the command-line equivalent of `call`: same method, URL, headers
/// and JSON body.
///
/// # Errors
///
/// Returns [`FarelinkError::Serialization`] if the body cannot be encoded.
pub fn curl_args(call: &HttpCall) -> Result<Vec<String>> {
    let mut args: Vec<String> = vec![
        "-sS".into(),
        "-X".into(),
        "POST".into(),
        call.url.clone(),
    ];
    for (name, value) in &call.headers {
        args.push("-H".into());
        args.push(format!("{name}: {value}"));
    }
    if let Some(timeout) = call.timeout {
        args.push("--max-time".into());
        args.push(timeout.as_secs().max(1).to_string());
    }
    args.push("-d".into());
    args.push(serde_json::to_string(&call.body)?);
    Ok(args)
}

fn quote(output: &str) -> &str {
    let trimmed = output.trim();
    match trimmed.char_indices().nth(MAX_QUOTED_OUTPUT) {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    }
}

#[async_trait]
impl Transport for CurlTransport {
    fn name(&self) -> &'static str {
        "curl"
    }

    async fn execute(&self, call: &HttpCall) -> Result<Value> {
        let args = curl_args(call)?;
        tracing::debug!(program = %self.program, url = %call.url, "running fallback transport");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                FarelinkError::Fallback(format!(
                    "{} did not finish within {}s",
                    self.program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| FarelinkError::Fallback(format!("failed to run {}: {e}", self.program)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = if stderr.trim().is_empty() {
                quote(&stdout)
            } else {
                quote(&stderr)
            };
            return Err(FarelinkError::Fallback(format!(
                "{} exited with {}: {diagnostic}",
                self.program, output.status
            )));
        }

        serde_json::from_str(&stdout).map_err(|e| {
            FarelinkError::Fallback(format!(
                "{} returned a body that is not JSON ({e}): {}",
                self.program,
                quote(&stdout)
            ))
        })
    }
}
