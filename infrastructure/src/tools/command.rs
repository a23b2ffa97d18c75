//! Command execution tool: bash

use devmate_domain::{
    ParamKind, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolResultMetadata,
};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Tool name constant
pub const BASH: &str = "bash";

/// Wall-clock timeout for command execution (5 minutes)
const COMMAND_TIMEOUT_SECS: u64 = 300;

/// Maximum output size (1 MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

/// Get the tool definition for bash
pub fn bash_definition() -> ToolDefinition {
    ToolDefinition::new(
        BASH,
        "Execute a shell command and return its combined stdout/stderr",
    )
    .with_parameter(ToolParameter::new("command", "The command to execute", true))
    .with_parameter(
        ToolParameter::new(
            "description",
            "Short human-readable description of what the command does",
            false,
        )
        .with_kind(ParamKind::String),
    )
}

/// Execute the bash tool.
///
/// Runs the command under `sh -c` with merged output capture. Success iff
/// the exit code is zero; a non-zero exit becomes a `COMMAND_FAILED` error
/// that still carries the captured output. Exceeding the wall-clock budget
/// kills the process and yields a `TIMEOUT` error.
pub fn execute_bash(call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let command_str = match call.require_str("command") {
        Ok(c) => c,
        Err(e) => return ToolResult::failure(BASH, ToolError::bad_arguments(e)),
    };

    let mut cmd = Command::new("sh");
    cmd.args(["-c", command_str]);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            return ToolResult::failure(
                BASH,
                ToolError::io(format!("Failed to spawn command: {}", e)),
            )
        }
    };

    let output = match wait_with_timeout(child, Duration::from_secs(COMMAND_TIMEOUT_SECS)) {
        Ok(o) => o,
        Err(WaitError::Timeout) => {
            return ToolResult::failure(
                BASH,
                ToolError::timeout(format!(
                    "Command timed out after {} seconds",
                    COMMAND_TIMEOUT_SECS
                )),
            )
        }
        Err(WaitError::Io(e)) => {
            return ToolResult::failure(
                BASH,
                ToolError::io(format!("Failed to wait for process: {}", e)),
            )
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    let exit_code = output.status.code().unwrap_or(-1);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut combined = String::new();
    combined.push_str(&stdout);
    combined.push_str(&stderr);
    let mut combined = combined.trim().to_string();

    if combined.len() > MAX_OUTPUT_SIZE {
        combined.truncate(MAX_OUTPUT_SIZE);
        combined.push_str("\n... (output truncated)");
    }

    let metadata = ToolResultMetadata {
        duration_ms: Some(duration_ms),
        exit_code: Some(exit_code),
        ..Default::default()
    };

    if output.status.success() {
        ToolResult::success(BASH, combined).with_metadata(metadata)
    } else {
        ToolResult::failure(BASH, ToolError::command_failed(exit_code))
            .with_output(combined)
            .with_metadata(metadata)
    }
}

enum WaitError {
    Timeout,
    Io(std::io::Error),
}

/// Wait for a child process with a wall-clock timeout.
///
/// Polls `try_wait`; on timeout the process is killed and reaped.
fn wait_with_timeout(
    mut child: std::process::Child,
    timeout: Duration,
) -> Result<std::process::Output, WaitError> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                let stdout = child
                    .stdout
                    .take()
                    .map(|mut s| {
                        let mut buf = Vec::new();
                        std::io::Read::read_to_end(&mut s, &mut buf).ok();
                        buf
                    })
                    .unwrap_or_default();

                let stderr = child
                    .stderr
                    .take()
                    .map(|mut s| {
                        let mut buf = Vec::new();
                        std::io::Read::read_to_end(&mut s, &mut buf).ok();
                        buf
                    })
                    .unwrap_or_default();

                return Ok(std::process::Output {
                    status,
                    stdout,
                    stderr,
                });
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(WaitError::Timeout);
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => return Err(WaitError::Io(e)),
        }
    }
}
