//! Device transport boundary
//!
//! The engine never talks to a device directly; it hands an argument vector
//! to a [`DeviceTransport`] and gets back untyped text output. Production
//! implementations wrap the management CLI; tests script the boundary.

use std::process::Output;

use crate::error::Result;

/// Output from one command run against the device.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Process exit code; `None` when the process died to a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn new(code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A zero-exit output, convenient for tests.
    pub fn success_with(stdout: impl Into<String>) -> Self {
        Self::new(Some(0), stdout, "")
    }

    /// A non-zero-exit output, convenient for tests.
    pub fn failure_with(code: i32, stderr: impl Into<String>) -> Self {
        Self::new(Some(code), "", stderr)
    }

    /// Whether the command exited zero. Signal death counts as failure.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<Output> for ExecOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// The process boundary to the device.
///
/// `run` blocks until the command completes. An `Err` means the boundary
/// itself failed (binary missing, connection dropped); a command the device
/// rejected still returns `Ok` with a non-zero exit code. Implementations
/// must be safe to share across threads - callers may reconcile independent
/// resources in parallel.
pub trait DeviceTransport: Send + Sync {
    /// Execute an argument vector against the device.
    fn run(&self, args: &[String]) -> Result<ExecOutput>;
}
