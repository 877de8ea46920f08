//! Management-CLI session
//!
//! Runs argument vectors through the Netvisor CLI binary. The session owns
//! the invocation prefix: `--quiet` always, then `switch <name>` when a
//! fabric member is targeted or `switch-local` for the local switch. The
//! prefix is a session concern and never appears in rendered or audited
//! commands - audit strings start at the verb.

use std::path::PathBuf;
use std::process::Command;

use log::debug;
use reconcile::{DeviceTransport, Error, ExecOutput};

/// Default location of the management CLI on a Netvisor switch.
pub const DEFAULT_CLI_PATH: &str = "/usr/bin/cli";

/// A blocking session against one switch.
///
/// Cloneable and shareable across threads; each `run` spawns one CLI
/// process and waits for it.
#[derive(Debug, Clone)]
pub struct CliSession {
    cli_path: PathBuf,
    switch: Option<String>,
}

impl CliSession {
    /// Session against the local switch via the default CLI binary.
    pub fn new() -> Self {
        Self {
            cli_path: PathBuf::from(DEFAULT_CLI_PATH),
            switch: None,
        }
    }

    /// Use a different CLI binary (tests, wrapper scripts).
    pub fn with_cli_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cli_path = path.into();
        self
    }

    /// Target a named fabric member instead of the local switch.
    pub fn on_switch(mut self, switch: Option<String>) -> Self {
        self.switch = switch;
        self
    }

    /// The invocation prefix placed before every command.
    pub fn base_args(&self) -> Vec<String> {
        let mut args = vec!["--quiet".to_string()];
        match &self.switch {
            Some(name) => {
                args.push("switch".to_string());
                args.push(name.clone());
            }
            None => args.push("switch-local".to_string()),
        }
        args
    }
}

impl Default for CliSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceTransport for CliSession {
    fn run(&self, args: &[String]) -> reconcile::Result<ExecOutput> {
        let verb = args.first().cloned().unwrap_or_default();
        debug!(
            "exec {} {} {}",
            self.cli_path.display(),
            self.base_args().join(" "),
            verb
        );

        let output = Command::new(&self.cli_path)
            .args(self.base_args())
            .args(args)
            .output()
            .map_err(|err| Error::Transport {
                command: verb,
                detail: err.to_string(),
            })?;

        Ok(output.into())
    }
}
