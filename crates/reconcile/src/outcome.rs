//! Outcome classification - executor output to structured result
//!
//! The outcome record is the unit returned to callers: did anything change,
//! was the invocation skipped, what command ran (masked), and what the
//! device said. Failure of the mutating command is a classified outcome,
//! not an error - the caller decides whether it halts a larger run.

use log::warn;
use serde::Serialize;

use crate::render::RenderedCommand;
use crate::transport::ExecOutput;

/// The result of one reconciliation.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// A mutating command ran and the device accepted it
    pub changed: bool,
    /// The engine determined no action was required
    pub skipped: bool,
    /// User-facing summary, e.g. `"role-create completed"`
    pub message: String,
    /// Audit rendition of the executed command (sensitive values masked);
    /// absent for skips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl Outcome {
    /// A no-op outcome with the selector's reason.
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            changed: false,
            skipped: true,
            message: reason.into(),
            command: None,
            stdout: None,
            stderr: None,
        }
    }

    /// Whether the mutating command failed.
    pub fn failed(&self) -> bool {
        !self.changed && !self.skipped
    }
}

/// Classify executor output into an outcome.
///
/// Exit status is the sole failure signal: non-zero (or signal death) fails;
/// zero succeeds, with or without stdout - many verbs emit nothing on
/// success. Stderr alongside a zero exit is logged, not failed.
pub fn classify(verb: &str, command: &RenderedCommand, output: &ExecOutput) -> Outcome {
    if !output.success() {
        return Outcome {
            changed: false,
            skipped: false,
            message: format!("{verb} failed"),
            command: Some(command.audit()),
            stdout: None,
            stderr: Some(output.stderr.trim().to_string()),
        };
    }

    if !output.stderr.trim().is_empty() {
        warn!(
            "`{}` wrote to stderr but exited zero: {}",
            verb,
            output.stderr.trim()
        );
    }

    let stdout = output.stdout.trim();
    Outcome {
        changed: true,
        skipped: false,
        message: format!("{verb} completed"),
        command: Some(command.audit()),
        stdout: (!stdout.is_empty()).then(|| stdout.to_string()),
        stderr: None,
    }
}

/// Aggregate counts over a batch of outcomes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub changed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Add one outcome to the summary.
    pub fn add(&mut self, outcome: &Outcome) {
        if outcome.failed() {
            self.failed += 1;
        } else if outcome.skipped {
            self.skipped += 1;
        } else {
            self.changed += 1;
        }
    }

    /// Check if the run was fully successful (no failures).
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Total outcomes recorded.
    pub fn total(&self) -> usize {
        self.changed + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{AttrMap, AttrValue, DesiredState, Identity};
    use crate::render::render;
    use crate::schema::{AttrSpec, ResourceSchema, ShowQuery, Verbs};

    static ROLE: ResourceSchema = ResourceSchema {
        kind: "role",
        label: "Role",
        identity: &[AttrSpec::text("name", "name")],
        attrs: &[],
        verbs: Verbs::full("role-create", "role-delete", "role-modify"),
        show: Some(ShowQuery::on("role-show", "name")),
        modify_verifies: false,
    };

    fn sample_command() -> RenderedCommand {
        let mut map = AttrMap::new();
        map.insert("name".into(), AttrValue::from("netadmin"));
        let identity = Identity::resolve(&ROLE, &map).unwrap();
        render("role-create", &identity, &DesiredState::empty())
    }

    #[test]
    fn test_nonzero_exit_fails() {
        let out = ExecOutput::failure_with(1, "role-create: duplicate role\n");
        let outcome = classify("role-create", &sample_command(), &out);
        assert!(!outcome.changed);
        assert!(!outcome.skipped);
        assert!(outcome.failed());
        assert_eq!(outcome.message, "role-create failed");
        assert_eq!(outcome.stderr.as_deref(), Some("role-create: duplicate role"));
    }

    #[test]
    fn test_zero_exit_with_output_changes() {
        let out = ExecOutput::success_with("Role created\n");
        let outcome = classify("role-create", &sample_command(), &out);
        assert!(outcome.changed);
        assert_eq!(outcome.message, "role-create completed");
        assert_eq!(outcome.stdout.as_deref(), Some("Role created"));
    }

    #[test]
    fn test_zero_exit_without_output_still_changes() {
        let out = ExecOutput::success_with("");
        let outcome = classify("role-create", &sample_command(), &out);
        assert!(outcome.changed);
        assert!(outcome.stdout.is_none());
        assert_eq!(outcome.message, "role-create completed");
    }

    #[test]
    fn test_stderr_with_zero_exit_is_success() {
        let out = ExecOutput::new(Some(0), "", "warning: scope defaulted to local");
        let outcome = classify("role-create", &sample_command(), &out);
        assert!(outcome.changed);
        assert!(!outcome.failed());
    }

    #[test]
    fn test_signal_death_fails() {
        let out = ExecOutput::new(None, "", "");
        let outcome = classify("role-create", &sample_command(), &out);
        assert!(outcome.failed());
    }

    #[test]
    fn test_skip_bypasses_command() {
        let outcome = Outcome::skipped("Role with name netadmin already exists");
        assert!(!outcome.changed);
        assert!(outcome.skipped);
        assert!(!outcome.failed());
        assert!(outcome.command.is_none());
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::default();
        summary.add(&classify(
            "role-create",
            &sample_command(),
            &ExecOutput::success_with(""),
        ));
        summary.add(&Outcome::skipped("exists"));
        summary.add(&classify(
            "role-delete",
            &sample_command(),
            &ExecOutput::failure_with(1, "nope"),
        ));

        assert_eq!(summary.changed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 3);
        assert!(!summary.is_success());
    }
}
