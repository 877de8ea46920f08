//! The reconciler - resolve, select, render, execute, classify
//!
//! One `reconcile` call is one invocation: at most one read-only existence
//! query followed by at most one mutating command, strictly sequential.
//! Nothing is cached between invocations; the device is re-queried each
//! time, so repeated runs converge against whatever the device currently
//! holds. The check-then-act window between query and mutation is an
//! accepted limitation of the usage model, not something the engine tries
//! to lock around.

use log::debug;

use crate::error::Result;
use crate::intent::{AttrMap, DesiredState, Identity, Operation};
use crate::outcome::{Outcome, classify};
use crate::render::render;
use crate::schema::ResourceSchema;
use crate::selector::{Action, select};
use crate::transport::DeviceTransport;

/// Check-then-act reconciliation over a device transport.
///
/// Holds only the transport reference; safe to share across threads for
/// callers that reconcile independent resources in parallel.
pub struct Reconciler<'t> {
    transport: &'t dyn DeviceTransport,
}

impl<'t> Reconciler<'t> {
    pub fn new(transport: &'t dyn DeviceTransport) -> Self {
        Self { transport }
    }

    /// Reconcile one resource to its desired state.
    ///
    /// `identity` names the resource; `desired` carries the non-identity
    /// attributes. Both are validated against the schema before any device
    /// interaction. For delete, non-identity attributes are ignored.
    ///
    /// Returns `Ok` with a classified [`Outcome`] (which may itself report
    /// a failed device command) or `Err` for configuration, query and
    /// transport errors.
    pub fn reconcile(
        &self,
        schema: &ResourceSchema,
        op: Operation,
        identity: &AttrMap,
        desired: &AttrMap,
    ) -> Result<Outcome> {
        let identity = Identity::resolve(schema, identity)?;

        let desired = match op {
            Operation::Delete => {
                if !desired.is_empty() {
                    debug!(
                        "{}: ignoring {} non-identity attribute(s) for delete",
                        schema.kind,
                        desired.len()
                    );
                }
                DesiredState::empty()
            }
            Operation::Create | Operation::Modify => DesiredState::resolve(schema, desired)?,
        };

        match select(self.transport, schema, op, &identity)? {
            Action::Skip { reason } => {
                debug!("{}: {}", schema.kind, reason);
                Ok(Outcome::skipped(reason))
            }
            Action::Execute { verb } => {
                let command = render(verb, &identity, &desired);
                debug!("{}: running `{}`", schema.kind, command.audit());
                let output = self.transport.run(command.args())?;
                Ok(classify(verb, &command, &output))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::intent::AttrValue;
    use crate::schema::{AttrSpec, ShowQuery, Verbs};
    use crate::transport::ExecOutput;
    use std::sync::Mutex;

    static ROLE: ResourceSchema = ResourceSchema {
        kind: "role",
        label: "Role",
        identity: &[AttrSpec::text("name", "name")],
        attrs: &[
            AttrSpec::choice("scope", "scope", &["local", "fabric"]),
            AttrSpec::flag("shell", "shell", "no-shell"),
        ],
        verbs: Verbs::full("role-create", "role-delete", "role-modify"),
        show: Some(ShowQuery::on("role-show", "name")),
        modify_verifies: false,
    };

    struct Scripted {
        outputs: Mutex<Vec<Result<ExecOutput>>>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl Scripted {
        fn new(outputs: Vec<Result<ExecOutput>>) -> Self {
            Self {
                outputs: Mutex::new(outputs),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl DeviceTransport for Scripted {
        fn run(&self, args: &[String]) -> Result<ExecOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            self.outputs.lock().unwrap().remove(0)
        }
    }

    fn map(entries: &[(&str, AttrValue)]) -> AttrMap {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_create_when_absent_renders_and_changes() {
        // role-show returns nothing, role-create succeeds silently
        let transport = Scripted::new(vec![
            Ok(ExecOutput::success_with("")),
            Ok(ExecOutput::success_with("")),
        ]);
        let engine = Reconciler::new(&transport);

        let outcome = engine
            .reconcile(
                &ROLE,
                Operation::Create,
                &map(&[("name", "netadmin".into())]),
                &map(&[("scope", "local".into())]),
            )
            .unwrap();

        assert!(outcome.changed);
        assert!(!outcome.skipped);
        assert_eq!(outcome.message, "role-create completed");
        assert_eq!(
            outcome.command.as_deref(),
            Some("role-create name netadmin scope local")
        );

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ["role-show", "format", "name", "no-show-headers"]);
        assert_eq!(calls[1], ["role-create", "name", "netadmin", "scope", "local"]);
    }

    #[test]
    fn test_create_again_skips_without_mutating() {
        let transport = Scripted::new(vec![Ok(ExecOutput::success_with("netadmin\n"))]);
        let engine = Reconciler::new(&transport);

        let outcome = engine
            .reconcile(
                &ROLE,
                Operation::Create,
                &map(&[("name", "netadmin".into())]),
                &map(&[("scope", "local".into())]),
            )
            .unwrap();

        assert!(!outcome.changed);
        assert!(outcome.skipped);
        assert_eq!(outcome.message, "Role with name netadmin already exists");
        // Only the show query ran
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn test_delete_symmetry() {
        // Absent: skip without executor
        let transport = Scripted::new(vec![Ok(ExecOutput::success_with(""))]);
        let engine = Reconciler::new(&transport);
        let outcome = engine
            .reconcile(
                &ROLE,
                Operation::Delete,
                &map(&[("name", "netadmin".into())]),
                &AttrMap::new(),
            )
            .unwrap();
        assert!(outcome.skipped);
        assert_eq!(transport.calls().len(), 1);

        // Present: delete renders identity attributes only, even when the
        // caller supplied extras
        let transport = Scripted::new(vec![
            Ok(ExecOutput::success_with("netadmin\n")),
            Ok(ExecOutput::success_with("")),
        ]);
        let engine = Reconciler::new(&transport);
        let outcome = engine
            .reconcile(
                &ROLE,
                Operation::Delete,
                &map(&[("name", "netadmin".into())]),
                &map(&[("scope", "local".into())]),
            )
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(transport.calls()[1], ["role-delete", "name", "netadmin"]);
    }

    #[test]
    fn test_query_error_surfaces_not_false_absent() {
        let transport = Scripted::new(vec![Err(Error::Transport {
            command: "role-show".into(),
            detail: "connection reset".into(),
        })]);
        let engine = Reconciler::new(&transport);

        let err = engine
            .reconcile(
                &ROLE,
                Operation::Create,
                &map(&[("name", "netadmin".into())]),
                &AttrMap::new(),
            )
            .unwrap_err();

        assert_eq!(err.kind(), crate::error::ErrorKind::Query);
        // No mutating command was attempted
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn test_config_error_before_any_device_io() {
        let transport = Scripted::new(vec![]);
        let engine = Reconciler::new(&transport);

        let err = engine
            .reconcile(
                &ROLE,
                Operation::Create,
                &map(&[("name", "netadmin".into())]),
                &map(&[("shoes", "red".into())]),
            )
            .unwrap_err();

        assert!(err.is_config());
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_device_rejection_is_failed_outcome_not_error() {
        let transport = Scripted::new(vec![
            Ok(ExecOutput::success_with("")),
            Ok(ExecOutput::failure_with(1, "role-create: scope required\n")),
        ]);
        let engine = Reconciler::new(&transport);

        let outcome = engine
            .reconcile(
                &ROLE,
                Operation::Create,
                &map(&[("name", "netadmin".into())]),
                &AttrMap::new(),
            )
            .unwrap();

        assert!(outcome.failed());
        assert_eq!(outcome.message, "role-create failed");
        assert_eq!(
            outcome.stderr.as_deref(),
            Some("role-create: scope required")
        );
    }

    #[test]
    fn test_modify_goes_straight_to_execute() {
        let transport = Scripted::new(vec![Ok(ExecOutput::success_with(""))]);
        let engine = Reconciler::new(&transport);

        let outcome = engine
            .reconcile(
                &ROLE,
                Operation::Modify,
                &map(&[("name", "netadmin".into())]),
                &map(&[("shell", false.into())]),
            )
            .unwrap();

        assert!(outcome.changed);
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ["role-modify", "name", "netadmin", "no-shell"]);
    }
}
