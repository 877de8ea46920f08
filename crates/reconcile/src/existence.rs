//! Existence evaluation - does the named resource exist on the device?
//!
//! Issues the schema's read-only listing query through the transport and
//! membership-tests the identity value against the machine-parseable output
//! (`format <field> no-show-headers`). A failed query is a distinct
//! [`Error::QueryFailed`]; it is never coerced into "does not exist".

use log::warn;

use crate::error::{Error, Result};
use crate::intent::Identity;
use crate::schema::{AttrKind, AttrSpec, ResourceSchema, ShowQuery};
use crate::transport::DeviceTransport;

/// Build the listing query's argument vector.
///
/// Leading `filter_by` identity attributes narrow the listing, so compound
/// identities (e.g. list name + ip) are checked as a whole: the query is
/// scoped to the leading fields and membership is tested on the last.
pub fn query_args(
    schema: &ResourceSchema,
    show: &ShowQuery,
    identity: &Identity<'_>,
) -> Result<Vec<String>> {
    let mut args = vec![show.command.to_string()];

    for &field in show.filter_by {
        let spec = schema
            .identity_attr(field)
            .ok_or(Error::MissingIdentity {
                kind: schema.kind,
                attr: field,
            })?;
        let value = identity.get(field).ok_or(Error::MissingIdentity {
            kind: schema.kind,
            attr: field,
        })?;
        args.push(token_of(spec).to_string());
        args.push(value.to_string());
    }

    let match_spec = schema
        .identity_attr(show.match_on)
        .ok_or(Error::MissingIdentity {
            kind: schema.kind,
            attr: show.match_on,
        })?;
    args.push("format".to_string());
    args.push(token_of(match_spec).to_string());
    args.push("no-show-headers".to_string());

    Ok(args)
}

fn token_of(spec: &AttrSpec) -> &'static str {
    match spec.kind {
        AttrKind::Choice { token, .. } | AttrKind::Text { token, .. } => token,
        // Unreachable: schema validation rejects flag identities
        AttrKind::Flag { on, .. } => on,
    }
}

/// Run the existence query and test membership of the identity value.
///
/// Empty output means absent. Non-zero exit or a transport failure is a
/// query error. Output is split on whitespace, matching the one-value-per
/// line format the device emits without headers.
pub fn check(
    transport: &dyn DeviceTransport,
    schema: &ResourceSchema,
    show: &ShowQuery,
    identity: &Identity<'_>,
) -> Result<bool> {
    let args = query_args(schema, show, identity)?;

    let output = transport.run(&args).map_err(|err| match err {
        Error::Transport { detail, .. } => Error::QueryFailed {
            command: show.command.to_string(),
            detail,
        },
        other => other,
    })?;

    if !output.success() {
        let detail = if output.stderr.trim().is_empty() {
            match output.code {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            }
        } else {
            output.stderr.trim().to_string()
        };
        return Err(Error::QueryFailed {
            command: show.command.to_string(),
            detail,
        });
    }

    if !output.stderr.trim().is_empty() {
        warn!(
            "{}: `{}` wrote to stderr but exited zero: {}",
            schema.kind,
            show.command,
            output.stderr.trim()
        );
    }

    let wanted = identity.get(show.match_on).ok_or(Error::MissingIdentity {
        kind: schema.kind,
        attr: show.match_on,
    })?;

    Ok(output.stdout.split_whitespace().any(|tok| tok == wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{AttrMap, AttrValue};
    use crate::schema::{AttrSpec, Verbs};
    use crate::transport::ExecOutput;
    use std::sync::Mutex;

    static ROLE: ResourceSchema = ResourceSchema {
        kind: "role",
        label: "Role",
        identity: &[AttrSpec::text("name", "name")],
        attrs: &[],
        verbs: Verbs::full("role-create", "role-delete", "role-modify"),
        show: Some(ShowQuery::on("role-show", "name")),
        modify_verifies: false,
    };

    static LIST_IP: ResourceSchema = ResourceSchema {
        kind: "access-list-ip",
        label: "access list entry",
        identity: &[
            AttrSpec::text("name", "name"),
            AttrSpec::text("ip", "ip"),
        ],
        attrs: &[],
        verbs: Verbs::create_delete("access-list-ip-add", "access-list-ip-remove"),
        show: Some(ShowQuery::scoped("access-list-ip-show", &["name"], "ip")),
        modify_verifies: false,
    };

    /// Transport that replays scripted outputs and records every argv.
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

    fn map(entries: &[(&str, &str)]) -> AttrMap {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), AttrValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_query_args_simple_identity() {
        let identity = Identity::resolve(&ROLE, &map(&[("name", "netadmin")])).unwrap();
        let args = query_args(&ROLE, &ROLE.show.unwrap(), &identity).unwrap();
        assert_eq!(args, ["role-show", "format", "name", "no-show-headers"]);
    }

    #[test]
    fn test_query_args_compound_identity_scopes_listing() {
        let identity =
            Identity::resolve(&LIST_IP, &map(&[("name", "blk"), ("ip", "10.0.0.1")])).unwrap();
        let args = query_args(&LIST_IP, &LIST_IP.show.unwrap(), &identity).unwrap();
        assert_eq!(
            args,
            [
                "access-list-ip-show",
                "name",
                "blk",
                "format",
                "ip",
                "no-show-headers"
            ]
        );
    }

    #[test]
    fn test_membership_found() {
        let transport = Scripted::new(vec![Ok(ExecOutput::success_with(
            "netadmin\noperator\nreadonly\n",
        ))]);
        let identity = Identity::resolve(&ROLE, &map(&[("name", "netadmin")])).unwrap();
        assert!(check(&transport, &ROLE, &ROLE.show.unwrap(), &identity).unwrap());
    }

    #[test]
    fn test_empty_output_means_absent() {
        let transport = Scripted::new(vec![Ok(ExecOutput::success_with(""))]);
        let identity = Identity::resolve(&ROLE, &map(&[("name", "netadmin")])).unwrap();
        assert!(!check(&transport, &ROLE, &ROLE.show.unwrap(), &identity).unwrap());
    }

    #[test]
    fn test_compound_identity_mismatch_is_absent() {
        // Listing scoped to the name returns other ips only
        let transport = Scripted::new(vec![Ok(ExecOutput::success_with("10.0.0.2\n10.0.0.3\n"))]);
        let identity =
            Identity::resolve(&LIST_IP, &map(&[("name", "blk"), ("ip", "10.0.0.1")])).unwrap();
        assert!(!check(&transport, &LIST_IP, &LIST_IP.show.unwrap(), &identity).unwrap());

        let calls = transport.calls();
        assert_eq!(calls[0][1..3], ["name".to_string(), "blk".to_string()]);
    }

    #[test]
    fn test_query_failure_is_not_absent() {
        let transport = Scripted::new(vec![Ok(ExecOutput::failure_with(
            255,
            "connection to switch lost",
        ))]);
        let identity = Identity::resolve(&ROLE, &map(&[("name", "netadmin")])).unwrap();
        let err = check(&transport, &ROLE, &ROLE.show.unwrap(), &identity).unwrap_err();
        assert!(matches!(err, Error::QueryFailed { .. }));
        assert!(err.to_string().contains("connection to switch lost"));
    }

    #[test]
    fn test_transport_failure_becomes_query_error() {
        let transport = Scripted::new(vec![Err(Error::Transport {
            command: "role-show".into(),
            detail: "No such file or directory".into(),
        })]);
        let identity = Identity::resolve(&ROLE, &map(&[("name", "netadmin")])).unwrap();
        let err = check(&transport, &ROLE, &ROLE.show.unwrap(), &identity).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Query);
    }

    #[test]
    fn test_stderr_with_zero_exit_still_succeeds() {
        let transport = Scripted::new(vec![Ok(ExecOutput::new(
            Some(0),
            "netadmin\n",
            "warning: listing truncated",
        ))]);
        let identity = Identity::resolve(&ROLE, &map(&[("name", "netadmin")])).unwrap();
        assert!(check(&transport, &ROLE, &ROLE.show.unwrap(), &identity).unwrap());
    }
}
