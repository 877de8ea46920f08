//! Action selection - the operation x existence state machine
//!
//! Decides, per invocation, whether to execute a mutating verb or
//! short-circuit with a no-op. The existence result is a value threaded
//! through this function; nothing here or elsewhere keeps idempotency state
//! between invocations.

use log::debug;

use crate::error::Result;
use crate::existence;
use crate::intent::{Identity, Operation};
use crate::schema::ResourceSchema;
use crate::transport::DeviceTransport;

/// The selected action for one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do; carries the user-facing reason
    Skip { reason: String },
    /// Render and execute this verb
    Execute { verb: &'static str },
}

/// Select the action for `op` against the resource named by `identity`.
///
/// - Create: checked; an existing resource skips.
/// - Delete: checked; a missing resource skips.
/// - Modify: unchecked, unless the schema opts into `modify_verifies` - the
///   check then runs (so a broken transport surfaces before mutating) but
///   never short-circuits.
///
/// Query failures propagate as errors; they are never treated as absence.
pub fn select(
    transport: &dyn DeviceTransport,
    schema: &ResourceSchema,
    op: Operation,
    identity: &Identity<'_>,
) -> Result<Action> {
    // Config errors (unsupported operation) surface before any device I/O
    let verb = op.verb(schema)?;

    match op {
        Operation::Create => {
            if let Some(show) = &schema.show
                && existence::check(transport, schema, show, identity)?
            {
                return Ok(Action::Skip {
                    reason: skip_reason(schema, identity, true),
                });
            }
        }
        Operation::Delete => {
            if let Some(show) = &schema.show
                && !existence::check(transport, schema, show, identity)?
            {
                return Ok(Action::Skip {
                    reason: skip_reason(schema, identity, false),
                });
            }
        }
        Operation::Modify => {
            if schema.modify_verifies
                && let Some(show) = &schema.show
            {
                let exists = existence::check(transport, schema, show, identity)?;
                debug!("{}: pre-modify existence check: {}", schema.kind, exists);
            }
        }
    }

    Ok(Action::Execute { verb })
}

fn skip_reason(schema: &ResourceSchema, identity: &Identity<'_>, exists: bool) -> String {
    let state = if exists {
        "already exists"
    } else {
        "does not exist"
    };
    match schema.show.as_ref().and_then(|show| {
        identity
            .get(show.match_on)
            .map(|value| (show.match_on, value))
    }) {
        Some((field, value)) => {
            format!("{} with {} {} {}", schema.label, field, value, state)
        }
        None => format!("{} {}", schema.label, state),
    }
}
