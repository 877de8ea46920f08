//! Command rendering - desired state to argument vector
//!
//! Rendering is pure and deterministic: the same verb, identity and desired
//! state always produce the same token sequence. The output is an argv from
//! the start; it is never joined into a shell string and re-split, so values
//! with embedded whitespace survive intact.

use std::fmt;

use crate::intent::{AttrValue, DesiredState, Identity};
use crate::schema::AttrKind;

/// Replacement for sensitive values in audit and log output.
pub const MASK: &str = "********";

/// An ordered command token sequence with a sensitivity mask.
///
/// `args()` is what the transport executes; `audit()` is the loggable
/// rendition with sensitive values masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    args: Vec<String>,
    masked: Vec<bool>,
}

impl RenderedCommand {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            masked: Vec::new(),
        }
    }

    fn push(&mut self, token: impl Into<String>) {
        self.args.push(token.into());
        self.masked.push(false);
    }

    fn push_sensitive(&mut self, token: impl Into<String>) {
        self.args.push(token.into());
        self.masked.push(true);
    }

    /// The argument vector to execute.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Space-joined command for logs and outcome records, with sensitive
    /// values masked.
    pub fn audit(&self) -> String {
        self.args
            .iter()
            .zip(&self.masked)
            .map(|(arg, masked)| if *masked { MASK } else { arg.as_str() })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for RenderedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.audit())
    }
}

/// Render a mutating command: verb, then identity pairs, then desired
/// attributes, all in schema declaration order.
pub fn render(
    verb: &str,
    identity: &Identity<'_>,
    desired: &DesiredState<'_>,
) -> RenderedCommand {
    let mut cmd = RenderedCommand::new();
    cmd.push(verb);

    for (spec, value) in identity.pairs() {
        match spec.kind {
            AttrKind::Choice { token, .. } | AttrKind::Text { token, .. } => {
                cmd.push(token);
                if spec.is_sensitive() {
                    cmd.push_sensitive(value.clone());
                } else {
                    cmd.push(value.clone());
                }
            }
            // Schema validation rejects flag identities
            AttrKind::Flag { .. } => {}
        }
    }

    for (spec, value) in desired.pairs() {
        match (&spec.kind, value) {
            (AttrKind::Flag { on, off }, AttrValue::Bool(v)) => {
                cmd.push(if *v { *on } else { *off });
            }
            (AttrKind::Choice { token, .. }, AttrValue::Str(v))
            | (AttrKind::Text { token, .. }, AttrValue::Str(v)) => {
                cmd.push(*token);
                if spec.is_sensitive() {
                    cmd.push_sensitive(v.clone());
                } else {
                    cmd.push(v.clone());
                }
            }
            // Resolution enforces value shapes
            _ => {}
        }
    }

    cmd
}
