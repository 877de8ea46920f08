//! # Reconcile
//!
//! A framework for declarative switch-configuration reconciliation.
//!
//! The engine turns a desired-state record for a named device resource into
//! at most one read-only existence query followed by at most one mutating
//! CLI command, and classifies the result into a structured outcome.
//!
//! ## Core Concepts
//!
//! - **ResourceSchema**: static description of one resource type (ordered
//!   attributes, boolean token pairs, enumerated choices, identity fields,
//!   verbs, existence query)
//! - **DesiredState / Identity**: caller input validated and ordered against
//!   a schema
//! - **DeviceTransport**: the process boundary that runs an argument vector
//!   against the device and returns exit status, stdout and stderr
//! - **Reconciler**: check-then-act orchestration producing an [`Outcome`]
//!
//! ## Example
//!
//! ```ignore
//! use reconcile::{AttrSpec, Operation, Reconciler, ResourceSchema, ShowQuery, Verbs};
//!
//! static ROLE: ResourceSchema = ResourceSchema {
//!     kind: "role",
//!     label: "Role",
//!     identity: &[AttrSpec::text("name", "name")],
//!     attrs: &[AttrSpec::choice("scope", "scope", &["local", "fabric"])],
//!     verbs: Verbs::full("role-create", "role-delete", "role-modify"),
//!     show: Some(ShowQuery::on("role-show", "name")),
//!     modify_verifies: false,
//! };
//!
//! let engine = Reconciler::new(&transport);
//! let outcome = engine.reconcile(&ROLE, Operation::Create, &identity, &desired)?;
//! assert!(outcome.changed || outcome.skipped);
//! ```
//!
//! One reconciliation is strictly sequential and holds no state between
//! invocations; the device itself is the only source of truth. Repeated runs
//! against an unchanged device converge to skipped no-ops.

pub mod engine;
pub mod error;
pub mod existence;
pub mod intent;
pub mod outcome;
pub mod render;
pub mod schema;
pub mod selector;
pub mod transport;

// Re-export main types at crate root
pub use engine::Reconciler;
pub use error::{Error, ErrorKind, Result};
pub use intent::{AttrMap, AttrValue, DesiredState, Identity, Operation};
pub use outcome::{Outcome, RunSummary, classify};
pub use render::RenderedCommand;
pub use schema::{AttrKind, AttrSpec, ResourceSchema, ShowQuery, Verbs};
pub use selector::Action;
pub use transport::{DeviceTransport, ExecOutput};
