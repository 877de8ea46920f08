//! # nvoskit
//!
//! The Netvisor device layer: a management-CLI session implementing the
//! reconciliation engine's transport boundary, and the catalog of resource
//! schemas for the configuration entities the CLI manages (roles, users,
//! SNMP entities, access lists, port and STP settings, admin services).
//!
//! The session shells out to the management CLI binary with a fixed prefix
//! (`--quiet`, plus `switch <name>` when targeting a fabric member) and
//! returns raw exit status and text output; all interpretation happens in
//! the `reconcile` crate.

pub mod backend;
pub mod catalog;

pub use backend::{CliSession, DEFAULT_CLI_PATH};
