//! Backend for talking to the Netvisor management CLI.

mod cli;

pub use cli::{CliSession, DEFAULT_CLI_PATH};
