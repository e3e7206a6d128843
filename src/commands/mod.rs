//! CLI commands for stageline
//!
//! This module contains all user-facing command implementations:
//!
//! ## Setup
//! - **init**: Create a new, empty ledger file
//!
//! ## Inspection
//! - **status**: Show the latest release at each maturity stage
//! - **log**: Walk the full chain, newest first
//! - **show**: Inspect one release by full or short block hash
//! - **verify**: Check the hash chain of the persisted file
//!
//! ## Mutation
//! - **publish**: Create dev releases and promote them stage by stage
//! - **rollback**: Discard the most recent release
//! - **clean**: Remove every release of one stage
//!
//! Mutating commands import the ledger, apply one operation and export the
//! result; a command that fails leaves the file untouched. Human-facing
//! chatter goes to stderr. stdout carries only the data a pipeline consumes:
//! tables, `--json` documents, or the resulting tag for publish and rollback.

pub mod clean;
pub mod init;
pub mod log;
pub mod publish;
pub mod rollback;
pub mod show;
pub mod status;
pub mod verify;

pub use clean::run_clean;
pub use init::run_init;
pub use log::run_log;
pub use publish::{run_publish_dev, run_publish_promote};
pub use rollback::run_rollback;
pub use show::run_show;
pub use status::run_status;
pub use verify::run_verify;
