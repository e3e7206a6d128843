//! The release ledger: maturity stages, service snapshots and the
//! tamper-evident hash chain
//!
//! # Architecture
//!
//! - **kind**: the seven ordered maturity stages (dev through unsupported)
//! - **version_map**: service name to version snapshots with value semantics
//! - **release**: immutable release records, tag rewriting and block hashing
//! - **store**: the hash-linked chain itself plus its JSON file format
//!
//! # Core invariants
//!
//! 1. Releases enter the chain only through `Ledger::create_release`, which
//!    validates, stamps the timestamp, links the previous block hash and
//!    seals the block hash in a single step.
//! 2. The chain is ordered newest first and only ever grows at the head;
//!    rollback drops the head and nothing else.
//! 3. Every block hash covers the release with its own hash field blanked,
//!    so a sealed release can always be re-verified in place. Exactly one
//!    entry, the genesis release at the tail, has no previous link.
//! 4. Read accessors hand out owned copies; history cannot be edited
//!    through them.

pub mod kind;
pub mod release;
pub mod store;
pub mod version_map;

pub use kind::ReleaseKind;
pub use release::{BlockHash, Release};
pub use store::{DEFAULT_FILE_NAME, Ledger};
pub use version_map::VersionMap;
