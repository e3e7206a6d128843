//! Verify command: full integrity check of the persisted chain

use std::path::Path;

use serde::Serialize;

use crate::core::error::StagelineResult;
use crate::ledger::Ledger;

/// Machine-readable verification report
#[derive(Debug, Serialize)]
struct VerifyReport {
  valid: bool,
  releases: usize,
  head: Option<String>,
  error: Option<String>,
}

/// Run the verify command.
/// Loads without the usual import-time check so a broken file still
/// produces a report instead of a bare load failure.
pub fn run_verify(file: &Path, json: bool) -> StagelineResult<()> {
  let ledger = Ledger::load_unverified(file)?;
  let outcome = ledger.validate();

  if json {
    let report = VerifyReport {
      valid: outcome.is_ok(),
      releases: ledger.len(),
      head: ledger.head().ok().map(|head| head.block_hash.as_str().to_string()),
      error: outcome.as_ref().err().map(|err| err.to_string()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    return outcome;
  }

  outcome?;
  println!("✅ ledger verified: {} release(s), chain intact", ledger.len());
  Ok(())
}
