//! Clean command: remove every release of one stage

use std::path::Path;

use crate::core::error::StagelineResult;
use crate::ledger::{Ledger, ReleaseKind};

/// Run the clean command
pub fn run_clean(file: &Path, kind_code: &str) -> StagelineResult<()> {
  let kind: ReleaseKind = kind_code.parse()?;

  let mut ledger = Ledger::import(file)?;
  let removed = ledger.clean(kind);
  ledger.export(file)?;

  eprintln!("✅ removed {} {} release(s)", removed, kind);
  if ledger.validate().is_err() {
    eprintln!("⚠️  the remaining chain no longer verifies; clean never relinks history");
  }
  Ok(())
}
