//! Rollback command: discard the most recent release

use std::path::Path;

use crate::core::error::StagelineResult;
use crate::ledger::Ledger;

/// Run the rollback command
pub fn run_rollback(file: &Path) -> StagelineResult<()> {
  let mut ledger = Ledger::import(file)?;
  let dropped = ledger.rollback();
  ledger.export(file)?;

  let Some(dropped) = dropped else {
    eprintln!("⚠️  the ledger is empty; nothing to roll back");
    return Ok(());
  };

  match ledger.head() {
    Ok(head) => {
      eprintln!("✅ rolled back {}; head is now {} ({})", dropped, head, head.block_hash.short());
      print!("{}", head);
    }
    Err(_) => eprintln!("✅ rolled back {}; the ledger is now empty", dropped),
  }
  Ok(())
}
