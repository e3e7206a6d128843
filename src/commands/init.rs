//! Init command: create a new, empty ledger file

use std::path::Path;

use crate::core::error::{StagelineError, StagelineResult};
use crate::ledger::Ledger;

/// Run the init command
pub fn run_init(file: &Path, force: bool) -> StagelineResult<()> {
  if file.exists() && !force {
    return Err(StagelineError::with_help(
      format!("ledger file {} already exists", file.display()),
      "Pass --force to start over, or remove the file first.",
    ));
  }

  Ledger::new().export(file)?;
  eprintln!("✅ created empty ledger at {}", file.display());
  Ok(())
}
