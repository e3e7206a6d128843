//! Log command: walk the release chain, newest first

use std::path::Path;

use crate::core::error::StagelineResult;
use crate::ledger::Ledger;

/// Run the log command
pub fn run_log(file: &Path, json: bool) -> StagelineResult<()> {
  let ledger = Ledger::import(file)?;

  if json {
    println!("{}", serde_json::to_string_pretty(ledger.releases())?);
    return Ok(());
  }

  if ledger.is_empty() {
    println!("⚠️  The ledger is empty");
    return Ok(());
  }

  println!("\n📜 Release Ledger ({} releases, newest first)\n", ledger.len());

  println!("{:<10} {:<26} {:<17} {:<10} LINKS TO", "HASH", "RELEASE", "CREATED", "SERVICES");
  println!("{:-<80}", "");

  for release in ledger.releases() {
    let created = release
      .created_at
      .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
      .unwrap_or_else(|| "-".to_string());

    let link = if release.previous_block_hash.is_empty() {
      "genesis".to_string()
    } else {
      release.previous_block_hash.short().to_string()
    };

    let name = release.to_string();
    println!(
      "{:<10} {:<26} {:<17} {:<10} {}",
      release.block_hash.short(),
      name,
      created,
      release.versions.len(),
      link
    );
  }

  println!();
  Ok(())
}
