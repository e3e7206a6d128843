//! Show command: inspect a single release by hash

use std::path::Path;

use crate::core::error::{StagelineError, StagelineResult};
use crate::ledger::Ledger;

/// Run the show command.
/// With `--service`, prints only that service's version, for scripting.
pub fn run_show(
  file: &Path,
  hash: &str,
  service: Option<&str>,
  json: bool,
) -> StagelineResult<()> {
  let query = hash.trim();
  if query.is_empty() {
    return Err(StagelineError::message("hash must not be empty"));
  }

  let ledger = Ledger::import(file)?;
  let release = ledger.get_release(query)?;

  if let Some(service) = service {
    let version = release.versions.get(service)?;
    println!("{}", version);
    return Ok(());
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&release)?);
    return Ok(());
  }

  println!("\n📦 {}\n", release);
  println!("  Stage:     {}", release.kind);
  println!("  Tag:       {}", release.tag);
  if let Some(created) = release.created_at {
    println!("  Created:   {}", created.to_rfc3339());
  }
  println!("  Block:     {}", release.block_hash);
  if release.previous_block_hash.is_empty() {
    println!("  Previous:  (genesis)");
  } else {
    println!("  Previous:  {}", release.previous_block_hash);
  }

  println!("\n  Services:");
  for (name, version) in release.versions.iter() {
    println!("    {:<24} {}", name, version);
  }
  println!();

  Ok(())
}
