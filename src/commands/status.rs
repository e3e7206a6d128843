//! Status command: the latest release at each maturity stage

use std::path::Path;

use crate::core::error::StagelineResult;
use crate::ledger::{Ledger, Release, ReleaseKind};

/// Run the status command
pub fn run_status(file: &Path, json: bool) -> StagelineResult<()> {
  let ledger = Ledger::import(file)?;

  // dev through eol; unsupported is never listed
  let mut rows: Vec<Release> = Vec::new();
  for kind in ReleaseKind::ALL {
    if kind == ReleaseKind::Unsupported {
      continue;
    }
    let latest = ledger.latest(kind);
    if !latest.versions.is_empty() {
      rows.push(latest);
    }
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&rows)?);
    return Ok(());
  }

  if rows.is_empty() {
    println!("⚠️  No releases yet");
    println!("   Create one with: stageline publish dev --service <name@version>");
    return Ok(());
  }

  print_status_table(&rows);
  Ok(())
}

/// Print the latest release per stage as a formatted table
fn print_status_table(rows: &[Release]) {
  println!("\n📊 Release Status\n");

  println!("{:<12} {:<28} {:<10} CREATED", "STAGE", "TAG", "HASH");
  println!("{:-<70}", "");

  for release in rows {
    let created = release
      .created_at
      .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
      .unwrap_or_else(|| "-".to_string());

    println!(
      "{:<12} {:<28} {:<10} {}",
      release.kind.code(),
      release.tag,
      release.block_hash.short(),
      created
    );
  }

  println!();
}
