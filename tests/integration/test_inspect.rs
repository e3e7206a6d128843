//! Tests for the read-only commands: `status`, `log` and `show`

use crate::helpers::*;
use anyhow::Result;

/// Seed a ledger with two dev releases promoted up to beta
fn seeded() -> Result<TestLedger> {
  let ledger = TestLedger::initialized()?;
  run_stageline(
    &ledger.path,
    &["publish", "dev", "--service", "auth@v1.2.0", "--service", "billing@v2.0.0"],
  )?;
  run_stageline(&ledger.path, &["publish", "alpha"])?;
  run_stageline(&ledger.path, &["publish", "beta"])?;
  Ok(ledger)
}

#[test]
fn test_status_lists_the_latest_release_per_stage() -> Result<()> {
  let ledger = seeded()?;

  let output = run_stageline(&ledger.path, &["status"])?;
  let text = stdout(&output);

  assert!(text.contains("Release Status"));
  assert!(text.contains("dev"));
  assert!(text.contains("v0.0.1-dev"));
  assert!(text.contains("alpha"));
  assert!(text.contains("beta"));
  assert!(!text.contains("unsupported"), "unsupported is never listed");

  Ok(())
}

#[test]
fn test_status_json_is_machine_readable() -> Result<()> {
  let ledger = seeded()?;

  let output = run_stageline(&ledger.path, &["status", "--json"])?;
  let rows: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  let stages: Vec<&str> =
    rows.as_array().unwrap().iter().map(|row| row["kind"].as_str().unwrap()).collect();
  assert_eq!(stages, vec!["dev", "alpha", "beta"]);

  Ok(())
}

#[test]
fn test_status_on_an_empty_ledger() -> Result<()> {
  let ledger = TestLedger::initialized()?;

  let output = run_stageline(&ledger.path, &["status"])?;
  assert!(stdout(&output).contains("No releases yet"));

  let output = run_stageline(&ledger.path, &["status", "--json"])?;
  assert_eq!(stdout(&output).trim(), "[]");

  Ok(())
}

#[test]
fn test_log_walks_the_chain_newest_first() -> Result<()> {
  let ledger = seeded()?;

  let output = run_stageline(&ledger.path, &["log"])?;
  let text = stdout(&output);

  assert!(text.contains("3 releases, newest first"));
  assert!(text.contains("genesis"), "the oldest entry should be marked genesis");

  let beta = text.find("beta@").unwrap();
  let dev = text.find("dev@").unwrap();
  assert!(beta < dev, "newest entries should print first:\n{}", text);

  Ok(())
}

#[test]
fn test_log_json_exposes_the_link_fields() -> Result<()> {
  let ledger = seeded()?;

  let output = run_stageline(&ledger.path, &["log", "--json"])?;
  let releases: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let releases = releases.as_array().unwrap();

  assert_eq!(releases.len(), 3);
  assert_eq!(releases[0]["previous_block_hash"], releases[1]["block_hash"]);
  assert_eq!(releases[1]["previous_block_hash"], releases[2]["block_hash"]);
  assert!(releases[2].get("previous_block_hash").is_none(), "genesis omits its previous link");

  Ok(())
}

#[test]
fn test_show_finds_a_release_by_either_hash_form() -> Result<()> {
  let ledger = seeded()?;

  let output = run_stageline(&ledger.path, &["log", "--json"])?;
  let releases: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let full_hash = releases[1]["block_hash"].as_str().unwrap().to_string();

  let by_full = run_stageline(&ledger.path, &["show", &full_hash])?;
  assert!(stdout(&by_full).contains("alpha@v0.0.1-alpha"));
  assert!(stdout(&by_full).contains("billing"));

  let by_short = run_stageline(&ledger.path, &["show", &full_hash[..9]])?;
  assert!(stdout(&by_short).contains("alpha@v0.0.1-alpha"));

  Ok(())
}

#[test]
fn test_show_service_prints_the_bare_version() -> Result<()> {
  let ledger = seeded()?;

  let output = run_stageline(&ledger.path, &["log", "--json"])?;
  let releases: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let head_hash = releases[0]["block_hash"].as_str().unwrap().to_string();

  let output = run_stageline(&ledger.path, &["show", &head_hash, "--service", "billing"])?;
  assert_eq!(stdout(&output).trim(), "v2.0.0");

  let output =
    run_stageline_raw(&ledger.path, &["show", &head_hash, "--service", "missing"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("no version found for service 'missing'"));

  Ok(())
}

#[test]
fn test_show_unknown_hash_fails_with_a_hint() -> Result<()> {
  let ledger = seeded()?;

  let output = run_stageline_raw(&ledger.path, &["show", "deadbeef0"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("no release found for hash 'deadbeef0'"));
  assert!(stderr(&output).contains("stageline log"), "should hint at log");

  Ok(())
}
