//! Tests for `verify` and the import-time integrity guard

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_verify_accepts_an_intact_chain() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.2.0"])?;
  run_stageline(&ledger.path, &["publish", "alpha"])?;

  let output = run_stageline(&ledger.path, &["verify"])?;
  assert!(stdout(&output).contains("chain intact"));

  let output = run_stageline(&ledger.path, &["verify", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["valid"], true);
  assert_eq!(report["releases"], 2);
  assert!(report["head"].as_str().unwrap().len() == 64);

  Ok(())
}

#[test]
fn test_verify_accepts_an_empty_ledger() -> Result<()> {
  let ledger = TestLedger::initialized()?;

  let output = run_stageline(&ledger.path, &["verify"])?;
  assert!(stdout(&output).contains("0 release(s)"));

  Ok(())
}

#[test]
fn test_verify_detects_hand_edits() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.2.0"])?;

  // retag a sealed release without resealing it
  let file = ledger.read_file()?;
  ledger.write_file(&file.replace("v1.2.0", "v6.6.6"))?;

  let output = run_stageline_raw(&ledger.path, &["verify"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("corrupted"));
  assert!(stderr(&output).contains("trusted copy"), "should point at recovery");

  Ok(())
}

#[test]
fn test_verify_json_reports_the_failure() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.2.0"])?;

  let file = ledger.read_file()?;
  ledger.write_file(&file.replace("v1.2.0", "v6.6.6"))?;

  let output = run_stageline_raw(&ledger.path, &["verify", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["valid"], false);
  assert!(report["error"].as_str().unwrap().contains("corrupted"));

  Ok(())
}

#[test]
fn test_every_command_rejects_a_tampered_ledger() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.2.0"])?;

  let file = ledger.read_file()?;
  ledger.write_file(&file.replace("v1.2.0", "v6.6.6"))?;

  for args in [
    vec!["status"],
    vec!["log"],
    vec!["rollback"],
    vec!["publish", "alpha"],
    vec!["publish", "dev", "--service", "auth@v2.0.0"],
  ] {
    let output = run_stageline_raw(&ledger.path, &args)?;
    assert_eq!(output.status.code(), Some(3), "{:?} should refuse the file", args);
  }

  // a failed mutation must leave the file exactly as it was
  assert_eq!(ledger.read_file()?, file.replace("v1.2.0", "v6.6.6"));

  Ok(())
}

#[test]
fn test_verify_detects_a_truncated_chain() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.2.0"])?;
  run_stageline(&ledger.path, &["publish", "alpha"])?;

  // drop the genesis entry; the head now links to a missing block
  let file = ledger.read_file()?;
  let parsed: serde_json::Value = serde_json::from_str(&file)?;
  let truncated = serde_json::json!({ "releases": [parsed["releases"][0]] });
  ledger.write_file(&serde_json::to_string_pretty(&truncated)?)?;

  let output = run_stageline_raw(&ledger.path, &["verify"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("previous block hash"));

  Ok(())
}

#[test]
fn test_a_mangled_hash_value_is_still_a_validation_failure() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.2.0"])?;

  // a hand edit can replace the sealed hex with arbitrary multibyte text
  let file = ledger.read_file()?;
  let parsed: serde_json::Value = serde_json::from_str(&file)?;
  let sealed = parsed["releases"][0]["block_hash"].as_str().unwrap().to_string();
  ledger.write_file(&file.replace(&sealed, "ééééééé"))?;

  let output = run_stageline_raw(&ledger.path, &["log"])?;
  assert_eq!(output.status.code(), Some(3), "must report corruption, not abort");
  assert!(stderr(&output).contains("corrupted"));

  let output = run_stageline_raw(&ledger.path, &["verify"])?;
  assert_eq!(output.status.code(), Some(3));

  Ok(())
}

#[test]
fn test_verify_without_a_ledger_fails() -> Result<()> {
  let ledger = TestLedger::new()?;

  let output = run_stageline_raw(&ledger.path, &["verify"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("no ledger file"));

  Ok(())
}
