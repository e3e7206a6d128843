//! Tests for the `rollback` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_rollback_restores_the_previous_head() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.2.0"])?;
  run_stageline(&ledger.path, &["publish", "alpha"])?;

  let output = run_stageline(&ledger.path, &["rollback"])?;

  assert_eq!(stdout(&output), "dev@v0.0.1-dev");
  assert!(stderr(&output).contains("rolled back alpha@v0.0.1-alpha"));

  // the surviving chain still verifies
  run_stageline(&ledger.path, &["verify"])?;

  Ok(())
}

#[test]
fn test_rollback_ignores_the_stage() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.0.0"])?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.0.1"])?;

  // rollback drops the head even when older releases share its stage
  let output = run_stageline(&ledger.path, &["rollback"])?;
  assert_eq!(stdout(&output), "dev@v0.0.1-dev");

  Ok(())
}

#[test]
fn test_rollback_to_an_empty_ledger() -> Result<()> {
  let ledger = TestLedger::initialized()?;
  run_stageline(&ledger.path, &["publish", "dev", "--service", "auth@v1.0.0"])?;

  let output = run_stageline(&ledger.path, &["rollback"])?;
  assert!(stderr(&output).contains("the ledger is now empty"));
  assert_eq!(ledger.read_file()?, "{}");

  // a second rollback has nothing to do but still succeeds
  let output = run_stageline(&ledger.path, &["rollback"])?;
  assert!(stderr(&output).contains("nothing to roll back"));

  Ok(())
}
