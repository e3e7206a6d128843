//! The hash-linked ledger of releases and its file format

use std::fs;
use std::io;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::error::{ChainError, NotFoundError, StagelineError, StagelineResult};
use crate::ledger::kind::ReleaseKind;
use crate::ledger::release::{BlockHash, Release};
use crate::ledger::version_map::VersionMap;

/// Default name of the persisted ledger file
pub const DEFAULT_FILE_NAME: &str = "stageline.json";

/// Append-only, hash-linked sequence of releases, newest first.
///
/// Releases enter the chain only through [`Ledger::create_release`], which
/// stamps the timestamp, links the previous block hash and seals the block
/// hash in one step. Entries are immutable once linked; every read accessor
/// hands out owned copies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  releases: Vec<Release>,
}

impl Ledger {
  /// Create a new, empty ledger
  pub fn new() -> Self {
    Self::default()
  }

  /// All releases, newest first
  pub fn releases(&self) -> &[Release] {
    &self.releases
  }

  /// Number of releases in the chain
  pub fn len(&self) -> usize {
    self.releases.len()
  }

  pub fn is_empty(&self) -> bool {
    self.releases.is_empty()
  }

  /// Validate and link a release into the chain as the new head.
  ///
  /// Stamps `created_at`, records the current head's block hash as
  /// `previous_block_hash` (unset for the genesis release) and seals the
  /// release's own block hash. This is the only path into the chain; any
  /// hash or timestamp the release arrived with is overwritten.
  pub fn create_release(&mut self, mut release: Release) -> StagelineResult<()> {
    release.validate()?;
    release.created_at = Some(Utc::now());
    release.previous_block_hash = match self.releases.first() {
      Some(head) => head.block_hash.clone(),
      None => BlockHash::default(),
    };
    release.block_hash = release.hash()?;
    self.releases.insert(0, release);
    Ok(())
  }

  /// The most recent release of `kind`, as an owned copy.
  ///
  /// When no release of that kind exists, returns a `v0.0.0` placeholder
  /// with no services. The placeholder is not part of the chain, and its
  /// empty service set keeps it from ever passing validation, so an
  /// unpopulated stage cannot be promoted.
  pub fn latest(&self, kind: ReleaseKind) -> Release {
    self
      .releases
      .iter()
      .find(|release| release.kind == kind)
      .cloned()
      .unwrap_or_else(|| placeholder(kind))
  }

  /// Promote the latest release of `from` to the next stage and link the
  /// result in as the new head.
  pub fn promote(&mut self, from: ReleaseKind) -> StagelineResult<()> {
    let promoted = self.latest(from).promote()?;
    self.create_release(promoted)
  }

  /// Promote into `to` from its predecessor stage.
  /// Fails for dev, which is only ever created directly.
  pub fn promote_to(&mut self, to: ReleaseKind) -> StagelineResult<()> {
    self.promote(to.prev()?)
  }

  /// Drop the head release, whatever its stage, and return it.
  /// Returns `None` on an empty ledger. The new head already links further
  /// back, so the remaining chain needs no rework.
  pub fn rollback(&mut self) -> Option<Release> {
    if self.releases.is_empty() {
      return None;
    }
    Some(self.releases.remove(0))
  }

  /// Copy of the most recently created release, regardless of stage
  pub fn head(&self) -> StagelineResult<Release> {
    self
      .releases
      .first()
      .cloned()
      .ok_or(StagelineError::NotFound(NotFoundError::NoReleases))
  }

  /// Look up a release by its full block hash or its 9-character short
  /// form, scanning newest to oldest. Short hashes carry no uniqueness
  /// guarantee; the first match wins. Returns an owned copy.
  pub fn get_release(&self, query: &str) -> StagelineResult<Release> {
    self
      .releases
      .iter()
      .find(|release| {
        release.block_hash.as_str() == query || release.block_hash.short() == query
      })
      .cloned()
      .ok_or_else(|| {
        StagelineError::NotFound(NotFoundError::Release { query: query.to_string() })
      })
  }

  /// Remove every release of `kind`, returning how many were dropped.
  ///
  /// Filters into the surviving sequence, so consecutive matches cannot
  /// slip through. Performs no relinking: removing entries that sit
  /// mid-chain leaves a ledger that no longer passes [`Ledger::validate`].
  pub fn clean(&mut self, kind: ReleaseKind) -> usize {
    let before = self.releases.len();
    self.releases.retain(|release| release.kind != kind);
    before - self.releases.len()
  }

  /// Verify the whole chain, newest to oldest.
  ///
  /// Every release must satisfy its own invariants, its sealed block hash
  /// must match the recomputed content hash, and each entry's previous
  /// link must equal the block hash of the release below it. Only the
  /// genesis entry may omit its previous link. The first violation aborts
  /// the walk; this is the sole tamper and truncation detector for the
  /// persisted file.
  pub fn validate(&self) -> StagelineResult<()> {
    for (i, release) in self.releases.iter().enumerate() {
      release.validate()?;

      let computed = release.hash()?;
      if !computed.matches(&release.block_hash) {
        return Err(StagelineError::Chain(ChainError::HashMismatch {
          short: release.block_hash.short().to_string(),
          computed: computed.as_str().to_string(),
        }));
      }

      match self.releases.get(i + 1) {
        Some(older) => {
          if release.previous_block_hash.is_empty() {
            return Err(StagelineError::Chain(ChainError::MissingPrevious {
              short: release.block_hash.short().to_string(),
            }));
          }
          if !release.previous_block_hash.matches(&older.block_hash) {
            return Err(StagelineError::Chain(ChainError::LinkMismatch {
              newer: release.block_hash.short().to_string(),
              expected: older.block_hash.short().to_string(),
              found: release.previous_block_hash.short().to_string(),
            }));
          }
        }
        None => {
          if !release.previous_block_hash.is_empty() {
            return Err(StagelineError::Chain(ChainError::GenesisHasPrevious {
              short: release.block_hash.short().to_string(),
            }));
          }
        }
      }
    }
    Ok(())
  }

  /// Serialize newest-first to indented JSON
  pub fn to_json(&self) -> StagelineResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Deserialize from JSON without verifying the chain
  pub fn from_json(json: &str) -> StagelineResult<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Write the ledger to `path` as indented JSON
  pub fn export(&self, path: &Path) -> StagelineResult<()> {
    let json = self.to_json()?;
    fs::write(path, json)?;
    Ok(())
  }

  /// Load the ledger from `path` and verify the whole chain. A corrupted
  /// or hand-edited file is rejected outright, never partially repaired.
  pub fn import(path: &Path) -> StagelineResult<Self> {
    let ledger = Self::load_unverified(path)?;
    ledger.validate()?;
    Ok(ledger)
  }

  /// Load the ledger from `path` without verifying the chain, so callers
  /// can report on files [`Ledger::import`] would reject.
  pub fn load_unverified(path: &Path) -> StagelineResult<Self> {
    let json = match fs::read_to_string(path) {
      Ok(json) => json,
      Err(err) if err.kind() == io::ErrorKind::NotFound => {
        return Err(StagelineError::NotFound(NotFoundError::Ledger {
          path: path.to_path_buf(),
        }));
      }
      Err(err) => return Err(err.into()),
    };
    Self::from_json(&json)
  }
}

/// Stand-in for "no release of this kind yet"; never inserted
fn placeholder(kind: ReleaseKind) -> Release {
  Release {
    kind,
    tag: "v0.0.0".to_string(),
    versions: VersionMap::new(),
    created_at: None,
    block_hash: BlockHash::default(),
    previous_block_hash: BlockHash::default(),
  }
}
