//! Release records and their block hashes

use std::fmt;

use chrono::{DateTime, Utc};
use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::error::{StagelineError, StagelineResult, ValidationError};
use crate::ledger::kind::ReleaseKind;
use crate::ledger::version_map::VersionMap;

/// Content digest of a release (SHA-256, lowercase hex)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHash(String);

impl BlockHash {
  /// Digest arbitrary bytes into a block hash.
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    BlockHash(format!("{:x}", hasher.finalize()))
  }

  /// First 9 hex characters for display. Returns the empty string when the
  /// hash is under 10 characters, so blank hashes never render a stub. A
  /// hand-edited hash field can hold arbitrary text, so the cut falls back
  /// to empty instead of splitting inside a multibyte character.
  pub fn short(&self) -> &str {
    if self.0.len() < 10 {
      return "";
    }
    self.0.get(..9).unwrap_or("")
  }

  /// Exact equality with another hash
  pub fn matches(&self, other: &BlockHash) -> bool {
    self == other
  }

  /// True for the unset value
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for BlockHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(&self.0)
  }
}

/// One snapshot of the service set at a maturity stage.
///
/// `created_at`, `block_hash` and `previous_block_hash` stay unset until
/// the ledger links the release into its chain; a release never stamps or
/// hashes itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
  pub kind: ReleaseKind,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub tag: String,
  #[serde(default, skip_serializing_if = "VersionMap::is_empty")]
  pub versions: VersionMap,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "BlockHash::is_empty")]
  pub block_hash: BlockHash,
  #[serde(default, skip_serializing_if = "BlockHash::is_empty")]
  pub previous_block_hash: BlockHash,
}

impl Release {
  /// Start a new release line at the dev stage.
  /// Any other `kind` is rejected; later stages are only reachable through
  /// [`Release::promote`].
  pub fn new(
    kind: ReleaseKind,
    tag: impl Into<String>,
    versions: VersionMap,
  ) -> StagelineResult<Self> {
    if kind != ReleaseKind::Dev {
      return Err(StagelineError::Validation(ValidationError::KindNotDev { kind }));
    }
    Ok(Release {
      kind,
      tag: tag.into(),
      versions,
      created_at: None,
      block_hash: BlockHash::default(),
      previous_block_hash: BlockHash::default(),
    })
  }

  /// Check the invariants a release must satisfy before entering the
  /// ledger: a canonical `v`-prefixed semver tag and at least one service
  /// version. Stage validity needs no check here; invalid codes never get
  /// past parsing.
  pub fn validate(&self) -> StagelineResult<()> {
    parse_tag(&self.tag)?;
    if self.versions.is_empty() {
      return Err(StagelineError::Validation(ValidationError::NoServices));
    }
    Ok(())
  }

  /// Derive the release for the next stage. Pure tag rewriting:
  /// the prerelease segment becomes the next stage's label (none for ga)
  /// and any build metadata is dropped. The service set carries over
  /// unchanged; hash and timestamp fields come back unset for the ledger
  /// to fill.
  pub fn promote(&self) -> StagelineResult<Release> {
    let next = self.kind.next()?;
    let mut version = parse_tag(&self.tag)?;
    version.pre = prerelease(next.label())?;
    version.build = BuildMetadata::EMPTY;
    Ok(Release {
      kind: next,
      tag: format!("v{}", version),
      versions: self.versions.clone(),
      created_at: None,
      block_hash: BlockHash::default(),
      previous_block_hash: BlockHash::default(),
    })
  }

  /// Deterministic content hash: the release with `block_hash` blanked,
  /// serialized to compact JSON (fixed field order, sorted service keys),
  /// digested with SHA-256.
  pub fn hash(&self) -> StagelineResult<BlockHash> {
    let mut scrubbed = self.clone();
    scrubbed.block_hash = BlockHash::default();
    let bytes = serde_json::to_vec(&scrubbed)?;
    Ok(BlockHash::from_contents(&bytes))
  }
}

impl fmt::Display for Release {
  /// Renders as `kind@tag`, e.g. `alpha@v1.2.0-alpha`
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}@{}", self.kind, self.tag)
  }
}

/// Parse a `v`-prefixed tag into a semver version, rejecting any
/// non-canonical spelling: rendering the parsed version back must
/// reproduce the tag exactly.
pub fn parse_tag(tag: &str) -> StagelineResult<Version> {
  let bare = tag.strip_prefix('v').ok_or_else(|| {
    StagelineError::Validation(ValidationError::TagInvalid {
      tag: tag.to_string(),
      reason: "missing 'v' prefix".to_string(),
    })
  })?;
  let version = Version::parse(bare).map_err(|err| {
    StagelineError::Validation(ValidationError::TagInvalid {
      tag: tag.to_string(),
      reason: err.to_string(),
    })
  })?;
  let canonical = format!("v{}", version);
  if canonical != tag {
    return Err(StagelineError::Validation(ValidationError::TagNotCanonical {
      tag: tag.to_string(),
      canonical,
    }));
  }
  Ok(version)
}

fn prerelease(label: &str) -> StagelineResult<Prerelease> {
  if label.is_empty() {
    return Ok(Prerelease::EMPTY);
  }
  Prerelease::new(label).map_err(|err| {
    StagelineError::Validation(ValidationError::TagInvalid {
      tag: label.to_string(),
      reason: err.to_string(),
    })
  })
}
