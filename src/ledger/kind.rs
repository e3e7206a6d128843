//! Release maturity stages and their promotion order

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{PromotionError, StagelineError, StagelineResult, ValidationError};

/// One of the seven maturity stages a release moves through.
///
/// The declaration order is the promotion order: dev first, unsupported
/// last. Stages persist and parse as their lowercase codes, case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
  Dev,
  Alpha,
  Beta,
  Rc,
  Ga,
  Eol,
  Unsupported,
}

impl ReleaseKind {
  /// Every stage, in promotion order.
  pub const ALL: [ReleaseKind; 7] = [
    ReleaseKind::Dev,
    ReleaseKind::Alpha,
    ReleaseKind::Beta,
    ReleaseKind::Rc,
    ReleaseKind::Ga,
    ReleaseKind::Eol,
    ReleaseKind::Unsupported,
  ];

  fn index(self) -> usize {
    match self {
      ReleaseKind::Dev => 0,
      ReleaseKind::Alpha => 1,
      ReleaseKind::Beta => 2,
      ReleaseKind::Rc => 3,
      ReleaseKind::Ga => 4,
      ReleaseKind::Eol => 5,
      ReleaseKind::Unsupported => 6,
    }
  }

  /// The next stage in promotion order.
  /// Fails for the final stage, which has no successor.
  pub fn next(self) -> StagelineResult<ReleaseKind> {
    Self::ALL
      .get(self.index() + 1)
      .copied()
      .ok_or(StagelineError::Promotion(PromotionError::TerminalStage { kind: self }))
  }

  /// The stage before this one in promotion order.
  /// Fails for the first stage, which has no predecessor.
  pub fn prev(self) -> StagelineResult<ReleaseKind> {
    self
      .index()
      .checked_sub(1)
      .and_then(|i| Self::ALL.get(i))
      .copied()
      .ok_or(StagelineError::Promotion(PromotionError::EntryStage { kind: self }))
  }

  /// Canonical lowercase code, as written in the ledger file.
  pub fn code(self) -> &'static str {
    match self {
      ReleaseKind::Dev => "dev",
      ReleaseKind::Alpha => "alpha",
      ReleaseKind::Beta => "beta",
      ReleaseKind::Rc => "rc",
      ReleaseKind::Ga => "ga",
      ReleaseKind::Eol => "eol",
      ReleaseKind::Unsupported => "unsupported",
    }
  }

  /// Prerelease label a tag carries at this stage.
  /// Identical to the code everywhere except ga, which releases without a
  /// prerelease segment.
  pub fn label(self) -> &'static str {
    match self {
      ReleaseKind::Ga => "",
      other => other.code(),
    }
  }
}

impl fmt::Display for ReleaseKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.code())
  }
}

impl FromStr for ReleaseKind {
  type Err = StagelineError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "dev" => Ok(ReleaseKind::Dev),
      "alpha" => Ok(ReleaseKind::Alpha),
      "beta" => Ok(ReleaseKind::Beta),
      "rc" => Ok(ReleaseKind::Rc),
      "ga" => Ok(ReleaseKind::Ga),
      "eol" => Ok(ReleaseKind::Eol),
      "unsupported" => Ok(ReleaseKind::Unsupported),
      other => Err(StagelineError::Validation(ValidationError::KindUnknown {
        given: other.to_string(),
      })),
    }
  }
}
