//! Error types for stageline with contextual help and exit codes
//!
//! Every failure surfaces through [`StagelineError`], which groups the
//! conditions the ledger can raise: release validation, chain integrity,
//! lookups and stage navigation. Each error knows its process exit code
//! and can offer a next-step hint for the user.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::ledger::ReleaseKind;

/// Exit codes for stageline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad arguments, unknown lookups, stage boundaries)
  User = 1,
  /// System error (I/O, JSON)
  System = 2,
  /// Validation failure (release invariants, chain integrity)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for stageline
#[derive(Debug)]
pub enum StagelineError {
  /// A release violated one of its own invariants
  Validation(ValidationError),

  /// The hash chain of the ledger does not verify
  Chain(ChainError),

  /// A lookup came up empty
  NotFound(NotFoundError),

  /// Stage navigation ran past either end of the promotion order
  Promotion(PromotionError),

  /// I/O errors
  Io(io::Error),

  /// JSON (de)serialization errors
  Json(serde_json::Error),

  /// Generic error with an optional help hint
  Message { message: String, help: Option<String> },
}

impl StagelineError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    StagelineError::Message { message: msg.into(), help: None }
  }

  /// Create an error message with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    StagelineError::Message { message: msg.into(), help: Some(help.into()) }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      StagelineError::Validation(_) | StagelineError::Chain(_) => ExitCode::Validation,
      StagelineError::NotFound(_) | StagelineError::Promotion(_) => ExitCode::User,
      StagelineError::Io(_) | StagelineError::Json(_) => ExitCode::System,
      StagelineError::Message { .. } => ExitCode::User,
    }
  }

  /// Get the contextual help message for this error, if any
  pub fn help_message(&self) -> Option<String> {
    match self {
      StagelineError::Validation(e) => e.help_message(),
      StagelineError::Chain(_) => Some(
        "The ledger failed integrity verification and may have been edited by hand. \
         Restore the file from a trusted copy; stageline never repairs history."
          .to_string(),
      ),
      StagelineError::NotFound(e) => e.help_message(),
      StagelineError::Promotion(e) => e.help_message(),
      StagelineError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for StagelineError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StagelineError::Validation(e) => write!(f, "{}", e),
      StagelineError::Chain(e) => write!(f, "{}", e),
      StagelineError::NotFound(e) => write!(f, "{}", e),
      StagelineError::Promotion(e) => write!(f, "{}", e),
      StagelineError::Io(e) => write!(f, "I/O error: {}", e),
      StagelineError::Json(e) => write!(f, "JSON error: {}", e),
      StagelineError::Message { message, .. } => write!(f, "{}", message),
    }
  }
}

impl std::error::Error for StagelineError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      StagelineError::Io(e) => Some(e),
      StagelineError::Json(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for StagelineError {
  fn from(e: io::Error) -> Self {
    StagelineError::Io(e)
  }
}

impl From<serde_json::Error> for StagelineError {
  fn from(e: serde_json::Error) -> Self {
    StagelineError::Json(e)
  }
}

impl From<ValidationError> for StagelineError {
  fn from(e: ValidationError) -> Self {
    StagelineError::Validation(e)
  }
}

impl From<ChainError> for StagelineError {
  fn from(e: ChainError) -> Self {
    StagelineError::Chain(e)
  }
}

impl From<NotFoundError> for StagelineError {
  fn from(e: NotFoundError) -> Self {
    StagelineError::NotFound(e)
  }
}

impl From<PromotionError> for StagelineError {
  fn from(e: PromotionError) -> Self {
    StagelineError::Promotion(e)
  }
}

/// Release invariant violations
#[derive(Debug)]
pub enum ValidationError {
  /// A stage code did not parse
  KindUnknown { given: String },
  /// A release was constructed directly at a stage other than dev
  KindNotDev { kind: ReleaseKind },
  /// A tag is not a `v`-prefixed semantic version
  TagInvalid { tag: String, reason: String },
  /// A tag parsed but does not reproduce itself when rendered back
  TagNotCanonical { tag: String, canonical: String },
  /// A release carries no service versions
  NoServices,
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::KindUnknown { .. } => {
        Some("Valid stages: dev, alpha, beta, rc, ga, eol, unsupported.".to_string())
      }
      ValidationError::KindNotDev { .. } => Some(
        "New releases always start at dev; later stages are reached by promotion.".to_string(),
      ),
      ValidationError::TagInvalid { .. } | ValidationError::TagNotCanonical { .. } => Some(
        "Tags are a 'v' followed by a canonical semantic version, e.g. v1.4.0-beta.".to_string(),
      ),
      ValidationError::NoServices => {
        Some("Pass at least one --service <name@version>.".to_string())
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::KindUnknown { given } => {
        write!(
          f,
          "release kind '{}' is invalid (expected dev, alpha, beta, rc, ga, eol or unsupported)",
          given
        )
      }
      ValidationError::KindNotDev { kind } => {
        write!(f, "new releases must start at the dev stage, not '{}'", kind)
      }
      ValidationError::TagInvalid { tag, reason } => {
        write!(f, "release tag '{}' is not a valid version tag: {}", tag, reason)
      }
      ValidationError::TagNotCanonical { tag, canonical } => {
        write!(f, "release tag '{}' does not match its canonical form '{}'", tag, canonical)
      }
      ValidationError::NoServices => {
        write!(f, "release has no service versions; at least one active service is required")
      }
    }
  }
}

/// Hash-chain integrity violations, reported against short hashes
#[derive(Debug)]
pub enum ChainError {
  /// A stored block hash does not match the recomputed content hash
  HashMismatch { short: String, computed: String },
  /// A previous-block link does not point at the next older release
  LinkMismatch { newer: String, expected: String, found: String },
  /// The oldest release records a previous block it cannot have
  GenesisHasPrevious { short: String },
  /// A non-genesis release is missing its previous-block link
  MissingPrevious { short: String },
}

impl fmt::Display for ChainError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChainError::HashMismatch { short, computed } => {
        write!(
          f,
          "release {} is corrupted: stored block hash does not match recomputed hash {}",
          short, computed
        )
      }
      ChainError::LinkMismatch { newer, expected, found } => {
        write!(
          f,
          "release {} records previous block {}, but the next older release is {}",
          newer, found, expected
        )
      }
      ChainError::GenesisHasPrevious { short } => {
        write!(f, "genesis release {} must not record a previous block hash", short)
      }
      ChainError::MissingPrevious { short } => {
        write!(
          f,
          "release {} has no previous block hash; only the genesis release may omit it",
          short
        )
      }
    }
  }
}

/// Lookup failures
#[derive(Debug)]
pub enum NotFoundError {
  /// No ledger file exists at the given path
  Ledger { path: PathBuf },
  /// The ledger holds no releases at all
  NoReleases,
  /// No release matches the given full or short hash
  Release { query: String },
  /// A service has no recorded version
  Service { service: String },
}

impl NotFoundError {
  fn help_message(&self) -> Option<String> {
    match self {
      NotFoundError::Ledger { .. } => Some("Run `stageline init` to create it.".to_string()),
      NotFoundError::NoReleases => Some(
        "Create the first release with `stageline publish dev --service <name@version>`."
          .to_string(),
      ),
      NotFoundError::Release { .. } => {
        Some("Run `stageline log` to list releases and their hashes.".to_string())
      }
      NotFoundError::Service { .. } => None,
    }
  }
}

impl fmt::Display for NotFoundError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NotFoundError::Ledger { path } => {
        write!(f, "no ledger file found at {}", path.display())
      }
      NotFoundError::NoReleases => write!(f, "the ledger has no releases"),
      NotFoundError::Release { query } => write!(f, "no release found for hash '{}'", query),
      NotFoundError::Service { service } => {
        write!(f, "no version found for service '{}'", service)
      }
    }
  }
}

/// Stage navigation past either end of the promotion order
#[derive(Debug)]
pub enum PromotionError {
  /// The final stage has no successor
  TerminalStage { kind: ReleaseKind },
  /// The first stage has no predecessor
  EntryStage { kind: ReleaseKind },
}

impl PromotionError {
  fn help_message(&self) -> Option<String> {
    match self {
      PromotionError::TerminalStage { .. } => None,
      PromotionError::EntryStage { .. } => Some(
        "dev releases are not promoted into; create one with `stageline publish dev`.".to_string(),
      ),
    }
  }
}

impl fmt::Display for PromotionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PromotionError::TerminalStage { kind } => {
        write!(f, "'{}' is the final stage; there is nothing to promote to", kind)
      }
      PromotionError::EntryStage { kind } => {
        write!(f, "'{}' is the first stage; it has no predecessor", kind)
      }
    }
  }
}

/// Print an error to stderr with appropriate formatting
pub fn print_error(error: &StagelineError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

/// Convenience result type
pub type StagelineResult<T> = Result<T, StagelineError>;
