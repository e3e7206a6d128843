//! Service version snapshots carried by each release

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{NotFoundError, StagelineError, StagelineResult};

/// Maps service names to the version each one runs at.
///
/// Names and versions are lower-cased on insert so the persisted file stays
/// consistent regardless of caller casing. The sorted key order of the
/// underlying map keeps release hashing deterministic. Cloning yields a
/// fully independent map, so ledger history can never be edited through a
/// handed-out copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionMap(BTreeMap<String, String>);

impl VersionMap {
  /// Create an empty map
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or overwrite the version for a service, lower-casing both.
  pub fn set(&mut self, service: &str, version: &str) {
    self.0.insert(service.to_lowercase(), version.to_lowercase());
  }

  /// Look up the version for a service.
  /// Fails when the service is absent or its recorded version is empty.
  pub fn get(&self, service: &str) -> StagelineResult<&str> {
    match self.0.get(service) {
      Some(version) if !version.is_empty() => Ok(version),
      _ => Err(StagelineError::NotFound(NotFoundError::Service {
        service: service.to_string(),
      })),
    }
  }

  /// Remove a service; a no-op when it is absent.
  pub fn remove(&mut self, service: &str) {
    self.0.remove(service);
  }

  /// Number of services in the map
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Iterate entries in sorted service order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}
