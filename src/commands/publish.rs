//! Publish commands: create dev releases and promote them stage by stage

use std::path::Path;

use semver::{Prerelease, Version};

use crate::core::error::{StagelineError, StagelineResult};
use crate::ledger::release::parse_tag;
use crate::ledger::{Ledger, Release, ReleaseKind, VersionMap};

/// Which version component a new dev release bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bump {
  Major,
  Minor,
  Patch,
}

impl Bump {
  /// Major wins over minor; patch is the default and needs no flag.
  pub fn from_flags(major: bool, minor: bool, _patch: bool) -> Self {
    if major {
      Bump::Major
    } else if minor {
      Bump::Minor
    } else {
      Bump::Patch
    }
  }
}

/// Run `publish dev`: start the next release line at the dev stage.
///
/// The service set starts from the release named by `--from` (hash) or
/// `--from-kind` (latest of a stage) when given, otherwise from nothing.
/// `--service` pins are overlaid on top and `--without-service` names are
/// dropped; the result must leave at least one service standing.
pub fn run_publish_dev(
  file: &Path,
  services: &[String],
  without_services: &[String],
  from: Option<&str>,
  from_kind: Option<&str>,
  bump: Bump,
) -> StagelineResult<()> {
  let mut ledger = Ledger::import(file)?;

  let mut overlay = VersionMap::new();
  for raw in services {
    let (service, version) = split_service(raw)?;
    overlay.set(service, version);
  }

  let current = parse_tag(&ledger.latest(ReleaseKind::Dev).tag)?;
  let next_tag = next_dev_tag(&current, bump)?;

  let source = match (from, from_kind) {
    (Some(hash), _) => Some(ledger.get_release(hash.trim())?),
    (None, Some(code)) => Some(ledger.latest(code.parse::<ReleaseKind>()?)),
    (None, None) => None,
  };

  let mut versions = match source {
    Some(source) => source.versions,
    None => VersionMap::new(),
  };
  for (service, version) in overlay.iter() {
    versions.set(service, version);
  }
  for service in without_services {
    versions.remove(&service.trim().to_lowercase());
  }

  ledger.create_release(Release::new(ReleaseKind::Dev, next_tag, versions)?)?;
  ledger.export(file)?;

  let head = ledger.latest(ReleaseKind::Dev);
  eprintln!("✅ dev release created: {} ({})", head.tag, head.block_hash.short());
  print!("{}", head.tag);
  Ok(())
}

/// Run `publish <stage>`: promote the latest release of the predecessor
/// stage into `to` and report both ends of the move.
pub fn run_publish_promote(file: &Path, to: ReleaseKind) -> StagelineResult<()> {
  let mut ledger = Ledger::import(file)?;
  ledger.promote_to(to)?;
  ledger.export(file)?;

  let source = ledger.latest(to.prev()?);
  let target = ledger.latest(to);
  eprintln!(
    "✅ promoted {} ({}) to {} ({})",
    source,
    source.block_hash.short(),
    target,
    target.block_hash.short()
  );
  print!("{}", target);
  Ok(())
}

/// Split a `name@version` argument into its two halves
fn split_service(raw: &str) -> StagelineResult<(&str, &str)> {
  let trimmed = raw.trim();
  match trimmed.split_once('@') {
    Some((service, version)) if !service.is_empty() && !version.is_empty() => {
      Ok((service, version))
    }
    _ => Err(StagelineError::with_help(
      format!("invalid service '{}'", trimmed),
      "Services are passed as <name@version>, e.g. --service billing@v2.1.0.",
    )),
  }
}

/// Next dev tag derived from the latest dev version.
///
/// Major and minor bumps increment their component and zero the ones below.
/// A patch bump only increments when the current version has no prerelease
/// segment; otherwise it just sheds the segment, so republishing dev on top
/// of `v1.2.3-dev` stays at `v1.2.3-dev` instead of skipping to `v1.2.4`.
fn next_dev_tag(current: &Version, bump: Bump) -> StagelineResult<String> {
  let mut next = match bump {
    Bump::Major => Version::new(current.major + 1, 0, 0),
    Bump::Minor => Version::new(current.major, current.minor + 1, 0),
    Bump::Patch if current.pre.is_empty() => {
      Version::new(current.major, current.minor, current.patch + 1)
    }
    Bump::Patch => Version::new(current.major, current.minor, current.patch),
  };
  next.pre = Prerelease::new(ReleaseKind::Dev.label())
    .map_err(|err| StagelineError::message(format!("could not set the dev prerelease: {}", err)))?;
  Ok(format!("v{}", next))
}
