//! One-time hart capability discovery.
//!
//! [`discover`] is a pure function over an injected environment; everything
//! that can run without `std` lives there. Under `std`, [`get`] snapshots
//! the real process environment once and caches the discovered set for the
//! lifetime of the process, with a pre-init override hook for tests and
//! known-hardware deployments (mirroring how detection overrides work in
//! the rest of this workspace's lineage).

use crate::caps::HartCaps;
use crate::early::Environ;
use crate::{march, tunables};

/// Lookup key for the capability descriptor.
pub const MARCH_KEY: &str = "RISCV_RT_MARCH";
/// Lookup key for the cache-block management block size.
pub const CBOM_BLOCKSIZE_KEY: &str = "RISCV_RT_CBOM_BLOCKSIZE";
/// Lookup key for the cache-block zero block size.
pub const CBOZ_BLOCKSIZE_KEY: &str = "RISCV_RT_CBOZ_BLOCKSIZE";
/// Lookup key for the fast-misaligned-access flag.
pub const FAST_UNALIGNED_KEY: &str = "RISCV_RT_FAST_UNALIGNED";

/// Discover hart capabilities from an environment.
///
/// Infallible by design: a missing descriptor, a malformed descriptor, or
/// invalid tunables all degrade to the unknown/unset state, never to an
/// error. A malformed descriptor reverts the width and extension fields
/// entirely; tunables are probed independently either way.
#[must_use]
pub fn discover(env: Environ<'_>) -> HartCaps<'_> {
  let mut caps: HartCaps<'_> = HartCaps::UNKNOWN;

  if let Some(raw) = env.lookup(MARCH_KEY)
    && let Some(march) = march::parse(raw)
  {
    caps.xlen = march.xlen;
    caps.exts = march.exts;
    caps.raw_march = Some(raw);
  }

  caps.cbom_blocksize = tunables::probe_power_of_two(env, CBOM_BLOCKSIZE_KEY);
  caps.cboz_blocksize = tunables::probe_power_of_two(env, CBOZ_BLOCKSIZE_KEY);
  caps.fast_unaligned = tunables::probe_unsigned(env, FAST_UNALIGNED_KEY);

  caps
}

/// Why an override could not be installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverrideError {
  /// Discovery has already run; the capability set is immutable now.
  AlreadyInitialized,
  /// The override slot is unusable (poisoned lock).
  Unavailable,
}

impl core::fmt::Display for OverrideError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::AlreadyInitialized => f.write_str("capability set already initialized"),
      Self::Unavailable => f.write_str("override slot unavailable"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for OverrideError {}

#[cfg(feature = "std")]
mod process {
  use std::sync::{OnceLock, RwLock};
  use std::{format, string::String, vec::Vec};

  use super::{OverrideError, discover};
  use crate::caps::HartCaps;
  use crate::early::Environ;

  static CACHE: OnceLock<HartCaps<'static>> = OnceLock::new();
  static OVERRIDE: RwLock<Option<HartCaps<'static>>> = RwLock::new(None);

  /// The process environment, snapshotted once as `NAME=value` strings.
  /// Non-UTF-8 entries are skipped; they cannot name our keys anyway.
  fn process_environ() -> Environ<'static> {
    static ENTRIES: OnceLock<Vec<String>> = OnceLock::new();
    static VIEWS: OnceLock<Vec<&'static str>> = OnceLock::new();

    let entries = ENTRIES.get_or_init(|| {
      std::env::vars_os()
        .filter_map(|(name, value)| Some(format!("{}={}", name.to_str()?, value.to_str()?)))
        .collect()
    });
    let views = VIEWS.get_or_init(|| entries.iter().map(String::as_str).collect());
    Environ::new(views)
  }

  /// The process-wide capability set, discovered on first call.
  ///
  /// Exactly-once: concurrent first calls observe one consistent result,
  /// and the result never changes for the lifetime of the process.
  ///
  /// The override lock is held for the whole first-call initialization, so
  /// an override installation can never interleave with it: whichever of
  /// the two acquires the lock first fully wins.
  #[must_use]
  pub fn get() -> HartCaps<'static> {
    if let Some(cached) = CACHE.get() {
      return *cached;
    }
    match OVERRIDE.read() {
      Ok(guard) => {
        *CACHE.get_or_init(|| guard.unwrap_or_else(|| discover(process_environ())))
      }
      Err(_) => *CACHE.get_or_init(|| discover(process_environ())),
    }
  }

  /// Install a capability override.
  ///
  /// Contract: pre-init only. Once [`get`] has run, the set is immutable
  /// and this returns [`OverrideError::AlreadyInitialized`]. The cache
  /// check happens under the same lock [`get`] initializes under, so
  /// `Ok(())` guarantees the override is what every [`get`] call returns.
  #[cold]
  pub fn try_set_override(value: Option<HartCaps<'static>>) -> Result<(), OverrideError> {
    let Ok(mut guard) = OVERRIDE.write() else {
      return Err(OverrideError::Unavailable);
    };
    if CACHE.get().is_some() {
      return Err(OverrideError::AlreadyInitialized);
    }
    *guard = value;
    Ok(())
  }

  /// Install a capability override, panicking on failure.
  #[cold]
  pub fn set_override(value: Option<HartCaps<'static>>) {
    if let Err(err) = try_set_override(value) {
      panic!("hart::set_override failed: {err}");
    }
  }

  /// Remove a pending override.
  #[cold]
  pub fn clear_override() {
    set_override(None);
  }

  /// Check whether an override is pending or was applied.
  #[must_use]
  pub fn has_override() -> bool {
    OVERRIDE.read().map(|guard| guard.is_some()).unwrap_or(false)
  }
}

#[cfg(feature = "std")]
pub use process::{clear_override, get, has_override, set_override, try_set_override};
