//! Variant selection: requirements, candidates, and the selector.
//!
//! Each routine registers an ordered candidate list, best first, with an
//! unconditional baseline last. [`select`] walks the list once and returns
//! the first candidate whose [`Require`] holds against the discovered
//! capability set. Selection is a pure function of the capability set and
//! the list, so repeated selection always yields the same variant.

use hart::{Caps, HartCaps, Xlen};

// ─────────────────────────────────────────────────────────────────────────────
// Requirements
// ─────────────────────────────────────────────────────────────────────────────

/// The capability predicate guarding one variant.
///
/// A conjunction: every populated clause must hold. [`Require::BASELINE`]
/// has no clauses and holds against any capability set, including the
/// all-unknown default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Require {
  /// Extensions that must all be present.
  pub exts: Caps,
  /// Exact base word width, if the variant is width-specific.
  pub xlen: Option<Xlen>,
  /// Exact cache-block zero block size in bytes, if the variant hard-codes
  /// its block loop.
  pub cboz_blocksize: Option<u32>,
  /// Whether the variant performs misaligned word accesses.
  pub fast_unaligned: bool,
}

impl Require {
  /// The empty predicate; always holds.
  pub const BASELINE: Require =
    Require { exts: Caps::NONE, xlen: None, cboz_blocksize: None, fast_unaligned: false };

  /// Require a set of extensions.
  #[inline]
  #[must_use]
  pub const fn exts(exts: Caps) -> Self {
    Require { exts, ..Self::BASELINE }
  }

  /// Additionally require an exact base word width.
  #[inline]
  #[must_use]
  pub const fn width(self, xlen: Xlen) -> Self {
    Self { xlen: Some(xlen), ..self }
  }

  /// Additionally require an exact cache-block zero block size.
  #[inline]
  #[must_use]
  pub const fn cboz_block(self, bytes: u32) -> Self {
    Self { cboz_blocksize: Some(bytes), ..self }
  }

  /// Additionally require fast misaligned accesses.
  #[inline]
  #[must_use]
  pub const fn unaligned(self) -> Self {
    Self { fast_unaligned: true, ..self }
  }

  /// Evaluate the predicate against a capability set.
  #[must_use]
  pub fn holds(&self, caps: &HartCaps<'_>) -> bool {
    if !caps.has(self.exts) {
      return false;
    }
    if let Some(xlen) = self.xlen
      && !caps.xlen_is(xlen)
    {
      return false;
    }
    if let Some(bytes) = self.cboz_blocksize
      && !caps.cboz_blocksize.equals(bytes)
    {
      return false;
    }
    if self.fast_unaligned && !caps.has_fast_unaligned() {
      return false;
    }
    true
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Candidates and Selection
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate variant with its capability requirements.
///
/// Candidates are ordered from best to worst; the selector takes the first
/// whose requirements are satisfied.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Variant name for diagnostics (e.g. `"rv64_unaligned"`).
  pub name: &'static str,
  /// Requirements that must hold for this variant to be legal.
  pub requires: Require,
  /// The variant function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Require, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of variant selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Name of the selected variant.
  pub name: &'static str,
  /// The selected function.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the best variant from a candidate list.
///
/// Returns the first candidate whose requirements hold against `caps`.
///
/// # Panics
///
/// Panics if no candidate matches. Every registered list ends in a
/// [`Require::BASELINE`] candidate, so this only fires on a malformed
/// hand-built list.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: &HartCaps<'_>, candidates: &[Candidate<F>]) -> Selected<F> {
  for candidate in candidates {
    if candidate.requires.holds(caps) {
      return Selected::new(candidate.name, candidate.func);
    }
  }

  panic!("no matching variant; candidate lists must end with an unconditional baseline");
}
