//! Hart capability representation.
//!
//! This module provides the structured result of capability discovery.
//! It answers the question: "What instructions can this hart legally run?"
//!
//! # Design
//!
//! [`Caps`] is a 64-bit bitset over the closed extension vocabulary declared
//! in [`crate::isa`]. Each bit corresponds to one ISA extension identifier;
//! group identifiers (`g`, `b`) occupy bits of their own and are kept
//! consistent with their members by the parser's closure step.
//!
//! [`HartCaps`] bundles the bitset with the base word width, the validated
//! tunables, and the raw descriptor strings kept for diagnostics. It is
//! populated exactly once per process and read-only thereafter.

use core::fmt;

use crate::tunables::Tunable;

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// Extension presence bitset over the closed ISA vocabulary.
///
/// `Caps` is `Copy`, `Send`, and `Sync`; it can be freely shared across
/// threads. Use [`has()`](Caps::has) to check that every required extension
/// is present.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no extensions).
  pub const NONE: Self = Self(0);

  /// Create a capability set from a raw word.
  ///
  /// Primarily useful for testing and fuzzing; normal usage should prefer
  /// the constants in [`ext`].
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(word: u64) -> Self {
    Self(word)
  }

  /// Access the raw underlying word.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn as_raw(self) -> u64 {
    self.0
  }

  /// Check if all extensions in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    self.0 & required.0 == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Count the number of extensions present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    assert!(bit < 64, "extension bit out of range");
    Self(1u64 << bit)
  }

  /// Names of the extensions present, in vocabulary declaration order.
  pub fn extension_names(self) -> impl Iterator<Item = &'static str> {
    crate::isa::TABLE.iter().filter(move |spec| self.has(spec.flag)).map(|spec| spec.name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Caps(")?;
    if self.is_empty() {
      f.write_str("none")?;
    } else {
      let mut first = true;
      for name in self.extension_names() {
        if !first {
          f.write_str("_")?;
        }
        f.write_str(name)?;
        first = false;
      }
    }
    f.write_str(")")
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Base Word Width
// ─────────────────────────────────────────────────────────────────────────────

/// Base integer register width of the hart.
///
/// `Unknown` is the pre-discovery default and the post-discovery state when
/// no descriptor was supplied or the descriptor failed to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Xlen {
  Rv32,
  Rv64,
  Rv128,
  #[default]
  Unknown,
}

impl Xlen {
  /// Register width in bits, if known.
  #[inline]
  #[must_use]
  pub const fn bits(self) -> Option<u32> {
    match self {
      Self::Rv32 => Some(32),
      Self::Rv64 => Some(64),
      Self::Rv128 => Some(128),
      Self::Unknown => None,
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extension Vocabulary Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Extension bit constants.
///
/// One bit per identifier in the closed vocabulary. Group identifiers (`G`,
/// `B`) have bits of their own; the combined `*_MEMBERS` masks describe what
/// each group implies.
pub mod ext {
  use super::Caps;

  // ─── Base ISAs ───
  pub const I: Caps = Caps::bit(0);
  pub const E: Caps = Caps::bit(1);

  // ─── Single-letter extensions ───
  pub const M: Caps = Caps::bit(2);
  pub const A: Caps = Caps::bit(3);
  pub const F: Caps = Caps::bit(4);
  pub const D: Caps = Caps::bit(5);
  pub const Q: Caps = Caps::bit(6);
  pub const C: Caps = Caps::bit(7);
  pub const V: Caps = Caps::bit(8);
  pub const H: Caps = Caps::bit(9);

  // ─── Zi* / Za* supervisor-adjacent extensions ───
  pub const ZICSR: Caps = Caps::bit(10);
  pub const ZIFENCEI: Caps = Caps::bit(11);
  pub const ZICBOM: Caps = Caps::bit(12); // Cache-block management
  pub const ZICBOZ: Caps = Caps::bit(13); // Cache-block zero
  pub const ZIHINTPAUSE: Caps = Caps::bit(14); // PAUSE hint
  pub const ZAWRS: Caps = Caps::bit(15); // Wait-on-reservation-set

  // ─── Bit manipulation ───
  pub const ZBA: Caps = Caps::bit(16);
  pub const ZBB: Caps = Caps::bit(17);
  pub const ZBC: Caps = Caps::bit(18);
  pub const ZBS: Caps = Caps::bit(19);

  // ─── Group identifiers ───
  pub const G: Caps = Caps::bit(20);
  pub const B: Caps = Caps::bit(21);

  // ─── Group member masks ───

  /// Everything `g` implies: `imafd` plus `zicsr` and `zifencei`.
  pub const G_MEMBERS: Caps =
    Caps(I.0 | M.0 | A.0 | F.0 | D.0 | ZICSR.0 | ZIFENCEI.0);

  /// Everything `b` implies: `zba`, `zbb`, `zbs`.
  pub const B_MEMBERS: Caps = Caps(ZBA.0 | ZBB.0 | ZBS.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Discovered Hart State
// ─────────────────────────────────────────────────────────────────────────────

/// The discovered capability state of the executing hart.
///
/// Created once per process by [`crate::discover`] (or supplied via the
/// override hooks), before any routine is first bound, and immutable for the
/// rest of the process lifetime.
///
/// The lifetime `'e` ties the retained raw strings to the environment the
/// set was discovered from; the process-wide instance uses `'static`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HartCaps<'e> {
  /// Base word width, `Unknown` when no descriptor parsed.
  pub xlen: Xlen,
  /// Extension presence after group closure.
  pub exts: Caps,
  /// The descriptor string that produced `xlen`/`exts`, absent on parse
  /// failure or when no descriptor was supplied.
  pub raw_march: Option<&'e str>,
  /// Cache-block management block size (power of two, bytes).
  pub cbom_blocksize: Tunable<'e>,
  /// Cache-block zero block size (power of two, bytes).
  pub cboz_blocksize: Tunable<'e>,
  /// Nonzero when misaligned loads/stores are fast on this hart.
  pub fast_unaligned: Tunable<'e>,
}

impl HartCaps<'_> {
  /// The all-unknown default: no width, no extensions, no tunables.
  pub const UNKNOWN: HartCaps<'static> = HartCaps {
    xlen: Xlen::Unknown,
    exts: Caps::NONE,
    raw_march: None,
    cbom_blocksize: Tunable::UNSET,
    cboz_blocksize: Tunable::UNSET,
    fast_unaligned: Tunable::UNSET,
  };

  /// Check if all extensions in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(&self, required: Caps) -> bool {
    self.exts.has(required)
  }

  /// Check the base word width.
  #[inline]
  #[must_use]
  pub fn xlen_is(&self, xlen: Xlen) -> bool {
    self.xlen == xlen
  }

  /// Whether misaligned accesses are declared fast.
  #[inline]
  #[must_use]
  pub const fn has_fast_unaligned(&self) -> bool {
    match self.fast_unaligned.value {
      Some(v) => v != 0,
      None => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn none_is_empty() {
    assert!(Caps::NONE.is_empty());
    assert_eq!(Caps::NONE.count(), 0);
  }

  #[test]
  fn has_is_subset_containment() {
    let caps = ext::I | ext::M | ext::ZBB;
    assert!(caps.has(ext::I));
    assert!(caps.has(ext::I | ext::ZBB));
    assert!(!caps.has(ext::A));
    assert!(!caps.has(ext::I | ext::A));
    // Every set contains itself and the empty set.
    assert!(caps.has(caps));
    assert!(caps.has(Caps::NONE));
  }

  #[test]
  fn operators_match_named_methods() {
    let a = ext::I;
    let b = ext::ZBB;
    assert_eq!(a | b, a.union(b));
    assert_eq!((a | b) & a, a);

    let mut c = a;
    c |= b;
    assert_eq!(c, a | b);
  }

  #[test]
  fn vocabulary_bits_are_distinct() {
    let all = ext::I
      | ext::E
      | ext::M
      | ext::A
      | ext::F
      | ext::D
      | ext::Q
      | ext::C
      | ext::V
      | ext::H
      | ext::ZICSR
      | ext::ZIFENCEI
      | ext::ZICBOM
      | ext::ZICBOZ
      | ext::ZIHINTPAUSE
      | ext::ZAWRS
      | ext::ZBA
      | ext::ZBB
      | ext::ZBC
      | ext::ZBS
      | ext::G
      | ext::B;
    assert_eq!(all.count(), 22);
  }

  #[test]
  fn group_member_masks() {
    assert!(ext::G_MEMBERS.has(ext::I));
    assert!(ext::G_MEMBERS.has(ext::ZIFENCEI));
    assert!(!ext::G_MEMBERS.has(ext::C));
    assert!(!ext::G_MEMBERS.has(ext::G));

    assert!(ext::B_MEMBERS.has(ext::ZBA | ext::ZBB | ext::ZBS));
    assert!(!ext::B_MEMBERS.has(ext::ZBC));
  }

  #[test]
  fn xlen_bits() {
    assert_eq!(Xlen::Rv32.bits(), Some(32));
    assert_eq!(Xlen::Rv64.bits(), Some(64));
    assert_eq!(Xlen::Rv128.bits(), Some(128));
    assert_eq!(Xlen::Unknown.bits(), None);
    assert_eq!(Xlen::default(), Xlen::Unknown);
  }

  #[test]
  fn unknown_hart_is_default() {
    let caps = HartCaps::UNKNOWN;
    assert_eq!(caps, HartCaps::default());
    assert_eq!(caps.xlen, Xlen::Unknown);
    assert!(caps.exts.is_empty());
    assert!(caps.raw_march.is_none());
    assert!(!caps.has_fast_unaligned());
  }

  #[test]
  fn fast_unaligned_requires_nonzero() {
    let mut caps = HartCaps::UNKNOWN;
    caps.fast_unaligned = Tunable { value: Some(0), raw: Some("0") };
    assert!(!caps.has_fast_unaligned());
    caps.fast_unaligned = Tunable { value: Some(1), raw: Some("1") };
    assert!(caps.has_fast_unaligned());
  }

  #[test]
  fn debug_lists_extension_names() {
    let caps = ext::I | ext::ZBB;
    let rendered = std::format!("{caps:?}");
    assert!(rendered.contains("i"));
    assert!(rendered.contains("zbb"));
    assert_eq!(std::format!("{:?}", Caps::NONE), "Caps(none)");
  }
}
