//! The routine registry: per-routine candidate tables.
//!
//! Each table is ordered best first and ends with an unconditional
//! baseline, so selection always succeeds whatever the discovered
//! capability set looks like. The tables are the single source of truth;
//! diagnostics ([`enumerate`]) read the same entries the selector does.

use core::cmp::Ordering;
use core::ops::Range;

use hart::{Xlen, ext};

#[cfg(feature = "std")]
use hart::HartCaps;

use crate::kernels;
use crate::select::{Candidate, Require};

// ─────────────────────────────────────────────────────────────────────────────
// Signatures
// ─────────────────────────────────────────────────────────────────────────────

/// `memcpy`: copy the common prefix, returning the bytes copied.
pub type CopyFn = fn(&mut [u8], &[u8]) -> usize;
/// `memmove`: overlapping copy within one buffer.
pub type MoveFn = fn(&mut [u8], Range<usize>, usize);
/// `memset`: fill a buffer with one byte value.
pub type FillFn = fn(&mut [u8], u8);
/// `strlen`: bytes before the first NUL, or the whole slice.
pub type LenFn = fn(&[u8]) -> usize;
/// `strcmp`: terminated lexicographic comparison.
pub type CmpFn = fn(&[u8], &[u8]) -> Ordering;
/// `strncmp`: bounded terminated comparison.
pub type BoundedCmpFn = fn(&[u8], &[u8], usize) -> Ordering;
/// `cpu_relax`: spin-wait hint.
pub type RelaxFn = fn();

// ─────────────────────────────────────────────────────────────────────────────
// Candidate Tables
// ─────────────────────────────────────────────────────────────────────────────

pub const MEMCPY: &[Candidate<CopyFn>] = &[
  Candidate::new(
    "rv64_unaligned",
    Require::BASELINE.width(Xlen::Rv64).unaligned(),
    kernels::memcpy_rv64_unaligned,
  ),
  Candidate::new("generic", Require::BASELINE, kernels::memcpy_generic),
];

pub const MEMMOVE: &[Candidate<MoveFn>] = &[
  Candidate::new(
    "rv64_unaligned",
    Require::BASELINE.width(Xlen::Rv64).unaligned(),
    kernels::memmove_rv64_unaligned,
  ),
  Candidate::new("generic", Require::BASELINE, kernels::memmove_generic),
];

pub const MEMSET: &[Candidate<FillFn>] = &[
  Candidate::new(
    "rv64_unaligned_cboz64",
    Require::exts(ext::ZICBOZ).width(Xlen::Rv64).unaligned().cboz_block(64),
    kernels::memset_rv64_unaligned_cboz64,
  ),
  Candidate::new(
    "rv64_unaligned",
    Require::BASELINE.width(Xlen::Rv64).unaligned(),
    kernels::memset_rv64_unaligned,
  ),
  Candidate::new("generic", Require::BASELINE, kernels::memset_generic),
];

pub const STRLEN: &[Candidate<LenFn>] = &[
  Candidate::new("zbb", Require::exts(ext::ZBB), kernels::strlen_zbb),
  Candidate::new("generic", Require::BASELINE, kernels::strlen_generic),
];

pub const STRCMP: &[Candidate<CmpFn>] = &[
  Candidate::new(
    "zbb_unaligned",
    Require::exts(ext::ZBB).unaligned(),
    kernels::strcmp_zbb_unaligned,
  ),
  Candidate::new("zbb", Require::exts(ext::ZBB), kernels::strcmp_zbb),
  Candidate::new("generic", Require::BASELINE, kernels::strcmp_generic),
];

pub const STRNCMP: &[Candidate<BoundedCmpFn>] =
  &[Candidate::new("generic", Require::BASELINE, kernels::strncmp_generic)];

pub const CPU_RELAX: &[Candidate<RelaxFn>] = &[
  Candidate::new("zawrs", Require::exts(ext::ZAWRS), kernels::cpu_relax_zawrs),
  Candidate::new("zihintpause", Require::BASELINE, kernels::cpu_relax_zihintpause),
];

/// Routine names accepted by [`enumerate`], in registry order.
pub const ROUTINE_NAMES: &[&str] =
  &["memcpy", "memmove", "memset", "strlen", "strcmp", "strncmp", "cpu_relax"];

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ─────────────────────────────────────────────────────────────────────────────

/// Enumerate a routine's variants against a capability set.
///
/// Returns `(variant name, would be selectable)` rows in registry order, so
/// the first `true` row is exactly what [`crate::select::select`] would
/// pick. An unknown routine name yields an empty list.
#[cfg(feature = "std")]
#[must_use]
pub fn enumerate(routine: &str, caps: &HartCaps<'_>) -> std::vec::Vec<(&'static str, bool)> {
  fn rows<F: Copy>(
    table: &[Candidate<F>],
    caps: &HartCaps<'_>,
  ) -> std::vec::Vec<(&'static str, bool)> {
    table.iter().map(|c| (c.name, c.requires.holds(caps))).collect()
  }

  match routine {
    "memcpy" => rows(MEMCPY, caps),
    "memmove" => rows(MEMMOVE, caps),
    "memset" => rows(MEMSET, caps),
    "strlen" => rows(STRLEN, caps),
    "strcmp" => rows(STRCMP, caps),
    "strncmp" => rows(STRNCMP, caps),
    "cpu_relax" => rows(CPU_RELAX, caps),
    _ => std::vec::Vec::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_baseline_last<F: Copy>(name: &str, table: &[Candidate<F>]) {
    let last = &table[table.len() - 1];
    assert_eq!(last.requires, Require::BASELINE, "{name} must end in a baseline");
    // And only the last entry is unconditional.
    for candidate in &table[..table.len() - 1] {
      assert_ne!(candidate.requires, Require::BASELINE, "{name}/{}", candidate.name);
    }
  }

  #[test]
  fn every_table_ends_in_a_baseline() {
    assert_baseline_last("memcpy", MEMCPY);
    assert_baseline_last("memmove", MEMMOVE);
    assert_baseline_last("memset", MEMSET);
    assert_baseline_last("strlen", STRLEN);
    assert_baseline_last("strcmp", STRCMP);
    assert_baseline_last("strncmp", STRNCMP);
    assert_baseline_last("cpu_relax", CPU_RELAX);
  }

  #[test]
  fn variant_names_are_unique_per_table() {
    fn assert_unique<F: Copy>(table: &[Candidate<F>]) {
      for (i, a) in table.iter().enumerate() {
        for b in &table[i + 1..] {
          assert_ne!(a.name, b.name);
        }
      }
    }
    assert_unique(MEMCPY);
    assert_unique(MEMMOVE);
    assert_unique(MEMSET);
    assert_unique(STRLEN);
    assert_unique(STRCMP);
    assert_unique(CPU_RELAX);
  }

  #[cfg(feature = "std")]
  mod enumerate {
    use hart::{Tunable, ext};

    use super::super::*;

    fn rv64_full_caps() -> HartCaps<'static> {
      let mut caps = HartCaps::UNKNOWN;
      caps.xlen = Xlen::Rv64;
      caps.exts = ext::G | ext::G_MEMBERS | ext::C | ext::ZBB | ext::ZICBOZ | ext::ZAWRS;
      caps.cboz_blocksize = Tunable { value: Some(64), raw: Some("64") };
      caps.fast_unaligned = Tunable { value: Some(1), raw: Some("1") };
      caps
    }

    #[test]
    fn unknown_routine_yields_an_empty_list() {
      assert!(enumerate("memfrob", &HartCaps::UNKNOWN).is_empty());
      assert!(enumerate("", &rv64_full_caps()).is_empty());
    }

    #[test]
    fn baseline_rows_are_always_selectable() {
      for name in ROUTINE_NAMES {
        let rows = enumerate(name, &HartCaps::UNKNOWN);
        assert!(!rows.is_empty(), "{name}");
        let (last_name, last_ok) = rows[rows.len() - 1];
        assert!(last_ok, "{name}/{last_name} must hold against unknown caps");
      }
    }

    #[test]
    fn full_caps_make_every_memset_variant_selectable() {
      let rows = enumerate("memset", &rv64_full_caps());
      assert_eq!(
        rows,
        std::vec![("rv64_unaligned_cboz64", true), ("rv64_unaligned", true), ("generic", true)]
      );
    }

    #[test]
    fn missing_blocksize_drops_only_the_cboz_variant() {
      let mut caps = rv64_full_caps();
      caps.cboz_blocksize = Tunable::UNSET;
      let rows = enumerate("memset", &caps);
      assert_eq!(
        rows,
        std::vec![("rv64_unaligned_cboz64", false), ("rv64_unaligned", true), ("generic", true)]
      );
    }

    #[test]
    fn strcmp_rows_distinguish_alignment_tolerance() {
      let mut caps = rv64_full_caps();
      caps.fast_unaligned = Tunable::UNSET;
      let rows = enumerate("strcmp", &caps);
      assert_eq!(rows, std::vec![("zbb_unaligned", false), ("zbb", true), ("generic", true)]);
    }
  }
}
