//! Capability descriptor parsing.
//!
//! Decodes a `-march`-style descriptor string (e.g. `rv64gc_zba`) into a
//! base word width plus an extension bitset, then runs group closure so
//! group and member flags are mutually consistent.
//!
//! # All-or-nothing
//!
//! Parsing is deliberately strict: a width prefix that matches nothing, or
//! any position where no vocabulary identifier matches, fails the whole
//! parse. Skipping unknown text could yield a capability set that is
//! silently wrong, and a wrong set here later selects an implementation the
//! hart cannot execute. A failed parse is reported as `None` and the caller
//! keeps the all-unknown default.

use crate::caps::{Caps, Xlen};
use crate::isa::{self, ExtSpec};

/// A successfully parsed descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct March {
  /// Base word width from the `rv32`/`rv64`/`rv128` prefix.
  pub xlen: Xlen,
  /// Extension flags after group closure.
  pub exts: Caps,
}

/// Parse a capability descriptor.
///
/// Returns `None` on any malformed input; a partial result is never
/// produced. Closure (see [`close`]) has already been applied to the
/// returned extension set.
#[must_use]
pub fn parse(descriptor: &str) -> Option<March> {
  let bytes = descriptor.as_bytes();
  let (xlen, mut pos) = width_prefix(bytes)?;

  let mut exts = Caps::NONE;
  while pos < bytes.len() {
    let spec = match_extension(&bytes[pos..])?;
    exts |= spec.flag;
    pos += spec.name.len();
    pos += version_suffix_len(&bytes[pos..]);
    if bytes.get(pos) == Some(&b'_') {
      pos += 1;
    }
  }

  Some(March { xlen, exts: close(exts) })
}

/// Recognize the mandatory width prefix.
///
/// Each literal must be followed by a non-digit (or end of input), so that
/// `rv32` is not mistaken for the head of a longer numeric width.
fn width_prefix(bytes: &[u8]) -> Option<(Xlen, usize)> {
  const WIDTHS: [(&[u8], Xlen); 3] =
    [(b"rv32", Xlen::Rv32), (b"rv64", Xlen::Rv64), (b"rv128", Xlen::Rv128)];

  for (prefix, xlen) in WIDTHS {
    if bytes.len() >= prefix.len()
      && &bytes[..prefix.len()] == prefix
      && !bytes.get(prefix.len()).is_some_and(u8::is_ascii_digit)
    {
      return Some((xlen, prefix.len()));
    }
  }
  None
}

/// Find the vocabulary identifier matching at the current position.
///
/// Longest match wins; declaration order breaks ties. `None` means the
/// remaining text starts with no known identifier and the parse must fail.
fn match_extension(rest: &[u8]) -> Option<&'static ExtSpec> {
  let mut best: Option<&'static ExtSpec> = None;
  for spec in isa::TABLE {
    let name = spec.name.as_bytes();
    if rest.len() >= name.len()
      && &rest[..name.len()] == name
      && best.is_none_or(|b| name.len() > b.name.len())
    {
      best = Some(spec);
    }
  }
  best
}

/// Length of an optional `<digits>[p<digits>]` version suffix.
///
/// A `p` not followed by digits is not part of the version; it is left in
/// place for the extension matcher, which will then reject it.
fn version_suffix_len(rest: &[u8]) -> usize {
  let major = rest.iter().take_while(|b| b.is_ascii_digit()).count();
  if major == 0 {
    return 0;
  }
  if rest.get(major) == Some(&b'p') {
    let minor = rest[major + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
    if minor > 0 {
      return major + 1 + minor;
    }
  }
  major
}

/// Run group closure to a fixpoint.
///
/// Forward: a set group flag forces all of its members on. Backward: a group
/// whose members are all on is forced on itself. Rounds repeat until the
/// true-flag count stops increasing; the count is bounded by the vocabulary
/// size, so termination is guaranteed (the group relation is acyclic, which
/// `isa` asserts at compile time).
#[must_use]
pub fn close(mut exts: Caps) -> Caps {
  loop {
    let before = exts.count();
    for &(flag, members) in isa::GROUPS {
      if exts.has(flag) {
        exts |= members;
      }
    }
    for &(flag, members) in isa::GROUPS {
      if exts.has(members) {
        exts |= flag;
      }
    }
    if exts.count() == before {
      return exts;
    }
  }
}
