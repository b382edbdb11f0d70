//! Allocation-free primitives usable before discovery has run.
//!
//! Discovery executes before any routine has been bound, so nothing in this
//! module may depend on the capability set, allocate, or call into the
//! selected routines. These are the simple loops the rest of the crate (and
//! the baseline variants in the `routines` crate) are built on.

use core::cmp::Ordering;

/// Write `value` into every element of `buffer`.
#[inline]
pub fn fill(buffer: &mut [u8], value: u8) {
  for byte in buffer {
    *byte = value;
  }
}

/// Number of bytes before the first NUL, or the whole slice if none.
#[inline]
#[must_use]
pub fn terminated_len(bytes: &[u8]) -> usize {
  bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

/// Lexicographic comparison stopping at the first NUL or after `max` bytes.
///
/// The end of a slice counts as a terminator, so slices without an explicit
/// NUL compare as if one followed their last byte.
#[must_use]
pub fn bounded_compare(a: &[u8], b: &[u8], max: usize) -> Ordering {
  let mut i = 0;
  while i < max {
    let ca = if i < a.len() { a[i] } else { 0 };
    let cb = if i < b.len() { b[i] } else { 0 };
    if ca != cb {
      return ca.cmp(&cb);
    }
    if ca == 0 {
      return Ordering::Equal;
    }
    i += 1;
  }
  Ordering::Equal
}

/// Case-sensitive exact-name search over `"NAME=value"` entries.
///
/// Returns the value substring of the first matching entry. An empty `name`
/// never matches; entries without a `=` are skipped.
#[must_use]
pub fn lookup_variable<'e>(name: &str, environ: &[&'e str]) -> Option<&'e str> {
  if name.is_empty() {
    return None;
  }
  for entry in environ {
    if let Some((key, value)) = entry.split_once('=')
      && key == name
    {
      return Some(value);
    }
  }
  None
}

/// A `"NAME=value"` entry list with named lookup.
///
/// This is the injected source for the descriptor and tunable probes; the
/// process-wide instance wraps the real environment, tests fabricate their
/// own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Environ<'e> {
  entries: &'e [&'e str],
}

impl<'e> Environ<'e> {
  /// An environment with no entries.
  pub const EMPTY: Environ<'static> = Environ { entries: &[] };

  /// Wrap an entry list.
  #[inline]
  #[must_use]
  pub const fn new(entries: &'e [&'e str]) -> Self {
    Self { entries }
  }

  /// Look up `name`, returning the value substring.
  #[inline]
  #[must_use]
  pub fn lookup(&self, name: &str) -> Option<&'e str> {
    lookup_variable(name, self.entries)
  }
}
