//! Validated numeric tunable probes.
//!
//! Tunables come from the same untrusted string source as the descriptor,
//! but their failure mode is different: an absent or invalid tunable is
//! silently left unset and downstream selection falls back to default
//! behavior. No error ever propagates out of a probe.

use crate::early::Environ;

/// One probed tunable: the validated value plus the raw string it came from.
///
/// `raw` is retained for diagnostics and only when the value was accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tunable<'e> {
  /// The accepted value, if any.
  pub value: Option<u32>,
  /// The source string that produced `value`.
  pub raw: Option<&'e str>,
}

impl Tunable<'_> {
  /// The unset state: no value, no retained source.
  pub const UNSET: Tunable<'static> = Tunable { value: None, raw: None };

  /// Whether a value was accepted.
  #[inline]
  #[must_use]
  pub const fn is_set(&self) -> bool {
    self.value.is_some()
  }

  /// Whether the accepted value equals `n`.
  #[inline]
  #[must_use]
  pub const fn equals(&self, n: u32) -> bool {
    match self.value {
      Some(value) => value == n,
      None => false,
    }
  }
}

/// Parse a strict unsigned decimal integer.
///
/// Stricter than `str::parse`: no sign, no surrounding whitespace. Overflow
/// rejects the value.
#[must_use]
pub fn parse_unsigned(raw: &str) -> Option<u32> {
  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  raw.parse().ok()
}

/// Parse an unsigned decimal integer that must be a power of two.
///
/// Zero is not a power of two and is rejected.
#[must_use]
pub fn parse_power_of_two(raw: &str) -> Option<u32> {
  parse_unsigned(raw).filter(|value| value.is_power_of_two())
}

/// Probe a power-of-two tunable from the environment.
///
/// Absent or invalid sources leave the tunable unset; this is the common
/// case and not an error.
#[must_use]
pub fn probe_power_of_two<'e>(env: Environ<'e>, key: &str) -> Tunable<'e> {
  probe_with(env, key, parse_power_of_two)
}

/// Probe a plain unsigned tunable (used for boolean-style flags where any
/// accepted nonzero value means "yes").
#[must_use]
pub fn probe_unsigned<'e>(env: Environ<'e>, key: &str) -> Tunable<'e> {
  probe_with(env, key, parse_unsigned)
}

fn probe_with<'e>(env: Environ<'e>, key: &str, parse: fn(&str) -> Option<u32>) -> Tunable<'e> {
  match env.lookup(key).map(|raw| (raw, parse(raw))) {
    Some((raw, Some(value))) => Tunable { value: Some(value), raw: Some(raw) },
    _ => Tunable::UNSET,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn power_of_two_acceptance() {
    assert_eq!(parse_power_of_two("1"), Some(1));
    assert_eq!(parse_power_of_two("64"), Some(64));
    assert_eq!(parse_power_of_two("4096"), Some(4096));
  }

  #[test]
  fn power_of_two_rejection() {
    for raw in ["0", "3", "-1", "abc", "96", "", " 64", "64 ", "+64", "6e1"] {
      assert_eq!(parse_power_of_two(raw), None, "{raw:?} must be rejected");
    }
  }

  #[test]
  fn overflow_is_rejected() {
    assert_eq!(parse_unsigned("4294967295"), Some(u32::MAX));
    assert_eq!(parse_unsigned("4294967296"), None);
    assert_eq!(parse_power_of_two("99999999999999999999"), None);
  }

  #[test]
  fn probe_retains_raw_only_when_accepted() {
    let entries = ["BLOCK=64", "BAD=96"];
    let env = Environ::new(&entries);

    let accepted = probe_power_of_two(env, "BLOCK");
    assert_eq!(accepted.value, Some(64));
    assert_eq!(accepted.raw, Some("64"));
    assert!(accepted.is_set());
    assert!(accepted.equals(64));
    assert!(!accepted.equals(32));

    let rejected = probe_power_of_two(env, "BAD");
    assert_eq!(rejected, Tunable::UNSET);
    assert!(rejected.raw.is_none());
  }

  #[test]
  fn probe_of_absent_key_is_unset() {
    let probed = probe_power_of_two(Environ::EMPTY, "MISSING");
    assert_eq!(probed, Tunable::UNSET);
    assert!(!probed.equals(0));
  }

  #[test]
  fn unsigned_probe_accepts_zero() {
    let entries = ["FLAG=0"];
    let probed = probe_unsigned(Environ::new(&entries), "FLAG");
    assert_eq!(probed.value, Some(0));
    assert_eq!(probed.raw, Some("0"));
  }
}
