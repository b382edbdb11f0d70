//! End-to-end checks of the process-wide dispatched API.
//!
//! These run against whatever environment the test process happens to have,
//! so they assert behavioral equivalence with the baselines rather than
//! which variant got bound.

use core::cmp::Ordering;

use routines::{kernels, registry};

#[test]
fn dispatched_memcpy_matches_baseline() {
  let src: Vec<u8> = (0u8..=255).cycle().take(1000).collect();
  let mut via_dispatch = vec![0u8; 1000];
  let mut via_baseline = vec![0u8; 1000];

  assert_eq!(routines::memcpy(&mut via_dispatch, &src), 1000);
  kernels::memcpy_generic(&mut via_baseline, &src);
  assert_eq!(via_dispatch, via_baseline);
}

#[test]
fn dispatched_memmove_matches_baseline() {
  let base: Vec<u8> = (0u8..=255).cycle().take(500).collect();
  // Overlap in both directions plus a disjoint move.
  for (src, dst) in [(100..400, 50), (50..350, 120), (0..100, 400)] {
    let mut via_dispatch = base.clone();
    let mut via_baseline = base.clone();
    routines::memmove(&mut via_dispatch, src.clone(), dst);
    kernels::memmove_generic(&mut via_baseline, src, dst);
    assert_eq!(via_dispatch, via_baseline);
  }
}

#[test]
fn dispatched_memset_matches_baseline() {
  for len in [0usize, 1, 63, 64, 65, 1000] {
    let mut buffer = vec![0xEEu8; len];
    routines::memset(&mut buffer, 0x42);
    assert!(buffer.iter().all(|&b| b == 0x42), "len={len}");
  }
}

#[test]
fn dispatched_string_routines_match_baselines() {
  let samples: &[&[u8]] = &[
    b"",
    b"\0",
    b"hart",
    b"hart\0tail",
    b"a-string-longer-than-a-word\0",
    &[1u8; 100],
  ];

  for &a in samples {
    assert_eq!(routines::strlen(a), kernels::strlen_generic(a), "{a:?}");
    for &b in samples {
      assert_eq!(routines::strcmp(a, b), kernels::strcmp_generic(a, b), "{a:?} vs {b:?}");
      for max in [0usize, 1, 5, 100] {
        assert_eq!(routines::strncmp(a, b, max), kernels::strncmp_generic(a, b, max));
      }
    }
  }
}

#[test]
fn strcmp_is_antisymmetric_through_dispatch() {
  let (a, b) = (b"alpha".as_slice(), b"beta".as_slice());
  assert_eq!(routines::strcmp(a, b), Ordering::Less);
  assert_eq!(routines::strcmp(b, a), Ordering::Greater);
  assert_eq!(routines::strcmp(a, a), Ordering::Equal);
}

#[test]
fn cpu_relax_is_callable() {
  for _ in 0..4 {
    routines::cpu_relax();
  }
}

#[test]
fn bindings_are_stable_and_named() {
  for &routine in registry::ROUTINE_NAMES {
    let first = routines::selected_name(routine);
    let second = routines::selected_name(routine);
    assert!(first.is_some(), "{routine} must be bound");
    assert_eq!(first, second, "{routine} binding must not change");
  }
  assert_eq!(routines::selected_name("memfrob"), None);
}

#[test]
fn bound_variant_appears_in_its_enumeration() {
  // The bound name must be one of the rows enumerate reports for the same
  // capability set, and that row must be selectable.
  let caps = hart::get();
  for &routine in registry::ROUTINE_NAMES {
    let bound = routines::selected_name(routine).unwrap();
    let rows = registry::enumerate(routine, &caps);
    let row = rows.iter().find(|(name, _)| *name == bound);
    assert!(matches!(row, Some((_, true))), "{routine}/{bound} missing or not selectable");
    // And it is the first selectable row.
    let first_selectable = rows.iter().find(|(_, ok)| *ok).map(|(name, _)| *name);
    assert_eq!(first_selectable, Some(bound), "{routine}");
  }
}
