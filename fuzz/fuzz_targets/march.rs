//! Fuzz target for descriptor parsing and discovery.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Successful parses are fully closed and carry a known width
//! - Discovery never produces a partially populated set

#![no_main]

use hart::{Environ, Xlen, discover, ext, march};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let Ok(descriptor) = core::str::from_utf8(data) else {
    return;
  };

  if let Some(parsed) = march::parse(descriptor) {
    assert_ne!(parsed.xlen, Xlen::Unknown, "a parse must pin the width");
    assert_eq!(march::close(parsed.exts), parsed.exts, "results are already closed");

    // Group flag iff all members, both directions.
    assert_eq!(parsed.exts.has(ext::G), parsed.exts.has(ext::G_MEMBERS));
    assert_eq!(parsed.exts.has(ext::B), parsed.exts.has(ext::B_MEMBERS));
  }

  // Discovery over the same text must be all-or-nothing.
  let entry = format!("RISCV_RT_MARCH={descriptor}");
  let entries = [entry.as_str()];
  let caps = discover(Environ::new(&entries));
  match march::parse(descriptor) {
    Some(parsed) => {
      assert_eq!(caps.xlen, parsed.xlen);
      assert_eq!(caps.exts, parsed.exts);
      assert_eq!(caps.raw_march, Some(descriptor));
    }
    None => {
      assert_eq!(caps.xlen, Xlen::Unknown);
      assert!(caps.exts.is_empty());
      assert!(caps.raw_march.is_none());
    }
  }
});
