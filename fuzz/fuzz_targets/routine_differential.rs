//! Differential fuzzing of routine variants.
//!
//! Every accelerated variant must agree with its baseline on arbitrary
//! input, including inputs with embedded terminators and misaligned slices.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use routines::kernels;

#[derive(Arbitrary, Debug)]
struct Input {
  a: Vec<u8>,
  b: Vec<u8>,
  offset: usize,
  max: usize,
}

fuzz_target!(|input: Input| {
  let a = &input.a[input.offset % (input.a.len() + 1)..];
  let b = input.b.as_slice();

  assert_eq!(kernels::strlen_zbb(a), kernels::strlen_generic(a));

  let expected = kernels::strcmp_generic(a, b);
  assert_eq!(kernels::strcmp_zbb(a, b), expected);
  assert_eq!(kernels::strcmp_zbb_unaligned(a, b), expected);

  assert_eq!(
    kernels::strncmp_generic(a, b, input.max),
    kernels::strncmp_generic(b, a, input.max).reverse(),
  );

  let mut generic = vec![0u8; b.len()];
  let mut word = vec![0u8; b.len()];
  assert_eq!(
    kernels::memcpy_generic(&mut generic, a),
    kernels::memcpy_rv64_unaligned(&mut word, a),
  );
  assert_eq!(generic, word);

  let value = input.max as u8;
  kernels::memset_rv64_unaligned_cboz64(&mut generic, value);
  assert!(generic.iter().all(|&byte| byte == value));

  if !input.a.is_empty() {
    let start = input.offset % input.a.len();
    let len = input.max % (input.a.len() - start + 1);
    let dst = (input.offset / 2) % (input.a.len() - len + 1);

    let mut generic = input.a.clone();
    let mut word = input.a.clone();
    kernels::memmove_generic(&mut generic, start..start + len, dst);
    kernels::memmove_rv64_unaligned(&mut word, start..start + len, dst);
    assert_eq!(generic, word);
  }
});
