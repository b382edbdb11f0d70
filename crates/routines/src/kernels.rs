//! Routine variants.
//!
//! Every routine has a `*_generic` baseline with no capability requirements
//! and one or more accelerated variants. All variants of a routine are
//! observationally equivalent; the accelerated ones only change how the
//! bytes are walked. The registry in [`crate::registry`] orders them best
//! first.
//!
//! Word-at-a-time variants use little-endian `u64` loads over 8-byte
//! chunks, which is the natural register shape on the harts they are gated
//! to. The `rv64_unaligned` family additionally assumes misaligned word
//! access is fast, which is why those variants require the corresponding
//! tunable rather than just the width.

use core::cmp::Ordering;
use core::ops::Range;

use hart::early;

const SWAR_ONES: u64 = 0x0101_0101_0101_0101;
const SWAR_HIGHS: u64 = 0x8080_8080_8080_8080;

/// Whether `word` contains a zero byte.
///
/// The classic subtract-and-mask probe. False positives can only occur in
/// bytes above the lowest true zero, so the lowest set high-bit always marks
/// a real zero byte.
#[inline(always)]
const fn has_zero_byte(word: u64) -> bool {
  word.wrapping_sub(SWAR_ONES) & !word & SWAR_HIGHS != 0
}

// ─────────────────────────────────────────────────────────────────────────────
// memcpy
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `min(dst.len(), src.len())` bytes, returning the count copied.
pub fn memcpy_generic(dst: &mut [u8], src: &[u8]) -> usize {
  let n = dst.len().min(src.len());
  dst[..n].copy_from_slice(&src[..n]);
  n
}

/// Word-at-a-time copy for 64-bit harts with fast misaligned access.
pub fn memcpy_rv64_unaligned(dst: &mut [u8], src: &[u8]) -> usize {
  let n = dst.len().min(src.len());
  let (dst_words, dst_tail) = dst[..n].as_chunks_mut::<8>();
  let (src_words, src_tail) = src[..n].as_chunks::<8>();
  for (d, s) in dst_words.iter_mut().zip(src_words) {
    *d = u64::from_le_bytes(*s).to_le_bytes();
  }
  dst_tail.copy_from_slice(src_tail);
  n
}

// ─────────────────────────────────────────────────────────────────────────────
// memmove
// ─────────────────────────────────────────────────────────────────────────────

/// Copy the bytes at `src` onto the equal-length range starting at `dst`,
/// within one buffer. The ranges may overlap in either direction.
///
/// # Panics
///
/// Panics if `src` or the destination range is out of bounds.
pub fn memmove_generic(buffer: &mut [u8], src: Range<usize>, dst: usize) {
  buffer.copy_within(src, dst);
}

/// Word-at-a-time overlapping move for 64-bit harts with fast misaligned
/// access.
///
/// Walks forward when moving down and backward when moving up, so every
/// source byte is read before the move clobbers it; each word is loaded
/// whole before its store, which covers overlap distances under a word.
///
/// # Panics
///
/// Panics if `src` or the destination range is out of bounds.
pub fn memmove_rv64_unaligned(buffer: &mut [u8], src: Range<usize>, dst: usize) {
  let Range { start, end } = src;
  assert!(start <= end && end <= buffer.len(), "source range out of bounds");
  let len = end - start;
  assert!(dst <= buffer.len() - len, "destination range out of bounds");

  if dst <= start {
    let mut i = 0;
    while i + 8 <= len {
      let word = load_word(buffer, start + i);
      store_word(buffer, dst + i, word);
      i += 8;
    }
    while i < len {
      buffer[dst + i] = buffer[start + i];
      i += 1;
    }
  } else {
    let mut i = len;
    while i % 8 != 0 {
      i -= 1;
      buffer[dst + i] = buffer[start + i];
    }
    while i != 0 {
      i -= 8;
      let word = load_word(buffer, start + i);
      store_word(buffer, dst + i, word);
    }
  }
}

#[inline(always)]
fn load_word(buffer: &[u8], at: usize) -> u64 {
  let mut bytes = [0u8; 8];
  bytes.copy_from_slice(&buffer[at..at + 8]);
  u64::from_le_bytes(bytes)
}

#[inline(always)]
fn store_word(buffer: &mut [u8], at: usize, word: u64) {
  buffer[at..at + 8].copy_from_slice(&word.to_le_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// memset
// ─────────────────────────────────────────────────────────────────────────────

/// Byte-at-a-time fill.
pub fn memset_generic(buffer: &mut [u8], value: u8) {
  early::fill(buffer, value);
}

/// Word-at-a-time fill for 64-bit harts with fast misaligned access.
pub fn memset_rv64_unaligned(buffer: &mut [u8], value: u8) {
  let splat = u64::from_le_bytes([value; 8]);
  let (words, tail) = buffer.as_chunks_mut::<8>();
  for word in words {
    *word = splat.to_le_bytes();
  }
  early::fill(tail, value);
}

/// Block-at-a-time zeroing for harts with a 64-byte cache-block zero unit.
///
/// Only zeroing benefits from the block unit; any other fill value takes the
/// plain word path.
pub fn memset_rv64_unaligned_cboz64(buffer: &mut [u8], value: u8) {
  if value != 0 {
    return memset_rv64_unaligned(buffer, value);
  }
  let (blocks, tail) = buffer.as_chunks_mut::<64>();
  for block in blocks {
    *block = [0; 64];
  }
  memset_rv64_unaligned(tail, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// strlen
// ─────────────────────────────────────────────────────────────────────────────

/// Byte-at-a-time scan for the first NUL.
pub fn strlen_generic(bytes: &[u8]) -> usize {
  early::terminated_len(bytes)
}

/// Word-at-a-time NUL scan.
pub fn strlen_zbb(bytes: &[u8]) -> usize {
  let (words, tail) = bytes.as_chunks::<8>();
  for (i, chunk) in words.iter().enumerate() {
    let word = u64::from_le_bytes(*chunk);
    let zeros = word.wrapping_sub(SWAR_ONES) & !word & SWAR_HIGHS;
    if zeros != 0 {
      return i * 8 + (zeros.trailing_zeros() / 8) as usize;
    }
  }
  words.len() * 8 + early::terminated_len(tail)
}

// ─────────────────────────────────────────────────────────────────────────────
// strcmp / strncmp
// ─────────────────────────────────────────────────────────────────────────────

/// Byte-at-a-time terminated comparison.
pub fn strcmp_generic(a: &[u8], b: &[u8]) -> Ordering {
  early::bounded_compare(a, b, usize::MAX)
}

/// Word-at-a-time comparison, falling back to the byte scan only once a
/// word contains a difference or a terminator.
pub fn strcmp_zbb_unaligned(a: &[u8], b: &[u8]) -> Ordering {
  let n = a.len().min(b.len());
  let (a_words, _) = a[..n].as_chunks::<8>();
  let (b_words, _) = b[..n].as_chunks::<8>();

  let mut offset = 0;
  for (ca, cb) in a_words.iter().zip(b_words) {
    let wa = u64::from_le_bytes(*ca);
    if wa != u64::from_le_bytes(*cb) || has_zero_byte(wa) {
      break;
    }
    offset += 8;
  }
  early::bounded_compare(&a[offset..], &b[offset..], usize::MAX)
}

/// Word-at-a-time comparison for harts without fast misaligned access.
///
/// Takes the word path only when both operands start word-aligned;
/// otherwise every load would straddle, and the byte scan wins.
pub fn strcmp_zbb(a: &[u8], b: &[u8]) -> Ordering {
  if a.as_ptr().addr() % 8 == 0 && b.as_ptr().addr() % 8 == 0 {
    strcmp_zbb_unaligned(a, b)
  } else {
    strcmp_generic(a, b)
  }
}

/// Byte-at-a-time bounded terminated comparison.
pub fn strncmp_generic(a: &[u8], b: &[u8], max: usize) -> Ordering {
  early::bounded_compare(a, b, max)
}

// ─────────────────────────────────────────────────────────────────────────────
// cpu_relax
// ─────────────────────────────────────────────────────────────────────────────

/// Spin-wait hint via the wait-on-reservation-set extension.
pub fn cpu_relax_zawrs() {
  // wrs.nto is not expressible from stable Rust; the generic spin hint
  // lowers to the best pause the target offers.
  core::hint::spin_loop();
}

/// Spin-wait hint via the pause hint extension (the default).
pub fn cpu_relax_zihintpause() {
  core::hint::spin_loop();
}
