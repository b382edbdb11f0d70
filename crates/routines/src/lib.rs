//! Capability-dispatched string and memory routines.
//!
//! Each routine (`memcpy`, `memmove`, `memset`, `strlen`, `strcmp`,
//! `strncmp`, `cpu_relax`) has several variants in [`kernels`], a priority-ordered
//! candidate table in [`registry`], and, under `std`, a process-wide
//! [`dispatch::Dispatcher`] that binds the routine to its best variant the
//! first time it is called. The binding is decided by the capability set
//! the `hart` crate discovers and never changes afterwards.
//!
//! # Quick Start
//!
//! ```
//! let mut buffer = [0xFFu8; 32];
//! routines::memset(&mut buffer, 0);
//! assert!(buffer.iter().all(|&b| b == 0));
//!
//! assert_eq!(routines::strlen(b"hart\0junk"), 4);
//! ```
//!
//! Without `std` there is no process-wide cache; callers run selection
//! themselves against whatever capability set they hold:
//!
//! ```
//! use hart::HartCaps;
//! use routines::{registry, select::select};
//!
//! let selected = select(&HartCaps::UNKNOWN, registry::STRLEN);
//! assert_eq!(selected.name, "generic");
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod kernels;
pub mod registry;
pub mod select;

#[cfg(feature = "std")]
pub mod dispatch;

pub use select::{Candidate, Require, Selected, select};

#[cfg(feature = "std")]
pub use api::{cpu_relax, memcpy, memmove, memset, selected_name, strcmp, strlen, strncmp};

#[cfg(feature = "std")]
mod api {
  use core::cmp::Ordering;
  use core::ops::Range;

  use crate::dispatch::Dispatcher;
  use crate::registry::{self, BoundedCmpFn, CmpFn, CopyFn, FillFn, LenFn, MoveFn, RelaxFn};
  use crate::select::{Selected, select};

  fn select_memcpy() -> Selected<CopyFn> {
    select(&hart::get(), registry::MEMCPY)
  }

  fn select_memmove() -> Selected<MoveFn> {
    select(&hart::get(), registry::MEMMOVE)
  }

  fn select_memset() -> Selected<FillFn> {
    select(&hart::get(), registry::MEMSET)
  }

  fn select_strlen() -> Selected<LenFn> {
    select(&hart::get(), registry::STRLEN)
  }

  fn select_strcmp() -> Selected<CmpFn> {
    select(&hart::get(), registry::STRCMP)
  }

  fn select_strncmp() -> Selected<BoundedCmpFn> {
    select(&hart::get(), registry::STRNCMP)
  }

  fn select_cpu_relax() -> Selected<RelaxFn> {
    select(&hart::get(), registry::CPU_RELAX)
  }

  static MEMCPY: Dispatcher<CopyFn> = Dispatcher::new(select_memcpy);
  static MEMMOVE: Dispatcher<MoveFn> = Dispatcher::new(select_memmove);
  static MEMSET: Dispatcher<FillFn> = Dispatcher::new(select_memset);
  static STRLEN: Dispatcher<LenFn> = Dispatcher::new(select_strlen);
  static STRCMP: Dispatcher<CmpFn> = Dispatcher::new(select_strcmp);
  static STRNCMP: Dispatcher<BoundedCmpFn> = Dispatcher::new(select_strncmp);
  static CPU_RELAX: Dispatcher<RelaxFn> = Dispatcher::new(select_cpu_relax);

  /// Copy `min(dst.len(), src.len())` bytes from `src` into `dst`.
  ///
  /// Returns the number of bytes copied.
  #[inline]
  pub fn memcpy(dst: &mut [u8], src: &[u8]) -> usize {
    (MEMCPY.get().func)(dst, src)
  }

  /// Copy the bytes at `src` onto the equal-length range starting at
  /// `dst`, within one buffer; the ranges may overlap.
  ///
  /// # Panics
  ///
  /// Panics if `src` or the destination range is out of bounds.
  #[inline]
  pub fn memmove(buffer: &mut [u8], src: Range<usize>, dst: usize) {
    (MEMMOVE.get().func)(buffer, src, dst);
  }

  /// Fill `buffer` with `value`.
  #[inline]
  pub fn memset(buffer: &mut [u8], value: u8) {
    (MEMSET.get().func)(buffer, value);
  }

  /// Number of bytes before the first NUL, or the whole slice if none.
  #[inline]
  #[must_use]
  pub fn strlen(bytes: &[u8]) -> usize {
    (STRLEN.get().func)(bytes)
  }

  /// Terminated lexicographic comparison; slice ends count as terminators.
  #[inline]
  #[must_use]
  pub fn strcmp(a: &[u8], b: &[u8]) -> Ordering {
    (STRCMP.get().func)(a, b)
  }

  /// [`strcmp`] limited to the first `max` bytes.
  #[inline]
  #[must_use]
  pub fn strncmp(a: &[u8], b: &[u8], max: usize) -> Ordering {
    (STRNCMP.get().func)(a, b, max)
  }

  /// Spin-wait hint for busy loops.
  #[inline]
  pub fn cpu_relax() {
    (CPU_RELAX.get().func)();
  }

  /// Name of the variant a routine is bound to.
  ///
  /// Binds the routine as a side effect if it was not bound yet. Returns
  /// `None` for a name [`registry::ROUTINE_NAMES`] does not list.
  #[must_use]
  pub fn selected_name(routine: &str) -> Option<&'static str> {
    match routine {
      "memcpy" => Some(MEMCPY.name()),
      "memmove" => Some(MEMMOVE.name()),
      "memset" => Some(MEMSET.name()),
      "strlen" => Some(STRLEN.name()),
      "strcmp" => Some(STRCMP.name()),
      "strncmp" => Some(STRNCMP.name()),
      "cpu_relax" => Some(CPU_RELAX.name()),
      _ => None,
    }
  }
}
