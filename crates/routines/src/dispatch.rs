//! Once-per-process routine binding.
//!
//! A [`Dispatcher`] pairs a selector function with a `OnceLock`. The first
//! call runs the selector; every later call is a load of the cached
//! [`Selected`]. Concurrent first calls are safe and all observers see the
//! same binding, which never changes for the lifetime of the process.

use std::sync::OnceLock;

use crate::select::Selected;

/// A cached binding from one routine to its selected variant.
///
/// `F` is the routine's function pointer type; function pointers are `Copy`,
/// `Send`, and `Sync`, so the dispatcher is shareable as a `static`.
pub struct Dispatcher<F: Copy + Send + Sync + 'static> {
  inner: OnceLock<Selected<F>>,
  selector: fn() -> Selected<F>,
}

impl<F: Copy + Send + Sync + 'static> Dispatcher<F> {
  /// Create a dispatcher; the selector runs on first access.
  #[must_use]
  pub const fn new(selector: fn() -> Selected<F>) -> Self {
    Self { inner: OnceLock::new(), selector }
  }

  /// The selected variant, binding it on first call.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Selected<F> {
    *self.inner.get_or_init(|| (self.selector)())
  }

  /// Name of the selected variant.
  #[inline]
  #[must_use]
  pub fn name(&self) -> &'static str {
    self.get().name
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicU32, Ordering};
  use std::vec::Vec;

  use super::*;

  static SELECTOR_RUNS: AtomicU32 = AtomicU32::new(0);

  fn probe() -> u32 {
    42
  }

  fn counting_selector() -> Selected<fn() -> u32> {
    SELECTOR_RUNS.fetch_add(1, Ordering::SeqCst);
    Selected::new("probe", probe)
  }

  #[test]
  fn selector_runs_exactly_once() {
    static DISPATCH: Dispatcher<fn() -> u32> = Dispatcher::new(counting_selector);

    let first = DISPATCH.get();
    let second = DISPATCH.get();
    assert_eq!(first.name, "probe");
    assert_eq!(second.name, "probe");
    assert_eq!((first.func)(), 42);
    assert_eq!(DISPATCH.name(), "probe");
    assert_eq!(SELECTOR_RUNS.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn concurrent_first_calls_agree() {
    static DISPATCH: Dispatcher<fn() -> u32> =
      Dispatcher::new(|| Selected::new("shared", probe));

    std::thread::scope(|scope| {
      let handles: Vec<_> =
        (0..8).map(|_| scope.spawn(|| DISPATCH.get().name)).collect();
      for handle in handles {
        assert_eq!(handle.join().unwrap(), "shared");
      }
    });
  }
}
