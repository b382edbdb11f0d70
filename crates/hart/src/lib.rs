//! RISC-V hart capability discovery.
//!
//! This crate turns an untrusted textual description of a hart (a
//! `-march`-style descriptor plus a handful of numeric tunables, looked up
//! in a `NAME=value` environment) into a typed, immutable capability set.
//! The companion `routines` crate consumes that set to bind each string and
//! memory routine to its best available variant.
//!
//! # Quick Start
//!
//! ```
//! use hart::{Environ, Xlen, discover, ext};
//!
//! let entries = ["RISCV_RT_MARCH=rv64gc_zbb", "RISCV_RT_CBOZ_BLOCKSIZE=64"];
//! let caps = discover(Environ::new(&entries));
//!
//! assert_eq!(caps.xlen, Xlen::Rv64);
//! assert!(caps.has(ext::M | ext::ZBB));
//! assert!(caps.cboz_blocksize.equals(64));
//! ```
//!
//! Under `std`, [`get`] performs discovery against the real process
//! environment exactly once and returns the cached set thereafter.
//!
//! # Design Notes
//!
//! - **All-or-nothing parsing.** A malformed descriptor yields no
//!   capabilities rather than a partial set; see [`march`].
//! - **Closed vocabulary.** Only identifiers in [`isa::TABLE`] are
//!   recognized; unknown extensions fail the parse instead of being skipped.
//! - **No allocation in the core path.** Discovery borrows from the
//!   environment it is given; the crate is `no_std` by default.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
pub mod detect;
pub mod early;
pub mod isa;
pub mod march;
pub mod tunables;

pub use caps::{Caps, HartCaps, Xlen, ext};
pub use detect::{
  CBOM_BLOCKSIZE_KEY, CBOZ_BLOCKSIZE_KEY, FAST_UNALIGNED_KEY, MARCH_KEY, OverrideError, discover,
};
pub use early::Environ;
pub use march::March;
pub use tunables::Tunable;

#[cfg(feature = "std")]
pub use detect::{clear_override, get, has_override, set_override, try_set_override};
