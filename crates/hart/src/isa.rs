//! The closed ISA extension vocabulary.
//!
//! A compile-time constant table of every identifier the descriptor parser
//! recognizes, with the group/member relations consulted by the closure
//! step. The vocabulary is fixed at build time; nothing here is loaded or
//! extended at runtime.

use crate::caps::{Caps, ext};

/// What role an identifier plays in the vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtKind {
  /// A base ISA (`i`, `e`).
  Base,
  /// An ordinary extension.
  Member,
  /// An umbrella identifier implying a fixed member set.
  Group,
}

/// One vocabulary entry.
#[derive(Clone, Copy, Debug)]
pub struct ExtSpec {
  /// The literal identifier as it appears in a descriptor.
  pub name: &'static str,
  /// The presence bit for this identifier.
  pub flag: Caps,
  /// Role of the identifier.
  pub kind: ExtKind,
  /// For groups, the full member mask; `Caps::NONE` otherwise.
  pub members: Caps,
}

impl ExtSpec {
  const fn new(name: &'static str, flag: Caps, kind: ExtKind) -> Self {
    Self { name, flag, kind, members: Caps::NONE }
  }

  const fn group(name: &'static str, flag: Caps, members: Caps) -> Self {
    Self { name, flag, kind: ExtKind::Group, members }
  }
}

/// The full vocabulary, in declaration order.
///
/// The parser resolves ambiguity by longest match first, with declaration
/// order breaking ties, so the order here only matters between identifiers
/// of equal length (of which there are no conflicting pairs today).
pub const TABLE: &[ExtSpec] = &[
  ExtSpec::new("i", ext::I, ExtKind::Base),
  ExtSpec::new("e", ext::E, ExtKind::Base),
  ExtSpec::new("m", ext::M, ExtKind::Member),
  ExtSpec::new("a", ext::A, ExtKind::Member),
  ExtSpec::new("f", ext::F, ExtKind::Member),
  ExtSpec::new("d", ext::D, ExtKind::Member),
  ExtSpec::new("q", ext::Q, ExtKind::Member),
  ExtSpec::new("c", ext::C, ExtKind::Member),
  ExtSpec::new("v", ext::V, ExtKind::Member),
  ExtSpec::new("h", ext::H, ExtKind::Member),
  ExtSpec::new("zicsr", ext::ZICSR, ExtKind::Member),
  ExtSpec::new("zifencei", ext::ZIFENCEI, ExtKind::Member),
  ExtSpec::new("zicbom", ext::ZICBOM, ExtKind::Member),
  ExtSpec::new("zicboz", ext::ZICBOZ, ExtKind::Member),
  ExtSpec::new("zihintpause", ext::ZIHINTPAUSE, ExtKind::Member),
  ExtSpec::new("zawrs", ext::ZAWRS, ExtKind::Member),
  ExtSpec::new("zba", ext::ZBA, ExtKind::Member),
  ExtSpec::new("zbb", ext::ZBB, ExtKind::Member),
  ExtSpec::new("zbc", ext::ZBC, ExtKind::Member),
  ExtSpec::new("zbs", ext::ZBS, ExtKind::Member),
  ExtSpec::group("g", ext::G, ext::G_MEMBERS),
  ExtSpec::group("b", ext::B, ext::B_MEMBERS),
];

/// The group relations, as `(group flag, member mask)` pairs.
pub const GROUPS: &[(Caps, Caps)] = &[(ext::G, ext::G_MEMBERS), (ext::B, ext::B_MEMBERS)];

/// Number of identifiers in the vocabulary; bounds the closure round count.
pub const VOCABULARY_SIZE: u32 = TABLE.len() as u32;

// Group member lists must not contain group flags: the closure algorithm
// relies on the relation being acyclic.
const _: () = {
  let group_flags = ext::G.0 | ext::B.0;
  let mut i = 0;
  while i < GROUPS.len() {
    assert!(GROUPS[i].1.0 & group_flags == 0, "group member lists must be acyclic");
    assert!(GROUPS[i].1.0 != 0, "a group must declare at least one member");
    i += 1;
  }
};
