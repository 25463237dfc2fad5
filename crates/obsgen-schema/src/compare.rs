//! Name ordering over event members.
//!
//! Ordinal comparison (`str` ordering is byte-wise, which for UTF-8 matches
//! code point order) so output never depends on locale.

use crate::node::EventMember;
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

#[must_use]
pub fn compare(a: &EventMember, b: &EventMember) -> Ordering {
    a.name.as_str().cmp(b.name.as_str())
}

#[must_use]
pub fn equals(a: &EventMember, b: &EventMember) -> bool {
    a.name == b.name
}

pub fn hash<H: Hasher>(member: &EventMember, state: &mut H) {
    member.name.hash(state);
}

///
/// ByName
///
/// Orders, compares and hashes an [`EventMember`] by name only, so ordered
/// sets of it deduplicate members re-declared along a hierarchy.
///

#[derive(Clone, Debug)]
pub struct ByName(pub EventMember);

impl ByName {
    #[must_use]
    pub fn into_inner(self) -> EventMember {
        self.0
    }
}

impl PartialEq for ByName {
    fn eq(&self, other: &Self) -> bool {
        equals(&self.0, &other.0)
    }
}

impl Eq for ByName {}

impl PartialOrd for ByName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByName {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}

impl Hash for ByName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash(&self.0, state);
    }
}
