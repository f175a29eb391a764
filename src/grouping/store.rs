//! Fingerprint → name-set grouping store.
//!
//! # Overview
//!
//! The store maps each canonical fingerprint to the [`Group`] of distinct
//! canonical names seen with it. A fingerprint enters the store on its
//! first record; later records only add names. Nothing is ever removed.
//!
//! Groups and their members are kept in first-seen order, so the same input
//! always produces the same report. Callers should still treat the order
//! between groups as unspecified.
//!
//! # Example
//!
//! ```
//! use fgroups::grouping::{GroupStore, Interner};
//!
//! let mut interner = Interner::new();
//! let mut store = GroupStore::new();
//!
//! let fp = interner.intern(b"abc123");
//! assert!(store.upsert(fp, interner.intern(b"file1.txt")));
//! assert!(store.upsert(fp, interner.intern(b"file2.txt")));
//! // Same name again: set semantics, nothing changes
//! assert!(!store.upsert(fp, interner.intern(b"file1.txt")));
//!
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.get(fp).unwrap().len(), 2);
//! assert_eq!(store.duplicate_groups().count(), 1);
//! ```

use indexmap::{IndexMap, IndexSet};

use super::interner::Symbol;

/// Initial bucket hint for a new store. Growth is unbounded.
pub const DEFAULT_STORE_CAPACITY: usize = 1024;

/// The distinct names recorded under one fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    members: IndexSet<Symbol>,
}

impl Group {
    /// Create a group holding a single name.
    #[must_use]
    pub fn with_member(name: Symbol) -> Self {
        let mut members = IndexSet::with_capacity(1);
        members.insert(name);
        Self { members }
    }

    /// Add a name. Returns `false` if it was already a member.
    pub fn insert(&mut self, name: Symbol) -> bool {
        self.members.insert(name)
    }

    /// Check if a name is a member.
    #[must_use]
    pub fn contains(&self, name: Symbol) -> bool {
        self.members.contains(&name)
    }

    /// Number of distinct names in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if this group has duplicates (2+ distinct names).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.members.len() > 1
    }

    /// Member names in first-seen order.
    pub fn members(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.members.iter().copied()
    }
}

/// Mapping from canonical fingerprint to [`Group`].
#[derive(Debug, Clone, Default)]
pub struct GroupStore {
    groups: IndexMap<Symbol, Group>,
}

impl GroupStore {
    /// Create a store with the default capacity hint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    /// Create a store with room for `capacity` fingerprints.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            groups: IndexMap::with_capacity(capacity),
        }
    }

    /// Record `name` under `fingerprint`.
    ///
    /// Creates the group on first sight of the fingerprint. Returns `true`
    /// when the name was not yet a member of the group.
    pub fn upsert(&mut self, fingerprint: Symbol, name: Symbol) -> bool {
        match self.groups.get_mut(&fingerprint) {
            Some(group) => group.insert(name),
            None => {
                self.groups.insert(fingerprint, Group::with_member(name));
                true
            }
        }
    }

    /// The group for a fingerprint, if any record carried it.
    #[must_use]
    pub fn get(&self, fingerprint: Symbol) -> Option<&Group> {
        self.groups.get(&fingerprint)
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every (fingerprint, group) pair, each exactly once.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Group)> + '_ {
        self.groups.iter().map(|(fp, group)| (*fp, group))
    }

    /// Only the groups with more than one distinct name.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = (Symbol, &Group)> + '_ {
        self.iter().filter(|(_, group)| group.has_duplicates())
    }

    /// Total number of (fingerprint, name) memberships.
    #[must_use]
    pub fn total_members(&self) -> usize {
        self.groups.values().map(Group::len).sum()
    }
}
