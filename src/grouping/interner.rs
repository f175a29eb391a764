//! Run-scoped string pool.
//!
//! Every distinct byte string is stored once and identified by a [`Symbol`].
//! Symbols are plain indices, so the grouping store hashes and compares
//! integers instead of whole fingerprints and names. The pool never evicts;
//! it is dropped in one piece together with the run that owns it.

use indexmap::IndexSet;

/// Canonical handle for an interned byte string.
///
/// Two symbols from the same [`Interner`] are equal exactly when the
/// strings they stand for are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(usize);

impl Symbol {
    /// Position of the string in the pool.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Insertion-ordered pool of owned byte strings.
#[derive(Debug, Default)]
pub struct Interner {
    strings: IndexSet<Box<[u8]>>,
}

impl Interner {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool with room for `capacity` strings.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            strings: IndexSet::with_capacity(capacity),
        }
    }

    /// Return the symbol for `bytes`, storing a copy on first sight.
    pub fn intern(&mut self, bytes: &[u8]) -> Symbol {
        if let Some(idx) = self.strings.get_index_of(bytes) {
            return Symbol(idx);
        }
        let (idx, _) = self.strings.insert_full(Box::from(bytes));
        Symbol(idx)
    }

    /// Look up an already interned string without inserting it.
    #[must_use]
    pub fn get(&self, bytes: &[u8]) -> Option<Symbol> {
        self.strings.get_index_of(bytes).map(Symbol)
    }

    /// The bytes a symbol stands for.
    ///
    /// # Panics
    ///
    /// Panics if the symbol came from a different pool and is out of range.
    #[must_use]
    pub fn resolve(&self, symbol: Symbol) -> &[u8] {
        &self.strings[symbol.index()]
    }

    /// Number of distinct strings in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Total payload bytes held by the pool.
    #[must_use]
    pub fn stored_bytes(&self) -> usize {
        self.strings.iter().map(|s| s.len()).sum()
    }
}
