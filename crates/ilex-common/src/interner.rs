//! String interning for identifier deduplication.
//!
//! `Name` components (package/class/function identifiers) are interned so
//! that equality and hashing of a `Name` reduce to comparing small integers
//! instead of byte slices.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// Index into an `Interner`'s table. Cheap to copy, compare, and hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(u32);

impl Atom {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A simple append-only string interner.
///
/// Not thread-safe by design: the analyzer is single-threaded (see spec §5),
/// so there is no need for the sharding or locking a multi-threaded host
/// would require.
#[derive(Default)]
pub struct Interner {
    strings: RefCell<Vec<Box<str>>>,
    lookup: RefCell<FxHashMap<Box<str>, Atom>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Atom {
        if let Some(&atom) = self.lookup.borrow().get(s) {
            return atom;
        }
        let mut strings = self.strings.borrow_mut();
        let atom = Atom(strings.len() as u32);
        strings.push(s.into());
        self.lookup.borrow_mut().insert(s.into(), atom);
        atom
    }

    pub fn resolve(&self, atom: Atom) -> std::cell::Ref<'_, str> {
        std::cell::Ref::map(self.strings.borrow(), |v| &*v[atom.index()])
    }

    pub fn len(&self) -> usize {
        self.strings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
