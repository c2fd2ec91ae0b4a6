//! Qualified names (C1).
//!
//! A `Name` is an ordered sequence of interned string components plus an
//! optional *source name* — the unqualified spelling the user wrote, kept
//! around purely for diagnostics (e.g. `foo.bar.Baz` has components
//! `["foo", "bar", "Baz"]` and source name `"Baz"`).
//!
//! Equality and hashing are by component sequence only; the source name
//! never participates so that two `Name`s referring to the same qualified
//! entity compare equal regardless of how they were spelled at the use site.

use ilex_common::Atom;
use smallvec::SmallVec;

/// Reserved component strings with a fixed meaning to the analyzer. These
/// can never be produced by a legal user-level identifier (the scope-analysis
/// layer that hands us `Name`s guarantees this), so a name ending in one of
/// these is unambiguously synthetic.
pub mod reserved {
    pub const CONSTRUCTOR: &str = "$constructor";
    pub const CLASS_INIT: &str = "$init";
    pub const THIS: &str = "$this";
    pub const EXISTENTIAL_CAPTURE: &str = "$exist";
    pub const LAMBDA: &str = "$lambda";
}

#[derive(Clone, Debug, Eq)]
pub struct Name {
    components: SmallVec<[Atom; 4]>,
    source_name: Option<Atom>,
}

impl Name {
    pub fn new(components: impl IntoIterator<Item = Atom>, source_name: Option<Atom>) -> Self {
        Name {
            components: components.into_iter().collect(),
            source_name,
        }
    }

    pub fn single(component: Atom) -> Self {
        Name {
            components: SmallVec::from_slice(&[component]),
            source_name: Some(component),
        }
    }

    pub fn components(&self) -> &[Atom] {
        &self.components
    }

    pub fn source_name(&self) -> Option<Atom> {
        self.source_name
    }

    /// The last component, i.e. the unqualified name, regardless of whether
    /// an explicit source name was recorded.
    pub fn short_name(&self) -> Option<Atom> {
        self.components.last().copied()
    }

    pub fn is_reserved_suffix(&self, interner: &ilex_common::Interner, suffix: &str) -> bool {
        match self.short_name() {
            Some(atom) => &*interner.resolve(atom) == suffix,
            None => false,
        }
    }

    pub fn is_constructor(&self, interner: &ilex_common::Interner) -> bool {
        self.is_reserved_suffix(interner, reserved::CONSTRUCTOR)
    }

    pub fn append(&self, component: Atom) -> Self {
        let mut components = self.components.clone();
        components.push(component);
        Name {
            components,
            source_name: Some(component),
        }
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl std::hash::Hash for Name {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilex_common::Interner;

    #[test]
    fn equality_ignores_source_name() {
        let interner = Interner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let n1 = Name::new([a, b], Some(a));
        let n2 = Name::new([a, b], Some(b));
        assert_eq!(n1, n2);
    }

    #[test]
    fn constructor_suffix_detected() {
        let interner = Interner::new();
        let class = interner.intern("Foo");
        let ctor = interner.intern(reserved::CONSTRUCTOR);
        let name = Name::new([class, ctor], None);
        assert!(name.is_constructor(&interner));
    }
}
