//! Modifier flags (C2).
//!
//! A finite, fixed set of definition/variable modifiers, encoded as a single
//! bitset so a flag set round-trips losslessly through the 32-bit wire
//! encoding the downstream package-serialization layer uses (spec §6: "a
//! flag set can be re-derived from its bits and vice versa").
//!
//! Flags are grouped into *conflict groups*: modifiers that are mutually
//! exclusive on the same definition (e.g. a definition cannot be both
//! `PUBLIC` and `PRIVATE`). `Flags::conflicts` reports any group with more
//! than one bit set so callers can raise the appropriate `InheritanceError`
//! or `TypeError` at definition-build time.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        // Visibility group (mutually exclusive)
        const PUBLIC    = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE   = 1 << 2;

        // Mutability group (fields/variables; mutually exclusive)
        const LET = 1 << 3;
        const VAR = 1 << 4;

        // Independent modifiers
        const STATIC   = 1 << 5;
        const ABSTRACT = 1 << 6;
        const OVERRIDE = 1 << 7;
        const FINAL    = 1 << 8;
        const NATIVE   = 1 << 9;

        // Set by externalization (C6), never by the scope/type pass on a
        // local definition.
        const EXTERN = 1 << 10;

        // Array-bearing class compile hint (C3: "optional array-element
        // type + compile hints").
        const ARRAY_CLASS = 1 << 11;
    }
}

/// A group of flags of which at most one may be set on a well-formed
/// definition.
struct ConflictGroup {
    name: &'static str,
    members: Flags,
}

const CONFLICT_GROUPS: &[ConflictGroup] = &[
    ConflictGroup {
        name: "visibility",
        members: Flags::PUBLIC.union(Flags::PROTECTED).union(Flags::PRIVATE),
    },
    ConflictGroup {
        name: "mutability",
        members: Flags::LET.union(Flags::VAR),
    },
    ConflictGroup {
        name: "abstract/final",
        members: Flags::ABSTRACT.union(Flags::FINAL),
    },
    ConflictGroup {
        name: "abstract/native",
        members: Flags::ABSTRACT.union(Flags::NATIVE),
    },
];

impl Flags {
    /// Flags minus those that are meaningless once projected into another
    /// package (spec §4.6: "flag set minus locally-irrelevant flags, plus
    /// the flag `EXTERN`").
    pub fn externalized(self) -> Flags {
        (self - Flags::OVERRIDE - Flags::NATIVE) | Flags::EXTERN
    }

    /// Names of conflict groups with more than one member set. Empty for a
    /// well-formed flag set.
    pub fn conflicts(self) -> Vec<&'static str> {
        CONFLICT_GROUPS
            .iter()
            .filter(|g| (self & g.members).bits().count_ones() > 1)
            .map(|g| g.name)
            .collect()
    }

    pub fn to_wire(self) -> u32 {
        self.bits()
    }

    pub fn from_wire(bits: u32) -> Option<Flags> {
        Flags::from_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roundtrip_is_bijective_on_known_bits() {
        let f = Flags::PUBLIC | Flags::STATIC | Flags::ABSTRACT;
        let bits = f.to_wire();
        assert_eq!(Flags::from_wire(bits), Some(f));
    }

    #[test]
    fn conflicting_visibility_is_reported() {
        let f = Flags::PUBLIC | Flags::PRIVATE;
        assert_eq!(f.conflicts(), vec!["visibility"]);
    }

    #[test]
    fn non_conflicting_flags_report_nothing() {
        let f = Flags::PUBLIC | Flags::STATIC | Flags::LET;
        assert!(f.conflicts().is_empty());
    }

    #[test]
    fn abstract_final_and_abstract_native_are_reported_as_conflicts() {
        assert_eq!((Flags::ABSTRACT | Flags::FINAL).conflicts(), vec!["abstract/final"]);
        assert_eq!((Flags::ABSTRACT | Flags::NATIVE).conflicts(), vec!["abstract/native"]);
    }

    #[test]
    fn externalize_drops_override_and_native_but_adds_extern() {
        let f = Flags::PUBLIC | Flags::OVERRIDE | Flags::NATIVE;
        let ext = f.externalized();
        assert!(ext.contains(Flags::EXTERN));
        assert!(!ext.contains(Flags::OVERRIDE));
        assert!(!ext.contains(Flags::NATIVE));
        assert!(ext.contains(Flags::PUBLIC));
    }
}
