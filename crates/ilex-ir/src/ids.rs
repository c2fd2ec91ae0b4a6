//! Identifiers for packages and definitions (C1).

use std::num::NonZeroU32;

/// Index of a `Package` within the compilation's package table. Index `0`
/// is reserved for the built-in package (bootstrapped root/nothing/null and
/// primitive-boxing classes, see SPEC_FULL.md's supplemented-features
/// section); it is always present and never has a `Dependency`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageIndex(pub u32);

impl PackageIndex {
    pub const BUILTIN: PackageIndex = PackageIndex(0);
}

/// Index of a definition within its owning package's class/trait/function/
/// global/field/type-parameter list. Which list it indexes is determined by
/// the `DefinitionId`'s context (a `ClassId`, `FunctionId`, ... newtype wraps
/// a `DefinitionId` and is only ever constructed from the matching list).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalIndex(pub u32);

/// Index of an extern record inside a `Dependency`'s corresponding parallel
/// list, when this id refers to a foreign definition. `None` for local ids.
///
/// Per spec §3: "the `externIndex` discriminates multiple extern records for
/// the same foreign id in cases that cannot occur in correct inputs but must
/// not cause silent aliasing" — so two `DefinitionId`s with equal
/// `(packageIndex, localIndex)` but different `externIndex` are NOT equal.
pub type ExternIndex = Option<NonZeroU32>;

/// `(packageIndex, localIndex, externIndex?)` — see spec §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DefinitionId {
    pub package: PackageIndex,
    pub local: LocalIndex,
    pub extern_index: ExternIndex,
}

impl DefinitionId {
    pub fn local(package: PackageIndex, local: LocalIndex) -> Self {
        DefinitionId {
            package,
            local,
            extern_index: None,
        }
    }

    pub fn foreign(package: PackageIndex, local: LocalIndex, extern_index: NonZeroU32) -> Self {
        DefinitionId {
            package,
            local,
            extern_index: Some(extern_index),
        }
    }

    /// A definition is local to `target` iff it lives in `target`'s package
    /// and carries no extern discriminator.
    pub fn is_local_to(&self, target: PackageIndex) -> bool {
        self.package == target && self.extern_index.is_none()
    }
}

macro_rules! typed_def_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub DefinitionId);

        impl $name {
            pub fn id(self) -> DefinitionId {
                self.0
            }
        }
    };
}

typed_def_id!(ClassId);
typed_def_id!(TraitId);
typed_def_id!(FunctionId);
typed_def_id!(FieldId);
typed_def_id!(GlobalId);
typed_def_id!(TypeParameterId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extern_index_discriminates_otherwise_equal_ids() {
        let p = PackageIndex(3);
        let l = LocalIndex(7);
        let a = DefinitionId::foreign(p, l, NonZeroU32::new(1).unwrap());
        let b = DefinitionId::foreign(p, l, NonZeroU32::new(2).unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn local_id_is_local_to_its_own_package_only() {
        let id = DefinitionId::local(PackageIndex(2), LocalIndex(0));
        assert!(id.is_local_to(PackageIndex(2)));
        assert!(!id.is_local_to(PackageIndex(3)));
    }
}
