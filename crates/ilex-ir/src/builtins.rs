//! Well-known built-in classes (root, nothing, null) and the shared context
//! the type algebra operates against.
//!
//! The data model (spec §3) lists the type algebra's kinds as "primitive,
//! class, variable, existential, nothing/null, no-type" but only five
//! `Type` variants are given. `Nothing` and `Null` are not a sixth kind:
//! they are ordinary `ClassType`s naming these well-known classes (see
//! DESIGN.md). Their identity is threaded explicitly through `TypeEnv`
//! rather than hard-coded to a fixed package/local index, since nothing in
//! the spec requires built-ins to live at a specific index and hard-coding
//! one would be an invented constraint.

use crate::ids::ClassId;
use crate::package::Package;

#[derive(Clone, Copy, Debug)]
pub struct BuiltinIds {
    /// The single root of the class lattice (spec §3 invariant 2: every
    /// class's `supertypes` list "ends with the root").
    pub root: ClassId,
    /// Bottom reference type (spec §4.1 rule 2).
    pub nothing: ClassId,
    /// The class whose sole instance is the null type (spec §4.1 rule 3).
    pub null: ClassId,
}

impl BuiltinIds {
    pub fn is_root(&self, id: ClassId) -> bool {
        id == self.root
    }

    pub fn is_nothing(&self, id: ClassId) -> bool {
        id == self.nothing
    }

    pub fn is_null(&self, id: ClassId) -> bool {
        id == self.null
    }
}

/// Shared read context for subtype/substitution/lub queries: the package
/// whose definition tables are consulted, plus the identity of the
/// well-known classes. Analogous to the teacher's `CheckerContext` —
/// bundled so algebra functions take one parameter instead of two.
#[derive(Clone, Copy)]
pub struct TypeEnv<'a> {
    pub package: &'a Package,
    pub builtins: &'a BuiltinIds,
}

impl<'a> TypeEnv<'a> {
    pub fn new(package: &'a Package, builtins: &'a BuiltinIds) -> Self {
        TypeEnv { package, builtins }
    }
}
