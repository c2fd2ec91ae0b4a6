//! `PackageLoader`: the analyzer's sole gateway to foreign packages (spec
//! §6 "Inputs to the analyzer").
//!
//! The spec names a single operation, `load(name) -> Package`, for
//! resolving a qualified package name on first reference. Once a package is
//! loaded it is referenced again and again by `PackageIndex` — from
//! `UseInfo` slots, from nested type expressions inside an already-loaded
//! foreign package's own definitions, from override chains — so the
//! loader is also the index-keyed table those later lookups go through;
//! the spec doesn't describe that table explicitly, but some such registry
//! has to exist for `PackageIndex`-keyed resolution to work at all (see
//! DESIGN.md).

use ilex_common::{ScopeError, Span};
use ilex_ir::{Name, Package, PackageIndex};

/// Implemented by the host embedding the analyzer. `load` is called the
/// first time a qualified name is referenced and has not yet been
/// resolved to a `PackageIndex`; `package` is called on every subsequent
/// reference to a package already known by index.
pub trait PackageLoader {
    /// Resolve `name` to a package, loading it if this is the first
    /// reference. Returns the package's stable index.
    fn load(&mut self, name: &Name, at: Span) -> Result<PackageIndex, ScopeError>;

    /// Look up an already-loaded package by index. Panics if `index` was
    /// never returned by a prior `load` call — a caller holding a
    /// `PackageIndex` at all implies it came from somewhere that already
    /// loaded the package.
    fn package(&self, index: PackageIndex) -> &Package;
}

/// An in-memory `PackageLoader` over a fixed, pre-populated set of
/// packages — what the test-tooling and `ilex-check`'s scenario tests use
/// in place of a real multi-package build (spec's AMBIENT STACK "Test
/// tooling": build `Package` state directly, no parser/loader fixtures).
pub struct FixedPackageLoader {
    packages: Vec<Package>,
    by_name: rustc_hash::FxHashMap<Vec<ilex_common::Atom>, PackageIndex>,
}

impl FixedPackageLoader {
    pub fn new() -> Self {
        FixedPackageLoader {
            packages: Vec::new(),
            by_name: rustc_hash::FxHashMap::default(),
        }
    }

    pub fn register(&mut self, package: Package) -> PackageIndex {
        let index = package.index;
        self.by_name
            .insert(package.name.components().to_vec(), index);
        self.packages.push(package);
        index
    }

    fn slot(&self, index: PackageIndex) -> usize {
        self.packages
            .iter()
            .position(|p| p.index == index)
            .expect("PackageIndex not registered with this loader")
    }
}

impl Default for FixedPackageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageLoader for FixedPackageLoader {
    fn load(&mut self, name: &Name, at: Span) -> Result<PackageIndex, ScopeError> {
        self.by_name
            .get(name.components())
            .copied()
            .ok_or_else(|| ScopeError::new(at, "no such package".to_string()))
    }

    fn package(&self, index: PackageIndex) -> &Package {
        &self.packages[self.slot(index)]
    }
}
