//! Pass configuration and the scope-analysis contract the pass consumes
//! (spec §6 "Inputs to the analyzer").
//!
//! `DefnInfo`/`UseInfo`/`NodeId` are produced by scope analysis (out of
//! scope, spec §1) and live in `ilex_ir::compile_info`; re-exported here so
//! callers of this crate don't need to depend on `ilex-ir` directly for
//! them. `PackageLoader` is likewise owned by `ilex-extern`, since
//! externalization and the pass share the same notion of "a foreign
//! package, resolvable by name or by index".

pub use ilex_extern::PackageLoader;
pub use ilex_ir::{CallInfo, ClosureInfo, CompileInfo, DefnInfo, NodeId, ReceiverStrategy, ScopeId, UseInfo};

/// Tunables for the pass (SPEC_FULL.md's "AMBIENT STACK" Configuration
/// section). Mirrors the shape of the teacher's `CheckerOptions`: small,
/// `Copy`, constructed once per compilation and threaded by value.
#[derive(Clone, Copy, Debug)]
pub struct AnalysisOptions {
    /// Bound on `is_subtype`/`lub` recursion depth before giving up and
    /// falling back to a safe default (see `ilex_common::limits`).
    pub max_recursion_depth: usize,
    /// When `true`, a concrete method with a non-empty override set but no
    /// `override` modifier is an error (spec §4.4); when `false`, only the
    /// reverse direction (modifier present, empty set) is enforced. Exists
    /// so a host embedding an older dialect can relax the stricter half of
    /// the rule during a migration.
    pub strict_override_modifier: bool,
    /// Cap on how many type parameters a single existential-lub joint
    /// capture may introduce in one step (spec §4.3), guarding against
    /// pathological generic hierarchies blowing up existential arity.
    pub max_joint_capture: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            max_recursion_depth: ilex_common::limits::SUBTYPE_RECURSION_LIMIT,
            strict_override_modifier: true,
            max_joint_capture: ilex_common::limits::MAX_JOINT_CAPTURE,
        }
    }
}
