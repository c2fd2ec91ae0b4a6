//! The type-analysis pass over an already-scope-resolved AST (spec §1, §4).
//!
//! `ilex-ir` owns the type algebra and the definitions it operates over;
//! this crate is the pass that drives that algebra against a parsed,
//! scope-resolved program and writes the results into `CompileInfo`.

pub mod ast;
pub mod call;
pub mod error;
pub mod expr;
pub mod override_resolution;
pub mod pass;
pub mod pattern;
pub mod scope;
pub mod variance;

pub use ast::{Expr, Module, Pattern, Stmt};
pub use call::{candidates_from, resolve_call, Candidate, ResolvedCall, SiteKind};
pub use expr::{synthesize, SynthesisContext};
pub use override_resolution::{gather_ancestor_candidates, requires_explicit_return_type, resolve_overrides};
pub use pass::{set_class_supertypes, DeclaredFunctionType, TypeAnalysisPass};
pub use pattern::{bound_type_for_test, is_statically_testable, type_pattern, TestArgument};
pub use scope::AnalysisOptions;
pub use variance::{check_slot, check_slot_result, Slot};
