//! Centralized limits and thresholds for the type-analysis core.
//!
//! These are deliberately generous: they exist to turn pathological or
//! cyclic inputs into a bounded error instead of a stack overflow, not to
//! change accepted/rejected status for any well-formed input in §4's rules.

/// Recursion depth bound for LUB computation (spec §4.3: "if infinite
/// regress is detected by stack-depth bound, fall back to the root type at
/// that position").
pub const LUB_RECURSION_LIMIT: usize = 128;

/// Recursion depth bound for subtype checks through variable-type bounds
/// (spec §4.1 rules 7–8, which recurse transitively through bounds).
pub const SUBTYPE_RECURSION_LIMIT: usize = 256;

/// Maximum number of type parameters jointly captured by a single
/// existential produced during LUB's invariant-argument handling (spec
/// §4.3). Existentials beyond this are rejected with a `TypeError` rather
/// than silently truncated.
pub const MAX_JOINT_CAPTURE: usize = 64;
