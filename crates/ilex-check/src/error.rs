//! Shared `TypeError` message constructors for the pass.
//!
//! `ilex_common::error` owns the three error *kinds* (spec §7); this module
//! just centralizes the wording for a handful of messages raised from more
//! than one place in the pass, so the phrasing a host's diagnostics surface
//! stays consistent regardless of which check produced the error.

use ilex_common::error::TypeError;
use ilex_common::Span;

pub fn not_statically_testable(at: Span) -> TypeError {
    TypeError::new(
        at,
        "type-test pattern checks a concrete type argument at runtime; generic type \
         arguments are erased — use `_` instead",
    )
}

pub fn variance_violation(at: Span, parameter_name: &str) -> TypeError {
    TypeError::new(
        at,
        format!(
            "type parameter `{parameter_name}` is used in a position its declared variance \
             does not allow"
        ),
    )
}

pub fn ambiguous_call(at: Span) -> TypeError {
    TypeError::new(
        at,
        "ambiguous call: multiple equally-specific candidates (static-ness does not \
         disambiguate)",
    )
}

pub fn generic_call_site_arity_mismatch(at: Span, declared: usize, supplied: usize) -> TypeError {
    TypeError::new(
        at,
        format!(
            "callee declares {declared} type parameter(s) but the call site supplies \
             {supplied} type argument(s); type-argument inference is not implemented, so a \
             generic call site must supply them explicitly"
        ),
    )
}
