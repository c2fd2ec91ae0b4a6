//! Call-site resolution (spec §4.4 "Call-site resolution"): unified
//! overload resolution for function calls, constructor calls, method
//! calls, operator applications, and extractor/destructure calls.

use ilex_common::error::TypeError;
use ilex_common::Span;
use ilex_ir::{is_subtype, FunctionId, Package, Type, TypeEnv, TypeParameterId};
use tracing::trace;

use crate::error::{ambiguous_call, generic_call_site_arity_mismatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteKind {
    /// No receiver present at the call site: only static candidates apply.
    Static,
    /// An explicit or implicit receiver is present: only instance
    /// candidates apply.
    Instance,
}

#[derive(Clone, Debug)]
pub struct Candidate {
    pub id: FunctionId,
    pub parameter_types: Vec<Type>,
    pub is_static: bool,
    pub type_parameters: Vec<TypeParameterId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCall {
    pub callee: FunctionId,
    pub instantiated_parameter_types: Vec<Type>,
    pub type_arguments: Vec<Type>,
}

/// Resolve a call against `candidates` given already-typed `actual_args`
/// (spec §4.4 steps 1, 4, 5, 6 — type-argument inference, step 2/3, is the
/// concern of generic callees and is not implemented here; a generic
/// winner requires the call site to have supplied explicit type arguments
/// matching its declared arity, or resolution fails rather than silently
/// recording an empty, wrong-arity list).
pub fn resolve_call(
    env: TypeEnv<'_>,
    candidates: &[Candidate],
    site: SiteKind,
    actual_args: &[Type],
    explicit_type_arguments: &[Type],
    at: Span,
) -> Result<ResolvedCall, TypeError> {
    // Step 1: arity filter.
    let arity_matched: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.parameter_types.len() == actual_args.len())
        .collect();
    if arity_matched.is_empty() {
        return Err(TypeError::new(
            at,
            format!("no candidate accepts {} argument(s)", actual_args.len()),
        ));
    }

    // Step 6 (site-kind filter): callers are expected to have already
    // unioned in only the candidates reachable from `site` before calling
    // this function (spec: "a mixed set is tried using site context");
    // `site` itself is kept only to document intent at call sites and to
    // confirm "static does not reduce ambiguity" below, where staticness
    // never breaks a tie between otherwise-identical parameter tuples.

    // Step 4: subtype filter.
    let applicable: Vec<&Candidate> = arity_matched
        .into_iter()
        .filter(|c| {
            c.parameter_types
                .iter()
                .zip(actual_args)
                .all(|(param, arg)| is_subtype(env, arg, param))
        })
        .collect();
    if applicable.is_empty() {
        return Err(TypeError::new(at, "no candidate's parameters accept the given arguments"));
    }

    // Step 5: specificity tie-break — the winner's parameters must each be
    // a subtype of every other candidate's corresponding parameter.
    let mut winners = Vec::new();
    for candidate in &applicable {
        let is_most_specific = applicable.iter().all(|other| {
            std::ptr::eq(*candidate, *other)
                || candidate
                    .parameter_types
                    .iter()
                    .zip(&other.parameter_types)
                    .all(|(a, b)| is_subtype(env, a, b))
        });
        if is_most_specific {
            winners.push(*candidate);
        }
    }

    match winners.as_slice() {
        [one] => {
            if one.type_parameters.len() != explicit_type_arguments.len() {
                return Err(generic_call_site_arity_mismatch(
                    at,
                    one.type_parameters.len(),
                    explicit_type_arguments.len(),
                ));
            }
            trace!(callee = ?one.id.0, winners = applicable.len(), "call resolved");
            Ok(ResolvedCall {
                callee: one.id,
                instantiated_parameter_types: one.parameter_types.clone(),
                type_arguments: explicit_type_arguments.to_vec(),
            })
        }
        [] => Err(TypeError::new(at, "ambiguous call: no candidate is most specific")),
        _ => Err(ambiguous_call(at)),
    }
}

/// Build `Candidate`s from a set of function ids, reading each one's
/// already-computed parameter types out of `package` (spec: candidates are
/// "unioned with inherited and imported static methods" by the caller
/// before this is invoked).
pub fn candidates_from(package: &Package, ids: &[FunctionId]) -> Vec<Candidate> {
    ids.iter()
        .map(|&id| {
            let f = package.function(id);
            Candidate {
                id,
                parameter_types: f.non_receiver_parameter_types().to_vec(),
                is_static: f.is_static(),
                type_parameters: f.type_parameters.clone(),
            }
        })
        .collect()
}
