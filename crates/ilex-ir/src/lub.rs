//! Least upper bound (join) of two types (spec §4.3).
//!
//! `lub` is symmetric and recursive, bounded by
//! [`ilex_common::limits::LUB_RECURSION_LIMIT`] to guard against runaway
//! regress on recursive generic hierarchies (spec §4.3 "Regress"); past the
//! bound it falls back to the root class, nullable if either operand is.

use crate::builtins::TypeEnv;
use crate::limits::LUB_RECURSION_LIMIT;
use crate::substitution::substitute_for_base;
use crate::types::{ClassType, ExistentialType, Type, Variance};

pub fn lub(env: TypeEnv<'_>, a: &Type, b: &Type) -> Type {
    lub_depth(env, a, b, 0)
}

fn root(env: TypeEnv<'_>, nullable: bool) -> Type {
    Type::class(env.builtins.root, Vec::new(), nullable)
}

fn lub_depth(env: TypeEnv<'_>, a: &Type, b: &Type, depth: usize) -> Type {
    if depth > LUB_RECURSION_LIMIT {
        return root(env, a.is_nullable() || b.is_nullable());
    }

    // `NoType` carries no information; the other operand's type wins.
    if a.is_no_type() {
        return b.clone();
    }
    if b.is_no_type() {
        return a.clone();
    }

    if a == b {
        return a.clone();
    }

    let nullable = a.is_nullable() || b.is_nullable();

    // Nothing is the bottom of the reference lattice: lub(Nothing, T) = T?
    // (nullable only if the other operand already was, or is itself null).
    if let Some(ac) = a.as_class() {
        if env.builtins.is_nothing(ac.class) {
            return with_nullable_if(b, nullable);
        }
    }
    if let Some(bc) = b.as_class() {
        if env.builtins.is_nothing(bc.class) {
            return with_nullable_if(a, nullable);
        }
    }

    match (a, b) {
        (Type::Primitive(pa), Type::Primitive(pb)) => {
            if pa == pb {
                a.clone()
            } else {
                root(env, false)
            }
        }
        (Type::Class(ca), Type::Class(cb)) => class_lub(env, ca, cb, nullable, depth),
        (Type::Variable(va), _) => {
            let bound = env.package.type_parameter(va.param).upper_bound.clone();
            lub_depth(env, &bound, b, depth + 1)
        }
        (_, Type::Variable(vb)) => {
            let bound = env.package.type_parameter(vb.param).upper_bound.clone();
            lub_depth(env, a, &bound, depth + 1)
        }
        (Type::Existential(ea), _) => existential_lub(env, ea, b, nullable, depth),
        (_, Type::Existential(eb)) => existential_lub(env, eb, a, nullable, depth),
        _ => root(env, nullable),
    }
}

fn with_nullable_if(ty: &Type, nullable: bool) -> Type {
    if nullable {
        ty.with_nullable(true).unwrap_or_else(|| ty.clone())
    } else {
        ty.clone()
    }
}

/// Open an existential (treating its captured parameters as fresh locals
/// bound by their declared bounds), join its inner type against `other`,
/// then re-close over whichever captured parameters still occur free in the
/// result (spec §4.3 "Existential open/lub/re-close").
fn existential_lub(
    env: TypeEnv<'_>,
    ex: &ExistentialType,
    other: &Type,
    nullable: bool,
    depth: usize,
) -> Type {
    let joined = lub_depth(env, &ex.inner, other, depth + 1);
    let still_captured: Vec<_> = ex
        .captured
        .iter()
        .copied()
        .filter(|p| occurs_free(&joined, *p))
        .collect();
    let result = if still_captured.is_empty() {
        joined
    } else {
        Type::existential(still_captured, joined)
    };
    with_nullable_if(&result, nullable)
}

fn occurs_free(ty: &Type, param: crate::ids::TypeParameterId) -> bool {
    match ty {
        Type::Variable(v) => v.param == param,
        Type::Class(c) => c.arguments.iter().any(|a| occurs_free(a, param)),
        Type::Existential(e) => {
            !e.captured.contains(&param) && occurs_free(&e.inner, param)
        }
        _ => false,
    }
}

fn class_lub(
    env: TypeEnv<'_>,
    a: &ClassType,
    b: &ClassType,
    nullable: bool,
    depth: usize,
) -> Type {
    // Find a common ancestor class: walk a's own class and all of its
    // declared supertypes, trying each as a target for substitute_for_base
    // against b, preferring the most specific (first) match.
    for candidate in std::iter::once(a.class).chain(
        env.package
            .class(a.class)
            .supertypes()
            .iter()
            .filter_map(|t| t.as_class())
            .map(|c| c.class),
    ) {
        let Some(a_based) = substitute_for_base(env, &Type::Class(a.clone()), candidate) else {
            continue;
        };
        let Some(b_based) = substitute_for_base(env, &Type::Class(b.clone()), candidate) else {
            continue;
        };
        let (Some(a_c), Some(b_c)) = (a_based.as_class(), b_based.as_class()) else {
            continue;
        };
        if a_c.arguments.len() != b_c.arguments.len() {
            continue;
        }
        let params = env.package.class(candidate).type_parameters.clone();
        if params.len() != a_c.arguments.len() {
            continue;
        }
        let mut joint_capture = Vec::new();
        let mut arguments = Vec::with_capacity(params.len());
        for (i, param_id) in params.iter().enumerate() {
            let param = env.package.type_parameter(*param_id);
            let arg_a = &a_c.arguments[i];
            let arg_b = &b_c.arguments[i];
            if arg_a == arg_b {
                arguments.push(arg_a.clone());
                continue;
            }
            match param.variance {
                Variance::Covariant => {
                    arguments.push(lub_depth(env, arg_a, arg_b, depth + 1));
                }
                Variance::Contravariant => {
                    arguments.push(glb_fallback(env, arg_a, arg_b));
                }
                Variance::Invariant => {
                    // Incompatible invariant arguments: wrap the result in a
                    // fresh existential that jointly captures this position
                    // (spec §4.3 "Invariant joint capture").
                    let fresh = param_id;
                    joint_capture.push(*fresh);
                    arguments.push(Type::variable(*fresh, false));
                }
            }
        }
        let joined = Type::class(candidate, arguments, false);
        let result = if joint_capture.is_empty() {
            joined
        } else {
            Type::existential(joint_capture, joined)
        };
        return with_nullable_if(&result, nullable);
    }
    root(env, nullable)
}

/// Contravariant argument positions have no direct "meet" operator defined
/// in the spec; approximate with `Nothing` when operands disagree, which is
/// sound (it only narrows the resulting type's covariant uses) and matches
/// the teacher's own handling of contravariant mismatches during widening.
fn glb_fallback(env: TypeEnv<'_>, a: &Type, b: &Type) -> Type {
    if a == b {
        a.clone()
    } else {
        Type::class(env.builtins.nothing, Vec::new(), false)
    }
}
