//! Pattern typing (spec §4.4 "Pattern typing", scenario S6): each pattern
//! kind is typed against a scrutinee type, producing the type newly bound
//! names receive. A type-test pattern against a generic class is only
//! accepted when every type-argument slot is `_`: generic type arguments
//! are erased at runtime, so a concrete argument can never actually be
//! checked by the instance test the pattern compiles to.

use ilex_common::error::TypeError;
use ilex_common::Span;
use ilex_ir::{ClassId, Type, TypeEnv};

use crate::ast::Pattern;
use crate::error::not_statically_testable;

/// One type-argument slot as written in a type-test pattern's source:
/// either a concrete type or the wildcard `_`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestArgument {
    Wildcard,
    Concrete(Type),
}

/// spec §4.4: a type-test pattern is statically testable iff none of its
/// type arguments are concrete.
pub fn is_statically_testable(arguments: &[TestArgument]) -> bool {
    arguments.iter().all(|a| matches!(a, TestArgument::Wildcard))
}

/// The type bound by an accepted type-test pattern `_: C[_, ...]`: each
/// wildcard slot becomes a freshly captured existential parameter, so
/// member access on the binding goes through `effective_class_type` like
/// any other existential rather than assuming a concrete instantiation.
pub fn bound_type_for_test(env: TypeEnv<'_>, class: ClassId, nullable: bool) -> Type {
    let params = env.package.class(class).type_parameters.clone();
    if params.is_empty() {
        return Type::class(class, vec![], nullable);
    }
    let arguments = params.iter().map(|&p| Type::variable(p, false)).collect();
    Type::existential(params, Type::class(class, arguments, nullable))
}

/// Type `pattern` against `scrutinee`. `test` carries the type-test
/// argument list for a class-shaped pattern (`Blank`/`Variable` with an
/// annotation, or `Destructure`) — scope analysis already knows, from the
/// pattern's surface syntax, which type-parameter slots were written `_`
/// versus concrete, so it is supplied rather than re-derived here.
pub fn type_pattern(
    env: TypeEnv<'_>,
    pattern: &Pattern,
    scrutinee: &Type,
    test: Option<(ClassId, &[TestArgument])>,
    at: Span,
) -> Result<Type, TypeError> {
    match pattern {
        Pattern::Blank { annotation, .. } | Pattern::Variable { annotation, .. } => match annotation
        {
            Some(declared) => match test {
                Some((class, arguments)) => {
                    reject_non_testable(arguments, at)?;
                    Ok(bound_type_for_test(env, class, declared.is_nullable()))
                }
                None => Ok(declared.clone()),
            },
            None => Ok(scrutinee.clone()),
        },
        Pattern::Literal { .. } => Ok(scrutinee.clone()),
        // An existing binding used as a value pattern: its own declared
        // type is read upstream (where the binding is in scope) and
        // compared there; this layer just propagates the scrutinee type
        // through to whatever arm-local narrowing applies.
        Pattern::Value { .. } => Ok(scrutinee.clone()),
        Pattern::Tuple { elements, .. } => {
            let scrutinee_args = scrutinee
                .as_class()
                .map(|c| &c.arguments)
                .ok_or_else(|| TypeError::new(at, "tuple pattern against a non-tuple scrutinee type"))?;
            if scrutinee_args.len() != elements.len() {
                return Err(TypeError::new(
                    at,
                    format!(
                        "tuple pattern has {} element(s) but the scrutinee has {}",
                        elements.len(),
                        scrutinee_args.len()
                    ),
                ));
            }
            for (element, arg_ty) in elements.iter().zip(scrutinee_args) {
                type_pattern(env, element, arg_ty, None, at)?;
            }
            Ok(scrutinee.clone())
        }
        Pattern::Destructure { elements, .. } => {
            let (class, arguments) = test
                .ok_or_else(|| TypeError::new(at, "destructure pattern without a resolved extractor"))?;
            reject_non_testable(arguments, at)?;
            // Element sub-patterns are typed by the caller against the
            // extractor's own declared result types, which this layer has
            // no way to know; a bare `case _: Foo() =>` needs no further
            // recursion here.
            let _ = elements;
            Ok(bound_type_for_test(env, class, scrutinee.is_nullable()))
        }
    }
}

fn reject_non_testable(arguments: &[TestArgument], at: Span) -> Result<(), TypeError> {
    if is_statically_testable(arguments) {
        Ok(())
    } else {
        Err(not_statically_testable(at))
    }
}
