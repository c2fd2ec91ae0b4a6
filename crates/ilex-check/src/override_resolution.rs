//! Override resolution (spec §4.4 "Override resolution", scenario S5).
//!
//! Run after body checking of a class's own methods. For each method `m`,
//! collects same-named ancestor methods and decides which ones `m`
//! overrides by the covariant-parameter/contravariant-return rule, then
//! enforces the `override` modifier contract.

use ilex_common::error::InheritanceError;
use ilex_common::Span;
use ilex_ir::{is_subtype, DefinitionId, Flags, FunctionId, Package, TypeEnv};
use tracing::trace;

/// Ancestor methods sharing `m`'s (unqualified) name, gathered by the
/// caller by walking `class.supertypes()` via `substituteForBase` and
/// collecting same-named methods — name resolution itself lives upstream
/// of this module (scope analysis), so callers pass the candidate set in.
pub fn resolve_overrides(
    env: TypeEnv<'_>,
    m: FunctionId,
    ancestor_candidates: &[FunctionId],
    strict_modifier: bool,
    at: Span,
) -> Result<Vec<DefinitionId>, InheritanceError> {
    let method = env.package.function(m);
    let m_params = method.non_receiver_parameter_types();
    let m_return = method.return_type();

    let mut overrides = Vec::new();
    for &p in ancestor_candidates {
        let ancestor = env.package.function(p);
        let p_params = ancestor.non_receiver_parameter_types();
        if p_params.len() != m_params.len() {
            continue;
        }
        // Covariant override of params: m's parameter tuple is a pointwise
        // supertype of p's (each ancestor param is a subtype of m's).
        let params_ok = p_params
            .iter()
            .zip(m_params)
            .all(|(p_ty, m_ty)| is_subtype(env, p_ty, m_ty));
        // Contravariant return: m's return is a subtype of the ancestor's.
        let return_ok = is_subtype(env, m_return, ancestor.return_type());
        if params_ok && return_ok {
            trace!(method = ?m.0, overrides = ?p.id(), "override recognized");
            overrides.push(p.id());
        }
    }

    let marked_override = method.flags.contains(Flags::OVERRIDE);
    let is_abstract = method.is_abstract();

    if marked_override && overrides.is_empty() {
        return Err(InheritanceError::new(
            at,
            "method is marked `override` but overrides nothing",
        ));
    }
    if strict_modifier && !marked_override && !overrides.is_empty() && !is_abstract {
        return Err(InheritanceError::new(
            at,
            "method overrides an ancestor method but is missing the `override` modifier",
        ));
    }

    Ok(overrides)
}

/// Collect every method named like `m` reachable from `class`'s declared
/// supertypes (spec: "substituting through `C.supertypes[0]` and beyond as
/// needed"). `name_matches` lets the caller supply whatever notion of
/// "same source name" scope analysis already resolved.
pub fn gather_ancestor_candidates(
    class_supertype_methods: &[FunctionId],
    name_matches: impl Fn(FunctionId) -> bool,
) -> Vec<FunctionId> {
    class_supertype_methods
        .iter()
        .copied()
        .filter(|&id| name_matches(id))
        .collect()
}

/// spec §9 "Open question in the source", resolved: a method marked
/// `override` may omit its own return type only when every method it
/// overrides declares the identical return type; otherwise which one it
/// would inherit is ambiguous and an explicit return type is required.
pub fn requires_explicit_return_type(package: &Package, overridden: &[FunctionId]) -> bool {
    let mut returns = overridden.iter().map(|&id| package.function(id).return_type());
    match returns.next() {
        None => false,
        Some(first) => returns.any(|other| other != first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilex_common::Interner;
    use ilex_ir::{BuiltinIds, Class, DefiningType, Function, Name, PackageIndex, Type};

    struct Fixture {
        pkg: Package,
        builtins: BuiltinIds,
        foo_m: FunctionId,
        bar_m: FunctionId,
        baz_m_unmarked: FunctionId,
        foo_param_m: FunctionId,
        bar_param_m: FunctionId,
    }

    fn setup() -> Fixture {
        let interner = Interner::new();
        let pkg_name = Name::single(interner.intern("app"));
        let mut pkg = Package::new(PackageIndex(1), pkg_name);
        let root = pkg.push_class(Class::new(Name::single(interner.intern("Object")), Flags::PUBLIC));
        pkg.class_mut(root).supertypes = Some(vec![]);
        let mut nothing_class = Class::new(Name::single(interner.intern("Nothing")), Flags::PUBLIC);
        nothing_class.supertypes = Some(vec![Type::class(root, vec![], false)]);
        let nothing = pkg.push_class(nothing_class);
        let mut null_class = Class::new(Name::single(interner.intern("Null")), Flags::PUBLIC);
        null_class.supertypes = Some(vec![Type::class(root, vec![], false)]);
        let null = pkg.push_class(null_class);

        let string_id = pkg.push_class(Class::new(Name::single(interner.intern("String")), Flags::PUBLIC));
        pkg.class_mut(string_id).supertypes = Some(vec![Type::class(root, vec![], false)]);

        // Foo.m(): Object
        let mut foo_method = Function::new(Name::single(interner.intern("m")), Flags::PUBLIC);
        foo_method.defining_type = Some(DefiningType::Class(root));
        foo_method.parameter_types = Some(vec![Type::class(root, vec![], false)]); // receiver only
        foo_method.return_type = Some(Type::class(root, vec![], false));
        let foo_m = pkg.push_function(foo_method);

        // Bar.m(): String, marked override
        let mut bar_method = Function::new(Name::single(interner.intern("m")), Flags::PUBLIC | Flags::OVERRIDE);
        bar_method.defining_type = Some(DefiningType::Class(string_id));
        bar_method.parameter_types = Some(vec![Type::class(string_id, vec![], false)]); // receiver only
        bar_method.return_type = Some(Type::class(string_id, vec![], false));
        let bar_m = pkg.push_function(bar_method);

        // Baz.m(): String, same shape as Bar.m but missing the modifier.
        let mut baz_method = Function::new(Name::single(interner.intern("m")), Flags::PUBLIC);
        baz_method.defining_type = Some(DefiningType::Class(string_id));
        baz_method.parameter_types = Some(vec![Type::class(string_id, vec![], false)]);
        baz_method.return_type = Some(Type::class(string_id, vec![], false));
        let baz_m_unmarked = pkg.push_function(baz_method);

        // A and B, with B <: A, for the covariant-*parameter* override case
        // (testOverrideCovariantParameters): Foo.m(b: B) is overridden by
        // Bar.m(a: A) since a's parameter tuple is a pointwise supertype of
        // b's.
        let a_id = pkg.push_class(Class::new(Name::single(interner.intern("A")), Flags::PUBLIC));
        pkg.class_mut(a_id).supertypes = Some(vec![Type::class(root, vec![], false)]);
        let mut b_class = Class::new(Name::single(interner.intern("B")), Flags::PUBLIC);
        b_class.supertypes = Some(vec![Type::class(a_id, vec![], false), Type::class(root, vec![], false)]);
        let b_id = pkg.push_class(b_class);

        // Foo.m(b: B): Object
        let mut foo_param_method = Function::new(Name::single(interner.intern("m")), Flags::PUBLIC);
        foo_param_method.defining_type = Some(DefiningType::Class(root));
        foo_param_method.parameter_types =
            Some(vec![Type::class(root, vec![], false), Type::class(b_id, vec![], false)]);
        foo_param_method.return_type = Some(Type::class(root, vec![], false));
        let foo_param_m = pkg.push_function(foo_param_method);

        // Bar.m(a: A): Object, marked override, widening the parameter.
        let mut bar_param_method =
            Function::new(Name::single(interner.intern("m")), Flags::PUBLIC | Flags::OVERRIDE);
        bar_param_method.defining_type = Some(DefiningType::Class(root));
        bar_param_method.parameter_types =
            Some(vec![Type::class(root, vec![], false), Type::class(a_id, vec![], false)]);
        bar_param_method.return_type = Some(Type::class(root, vec![], false));
        let bar_param_m = pkg.push_function(bar_param_method);

        let builtins = BuiltinIds { root, nothing, null };
        Fixture {
            pkg,
            builtins,
            foo_m,
            bar_m,
            baz_m_unmarked,
            foo_param_m,
            bar_param_m,
        }
    }

    #[test]
    fn covariant_return_override_is_recognized() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let overrides = resolve_overrides(env, f.bar_m, &[f.foo_m], true, Span::dummy()).unwrap();
        assert_eq!(overrides, vec![f.foo_m.id()]);
    }

    #[test]
    fn covariant_parameter_widening_override_is_recognized() {
        // testOverrideCovariantParameters: Bar.m(a: A) overrides Foo.m(b: B)
        // where B <: A, since m's parameter tuple must be a pointwise
        // supertype of the overridden method's, not a subtype.
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let overrides =
            resolve_overrides(env, f.bar_param_m, &[f.foo_param_m], true, Span::dummy()).unwrap();
        assert_eq!(overrides, vec![f.foo_param_m.id()]);
    }

    #[test]
    fn override_modifier_with_nothing_overridden_is_an_error() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let result = resolve_overrides(env, f.bar_m, &[], true, Span::dummy());
        assert!(result.is_err());
    }

    #[test]
    fn missing_override_modifier_on_real_override_is_an_error_when_strict() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let result = resolve_overrides(env, f.baz_m_unmarked, &[f.foo_m], true, Span::dummy());
        assert!(result.is_err());
    }

    #[test]
    fn missing_override_modifier_is_tolerated_when_not_strict() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let result = resolve_overrides(env, f.baz_m_unmarked, &[f.foo_m], false, Span::dummy());
        assert!(result.is_ok());
    }

    #[test]
    fn identical_ancestor_return_types_do_not_require_an_explicit_one() {
        let f = setup();
        // bar_m and baz_m_unmarked both return String.
        assert!(!requires_explicit_return_type(&f.pkg, &[f.bar_m, f.baz_m_unmarked]));
    }

    #[test]
    fn differing_ancestor_return_types_require_an_explicit_one() {
        let f = setup();
        // foo_m returns Object, bar_m returns String: ambiguous without an
        // explicit declaration on the overriding method.
        assert!(requires_explicit_return_type(&f.pkg, &[f.foo_m, f.bar_m]));
    }
}
