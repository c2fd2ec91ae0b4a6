//! Substitution, `substituteForBase`, and `effectiveClassType` (spec §4.2).

use crate::builtins::TypeEnv;
use crate::ids::{ClassId, TypeParameterId};
use crate::types::{ClassType, ExistentialType, Type};

/// Substitute `params[i] -> replacements[i]` throughout `ty`. Distributes
/// through every constructor; stops hygienically at an existential whose
/// own captured parameters shadow any of `params` (spec §4.2).
pub fn substitute(ty: &Type, params: &[TypeParameterId], replacements: &[Type]) -> Type {
    debug_assert_eq!(params.len(), replacements.len());
    match ty {
        Type::Primitive(_) | Type::NoType => ty.clone(),
        Type::Variable(v) => match params.iter().position(|p| *p == v.param) {
            Some(i) => {
                let replacement = &replacements[i];
                if v.nullable {
                    replacement.with_nullable(true).unwrap_or_else(|| replacement.clone())
                } else {
                    replacement.clone()
                }
            }
            None => ty.clone(),
        },
        Type::Class(c) => Type::Class(ClassType {
            class: c.class,
            arguments: c
                .arguments
                .iter()
                .map(|a| substitute(a, params, replacements))
                .collect(),
            nullable: c.nullable,
        }),
        Type::Existential(e) => {
            if e.captured.iter().any(|cp| params.contains(cp)) {
                ty.clone()
            } else {
                Type::Existential(ExistentialType {
                    captured: e.captured.clone(),
                    inner: Box::new(substitute(&e.inner, params, replacements)),
                })
            }
        }
    }
}

/// Walk up `ty`'s supertype chain (dereferencing variable types through
/// their upper bound first) and return the first ancestor whose class is
/// `target`, substituted through every step (spec §4.2).
pub fn substitute_for_base(env: TypeEnv<'_>, ty: &Type, target: ClassId) -> Option<Type> {
    match ty {
        Type::Class(c) => {
            if c.class == target {
                return Some(ty.clone());
            }
            let class = env.package.class(c.class);
            for supertype in class.supertypes() {
                let substituted = substitute(supertype, &class.type_parameters, &c.arguments);
                if let Some(found) = substitute_for_base(env, &substituted, target) {
                    return Some(found);
                }
            }
            None
        }
        Type::Variable(v) => {
            let param = env.package.type_parameter(v.param);
            substitute_for_base(env, &param.upper_bound, target)
        }
        _ => None,
    }
}

/// Collapse a nest of existentials and variable-types-bounded-by-classes
/// into `(classType, capturedParameters)` (spec §4.2). Used by member
/// lookup on existentials and by pattern testability analysis.
pub fn effective_class_type(
    env: TypeEnv<'_>,
    ty: &Type,
) -> Option<(ClassType, Vec<TypeParameterId>)> {
    match ty {
        Type::Class(c) => Some((c.clone(), Vec::new())),
        Type::Variable(v) => {
            let param = env.package.type_parameter(v.param);
            effective_class_type(env, &param.upper_bound)
        }
        Type::Existential(e) => {
            let (class_type, mut inner_captured) = effective_class_type(env, &e.inner)?;
            let mut captured = e.captured.clone();
            captured.append(&mut inner_captured);
            Some((class_type, captured))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::BuiltinIds;
    use crate::defn::{Class, TypeParameter};
    use crate::flags::Flags;
    use crate::ids::PackageIndex;
    use crate::name::Name;
    use crate::package::Package;
    use crate::types::Variance;
    use ilex_common::Interner;

    fn setup() -> (Package, BuiltinIds, Interner) {
        let interner = Interner::new();
        let pkg_name = Name::single(interner.intern("app"));
        let mut pkg = Package::new(PackageIndex(1), pkg_name);
        let root_name = Name::single(interner.intern("Object"));
        let root = pkg.push_class(Class::new(root_name, Flags::PUBLIC));
        let nothing_name = Name::single(interner.intern("Nothing"));
        let mut nothing_class = Class::new(nothing_name, Flags::PUBLIC);
        nothing_class.supertypes = Some(vec![Type::class(root, vec![], false)]);
        let nothing = pkg.push_class(nothing_class);
        let null_name = Name::single(interner.intern("Null"));
        let mut null_class = Class::new(null_name, Flags::PUBLIC);
        null_class.supertypes = Some(vec![Type::class(root, vec![], false)]);
        let null = pkg.push_class(null_class);
        pkg.class_mut(root).supertypes = Some(vec![]);
        let builtins = BuiltinIds { root, nothing, null };
        (pkg, builtins, interner)
    }

    #[test]
    fn substitute_replaces_matching_parameter() {
        let (mut pkg, builtins, interner) = setup();
        let t_name = Name::single(interner.intern("T"));
        let mut t = TypeParameter {
            name: t_name,
            upper_bound: Type::class(builtins.root, vec![], false),
            lower_bound: Type::class(builtins.nothing, vec![], false),
            variance: Variance::Invariant,
            flags: Flags::empty(),
        };
        t.upper_bound = Type::class(builtins.root, vec![], false);
        let t_id = pkg.push_type_parameter(t);

        let box_name = Name::single(interner.intern("Box"));
        let mut box_class = Class::new(box_name, Flags::PUBLIC);
        box_class.type_parameters = vec![t_id];
        box_class.supertypes = Some(vec![Type::class(builtins.root, vec![], false)]);
        let box_id = pkg.push_class(box_class);

        let string_name = Name::single(interner.intern("String"));
        let string_id = pkg.push_class(Class::new(string_name, Flags::PUBLIC));

        let ty = Type::variable(t_id, false);
        let result = substitute(&ty, &[t_id], &[Type::class(string_id, vec![], false)]);
        assert_eq!(result, Type::class(string_id, vec![], false));

        let boxed = Type::class(box_id, vec![Type::variable(t_id, false)], false);
        let instantiated = substitute(&boxed, &[t_id], &[Type::class(string_id, vec![], false)]);
        assert_eq!(
            instantiated,
            Type::class(box_id, vec![Type::class(string_id, vec![], false)], false)
        );
    }

    #[test]
    fn substitution_is_hygienic_under_shadowing_existential() {
        let (mut pkg, builtins, interner) = setup();
        let t_name = Name::single(interner.intern("T"));
        let t_id = pkg.push_type_parameter(TypeParameter {
            name: t_name,
            upper_bound: Type::class(builtins.root, vec![], false),
            lower_bound: Type::class(builtins.nothing, vec![], false),
            variance: Variance::Invariant,
            flags: Flags::empty(),
        });
        // ∃T. T   — substituting the outer T must not touch the bound one.
        let existential = Type::existential(vec![t_id], Type::variable(t_id, false));
        let string_name = Name::single(interner.intern("String"));
        let string_id = pkg.push_class(Class::new(string_name, Flags::PUBLIC));
        let result = substitute(
            &existential,
            &[t_id],
            &[Type::class(string_id, vec![], false)],
        );
        assert_eq!(result, existential);
    }
}
