//! The subtype relation `S <: T` (spec §4.1).
//!
//! Implemented as nullability normalization (rules 3–4) wrapping a
//! "core" structural relation (rules 1–2, 5–10). This produces the same
//! accept/reject verdict as evaluating the ten rules strictly in order —
//! rules 3 and 4 only ever strip or reject on the nullable flag before any
//! structural rule can fire — but is easier to implement without
//! duplicating the structural cases under every nullability combination.
//! See DESIGN.md.

use crate::builtins::TypeEnv;
use crate::ids::TypeParameterId;
use crate::limits::SUBTYPE_RECURSION_LIMIT;
use crate::substitution::substitute;
use crate::types::{Type, Variance};
use rustc_hash::FxHashMap;

pub fn is_subtype(env: TypeEnv<'_>, sub: &Type, sup: &Type) -> bool {
    is_subtype_depth(env, sub, sup, 0)
}

fn is_reference_type(ty: &Type) -> bool {
    matches!(ty, Type::Class(_) | Type::Variable(_) | Type::Existential(_))
}

fn is_subtype_depth(env: TypeEnv<'_>, sub: &Type, sup: &Type, depth: usize) -> bool {
    if depth > SUBTYPE_RECURSION_LIMIT {
        return false;
    }

    // `NoType` is the type of a `throw`/`return` expression: control never
    // reaches past it, so it is vacuously a subtype of everything.
    if sub.is_no_type() {
        return true;
    }

    // Rule 4, second half: nullable is never a subtype of non-null.
    if sub.is_nullable() && !sup.is_nullable() {
        return false;
    }

    // Rules 3 & 4, first half: strip nullability and recurse on the
    // resulting non-null shapes. A bare `null` type is represented as the
    // well-known `null` class (see builtins.rs); rule 3 falls out of the
    // ordinary class-subtype search below once nullability is stripped,
    // because every class's declared supertypes bottom out at the root and
    // the null class has no non-null supertypes of interest — so we check
    // it explicitly here instead of relying on an accidental match.
    if let Some(sup_class) = sup.as_class() {
        if env.builtins.is_null(sup_class.class) {
            // T = Null itself: S <: Null only by reflexivity, handled below.
        }
    }
    if let Some(sub_class) = sub.as_class() {
        if env.builtins.is_null(sub_class.class) {
            return sup.is_nullable();
        }
    }

    let sub_eff = sub.with_nullable(false).unwrap_or_else(|| sub.clone());
    let sup_eff = sup.with_nullable(false).unwrap_or_else(|| sup.clone());
    is_subtype_core(env, &sub_eff, &sup_eff, depth)
}

fn is_subtype_core(env: TypeEnv<'_>, sub: &Type, sup: &Type, depth: usize) -> bool {
    // Rule 1: reflexivity.
    if sub == sup {
        return true;
    }

    // Rule 2: nothing is a subtype of every reference type.
    if let Some(sub_class) = sub.as_class() {
        if env.builtins.is_nothing(sub_class.class) && is_reference_type(sup) {
            return true;
        }
    }

    // Rule 5: existential right.
    if let Type::Existential(sup_ex) = sup {
        return existential_right(env, sub, sup_ex, depth);
    }

    // Rule 6: existential left.
    if let Type::Existential(sub_ex) = sub {
        return is_subtype_depth(env, &sub_ex.inner, sup, depth + 1);
    }

    // Rule 7: variable left.
    if let Type::Variable(v) = sub {
        let param = env.package_type_parameter(v.param);
        return is_subtype_depth(env, &param.upper_bound, sup, depth + 1);
    }

    // Rule 8: variable right.
    if let Type::Variable(v) = sup {
        let param = env.package_type_parameter(v.param);
        return is_subtype_depth(env, sub, &param.lower_bound, depth + 1);
    }

    // Rule 9: class types.
    if let (Some(sub_class), Some(sup_class)) = (sub.as_class(), sup.as_class()) {
        return class_subtype(env, sub_class, sup_class, depth);
    }

    // Rule 10: otherwise not a subtype.
    false
}

fn class_subtype(
    env: TypeEnv<'_>,
    sub: &crate::types::ClassType,
    sup: &crate::types::ClassType,
    depth: usize,
) -> bool {
    let Some(based) =
        crate::substitution::substitute_for_base(env, &Type::Class(sub.clone()), sup.class)
    else {
        return false;
    };
    let Some(based_class) = based.as_class() else {
        return false;
    };
    if based_class.arguments.len() != sup.arguments.len() {
        return false;
    }
    let target_params = &env.package.class(sup.class).type_parameters;
    if target_params.len() != sup.arguments.len() {
        return false;
    }
    for i in 0..target_params.len() {
        let variance = env.package_type_parameter(target_params[i]).variance;
        let a = &based_class.arguments[i];
        let b = &sup.arguments[i];
        let ok = match variance {
            Variance::Invariant => is_equivalent(env, a, b),
            Variance::Covariant => is_subtype_depth(env, a, b, depth + 1),
            Variance::Contravariant => is_subtype_depth(env, b, a, depth + 1),
        };
        if !ok {
            return false;
        }
    }
    true
}

fn existential_right(
    env: TypeEnv<'_>,
    sub: &Type,
    sup_ex: &crate::types::ExistentialType,
    depth: usize,
) -> bool {
    let Some(sup_inner) = sup_ex.inner.as_class() else {
        return false;
    };
    let Some(sub_based) = crate::substitution::substitute_for_base(env, sub, sup_inner.class)
    else {
        return false;
    };
    let Some(sub_class) = sub_based.as_class() else {
        return false;
    };
    if sub_class.arguments.len() != sup_inner.arguments.len() {
        return false;
    }

    let mut witnesses: FxHashMap<TypeParameterId, Type> = FxHashMap::default();
    for (sub_arg, sup_arg) in sub_class.arguments.iter().zip(&sup_inner.arguments) {
        if let Type::Variable(v) = sup_arg {
            if sup_ex.captured.contains(&v.param) {
                match witnesses.get(&v.param) {
                    Some(existing) if existing != sub_arg => return false,
                    Some(_) => {}
                    None => {
                        witnesses.insert(v.param, sub_arg.clone());
                    }
                }
                continue;
            }
        }
        if !is_subtype_depth(env, sub_arg, sup_arg, depth + 1) {
            return false;
        }
    }

    if sup_ex.captured.iter().any(|p| !witnesses.contains_key(p)) {
        return false;
    }

    for p in &sup_ex.captured {
        let param_def = env.package_type_parameter(*p);
        let w = &witnesses[p];
        if !is_subtype_depth(env, w, &param_def.upper_bound, depth + 1) {
            return false;
        }
        if !is_subtype_depth(env, &param_def.lower_bound, w, depth + 1) {
            return false;
        }
    }

    let ordered_params: Vec<_> = sup_ex.captured.clone();
    let ordered_witnesses: Vec<_> = ordered_params.iter().map(|p| witnesses[p].clone()).collect();
    let instantiated = substitute(&sup_ex.inner, &ordered_params, &ordered_witnesses);
    is_subtype_depth(env, sub, &instantiated, depth + 1)
}

/// Mutual subtype (spec §4.1 "Equivalence"). For existentials, two
/// existentials are equivalent if their inner types are equivalent under a
/// bijection between captured parameters with equivalent bounds; since our
/// existentials don't require renaming (captured parameter ids are unique
/// per introducing site, see `substitution::effective_class_type`), a
/// direct mutual-subtype check already implements this.
pub fn is_equivalent(env: TypeEnv<'_>, a: &Type, b: &Type) -> bool {
    is_subtype(env, a, b) && is_subtype(env, b, a)
}

impl<'a> TypeEnv<'a> {
    fn package_type_parameter(&self, id: TypeParameterId) -> &crate::defn::TypeParameter {
        self.package.type_parameter(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::BuiltinIds;
    use crate::defn::{Class, TypeParameter};
    use crate::flags::Flags;
    use crate::ids::{ClassId, PackageIndex};
    use crate::name::Name;
    use crate::package::Package;
    use ilex_common::Interner;

    struct Fixture {
        pkg: Package,
        builtins: BuiltinIds,
        string_id: ClassId,
        animal_id: ClassId,
        dog_id: ClassId,
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

        let mut string_class = Class::new(Name::single(interner.intern("String")), Flags::PUBLIC);
        string_class.supertypes = Some(vec![Type::class(root, vec![], false)]);
        let string_id = pkg.push_class(string_class);

        let mut animal_class = Class::new(Name::single(interner.intern("Animal")), Flags::PUBLIC);
        animal_class.supertypes = Some(vec![Type::class(root, vec![], false)]);
        let animal_id = pkg.push_class(animal_class);

        let mut dog_class = Class::new(Name::single(interner.intern("Dog")), Flags::PUBLIC);
        dog_class.supertypes = Some(vec![
            Type::class(animal_id, vec![], false),
            Type::class(root, vec![], false),
        ]);
        let dog_id = pkg.push_class(dog_class);

        let builtins = BuiltinIds { root, nothing, null };
        Fixture {
            pkg,
            builtins,
            string_id,
            animal_id,
            dog_id,
        }
    }

    #[test]
    fn reflexivity_holds_for_every_type() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let dog = Type::class(f.dog_id, vec![], false);
        assert!(is_subtype(env, &dog, &dog));
    }

    #[test]
    fn nothing_is_subtype_of_every_reference_type() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let nothing = Type::class(f.builtins.nothing, vec![], false);
        let animal = Type::class(f.animal_id, vec![], false);
        assert!(is_subtype(env, &nothing, &animal));
    }

    #[test]
    fn null_is_subtype_only_of_nullable_types() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let null = Type::class(f.builtins.null, vec![], false);
        let animal = Type::class(f.animal_id, vec![], false);
        let animal_q = Type::class(f.animal_id, vec![], true);
        assert!(!is_subtype(env, &null, &animal));
        assert!(is_subtype(env, &null, &animal_q));
    }

    #[test]
    fn nullable_never_subtype_of_non_null() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let animal_q = Type::class(f.animal_id, vec![], true);
        let animal = Type::class(f.animal_id, vec![], false);
        assert!(!is_subtype(env, &animal_q, &animal));
    }

    #[test]
    fn non_null_subtype_of_nullable_counterpart_via_normal_subclassing() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let dog = Type::class(f.dog_id, vec![], false);
        let animal_q = Type::class(f.animal_id, vec![], true);
        assert!(is_subtype(env, &dog, &animal_q));
    }

    #[test]
    fn class_subclass_relation_via_supertypes_list() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let dog = Type::class(f.dog_id, vec![], false);
        let animal = Type::class(f.animal_id, vec![], false);
        let string = Type::class(f.string_id, vec![], false);
        assert!(is_subtype(env, &dog, &animal));
        assert!(!is_subtype(env, &dog, &string));
    }

    #[test]
    fn transitivity_holds_through_supertype_chain() {
        let f = setup();
        let env = TypeEnv::new(&f.pkg, &f.builtins);
        let dog = Type::class(f.dog_id, vec![], false);
        let root = Type::class(f.builtins.root, vec![], false);
        assert!(is_subtype(env, &dog, &root));
    }
}
