//! Black-box coverage of spec §8's testable properties (S1, S2, S3, S5, S6),
//! exercised entirely through `ilex-check`'s public API rather than a
//! module's own internals, the way the teacher's `tsz-checker/tests`
//! integration suite checks outcomes through its crate surface.

use ilex_check::call::{candidates_from, resolve_call, SiteKind};
use ilex_check::override_resolution::{requires_explicit_return_type, resolve_overrides};
use ilex_check::pass::TypeAnalysisPass;
use ilex_check::pattern::{type_pattern, TestArgument};
use ilex_check::scope::AnalysisOptions;
use ilex_check::{Expr, Pattern};
use ilex_common::error::AnalysisError;
use ilex_common::{Interner, Span};
use ilex_ir::{
    BuiltinIds, Class, Flags, Function, FunctionId, Name, NodeId, Package, PackageIndex, Primitive,
    Type, TypeEnv, TypeParameter, Variance,
};

struct World {
    pkg: Package,
    builtins: BuiltinIds,
}

fn base_world() -> World {
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

    World { pkg, builtins: BuiltinIds { root, nothing, null } }
}

// S1: `def f(x) = f(x)` is rejected unannotated; accepted once the
// declaration carries an explicit type, since then no body typing is
// needed to know the declared surface type.
#[test]
fn s1_self_referential_unannotated_function_is_rejected_but_annotated_is_accepted() {
    let mut world = base_world();
    let interner = Interner::new();

    fn infer_from_self_call(
        pass: &mut TypeAnalysisPass<'_>,
        id: FunctionId,
    ) -> Result<(Vec<Type>, Type), AnalysisError> {
        pass.ensure_function_type_info(id, infer_from_self_call)?;
        let f = pass.package.function(id);
        Ok((f.parameter_types().to_vec(), f.return_type().clone()))
    }

    let unannotated = world
        .pkg
        .push_function(Function::new(Name::single(interner.intern("f")), Flags::empty()));
    let mut pass = TypeAnalysisPass::new(&mut world.pkg, &world.builtins, AnalysisOptions::default());
    assert!(pass.ensure_function_type_info(unannotated, infer_from_self_call).is_err());

    fn declared_i32(
        _pass: &mut TypeAnalysisPass<'_>,
        _id: FunctionId,
    ) -> Result<(Vec<Type>, Type), AnalysisError> {
        Ok((vec![Type::Primitive(Primitive::I32)], Type::Primitive(Primitive::I32)))
    }
    let annotated = world
        .pkg
        .push_function(Function::new(Name::single(interner.intern("g")), Flags::empty()));
    let mut pass = TypeAnalysisPass::new(&mut world.pkg, &world.builtins, AnalysisOptions::default());
    assert!(pass.ensure_function_type_info(annotated, declared_i32).is_ok());
}

// S2: overload resolution picks the most specific applicable candidate.
#[test]
fn s2_overload_resolution_picks_the_narrower_candidate() {
    let mut world = base_world();
    let interner = Interner::new();

    let mut a = Class::new(Name::single(interner.intern("A")), Flags::PUBLIC);
    a.supertypes = Some(vec![Type::class(world.builtins.root, vec![], false)]);
    let a_id = world.pkg.push_class(a);
    let mut b = Class::new(Name::single(interner.intern("B")), Flags::PUBLIC);
    b.supertypes = Some(vec![Type::class(a_id, vec![], false), Type::class(world.builtins.root, vec![], false)]);
    let b_id = world.pkg.push_class(b);

    let mut take_a = Function::new(Name::single(interner.intern("take")), Flags::PUBLIC);
    take_a.parameter_types = Some(vec![Type::class(a_id, vec![], false)]);
    take_a.return_type = Some(Type::Primitive(Primitive::Boolean));
    let take_a_id = world.pkg.push_function(take_a);

    let mut take_b = Function::new(Name::single(interner.intern("take")), Flags::PUBLIC);
    take_b.parameter_types = Some(vec![Type::class(b_id, vec![], false)]);
    take_b.return_type = Some(Type::Primitive(Primitive::I64));
    let take_b_id = world.pkg.push_function(take_b);

    let env = TypeEnv::new(&world.pkg, &world.builtins);
    let candidates = candidates_from(&world.pkg, &[take_a_id, take_b_id]);
    let arg = Type::class(b_id, vec![], false);
    let resolved = resolve_call(env, &candidates, SiteKind::Static, &[arg], &[], Span::dummy()).unwrap();
    assert_eq!(resolved.callee, take_b_id);

    // A wider-only argument (an A, not a B) leaves only the A candidate.
    let arg = Type::class(a_id, vec![], false);
    let resolved = resolve_call(env, &candidates, SiteKind::Static, &[arg], &[], Span::dummy()).unwrap();
    assert_eq!(resolved.callee, take_a_id);
}

// S3: a covariant type parameter is rejected in a mutable (`var`) field but
// accepted in an immutable (`val`) field; constructor parameters are always
// allowed regardless of declared variance.
#[test]
fn s3_covariant_parameter_rejected_in_var_field_accepted_in_val_field_and_ctor() {
    use ilex_check::variance::{check_slot, Slot};

    let mut world = base_world();
    let interner = Interner::new();
    let t = world.pkg.push_type_parameter(TypeParameter {
        name: Name::single(interner.intern("T")),
        upper_bound: Type::class(world.builtins.root, vec![], false),
        lower_bound: Type::class(world.builtins.nothing, vec![], false),
        variance: Variance::Covariant,
        flags: Flags::empty(),
    });
    let ty = Type::variable(t, false);

    assert!(!check_slot(&ty, t, Variance::Covariant, Slot::VarField));
    assert!(check_slot(&ty, t, Variance::Covariant, Slot::ValField));
    assert!(check_slot(&ty, t, Variance::Covariant, Slot::ConstructorParameter));
}

// S5: a method marked `override` must declare an explicit return type
// unless every method it overrides returns the identical type.
#[test]
fn s5_override_return_type_ambiguity_requires_an_explicit_declaration() {
    let mut world = base_world();
    let interner = Interner::new();

    let string_id = world.pkg.push_class(Class::new(Name::single(interner.intern("String")), Flags::PUBLIC));
    world.pkg.class_mut(string_id).supertypes = Some(vec![Type::class(world.builtins.root, vec![], false)]);

    let mut parent_returns_object = Function::new(Name::single(interner.intern("m")), Flags::PUBLIC);
    parent_returns_object.parameter_types = Some(vec![Type::class(world.builtins.root, vec![], false)]);
    parent_returns_object.return_type = Some(Type::class(world.builtins.root, vec![], false));
    let parent_returns_object = world.pkg.push_function(parent_returns_object);

    let mut parent_returns_string = Function::new(Name::single(interner.intern("m")), Flags::PUBLIC);
    parent_returns_string.parameter_types = Some(vec![Type::class(string_id, vec![], false)]);
    parent_returns_string.return_type = Some(Type::class(string_id, vec![], false));
    let parent_returns_string = world.pkg.push_function(parent_returns_string);

    // Disagreeing ancestor return types: an explicit return type is required.
    assert!(requires_explicit_return_type(
        &world.pkg,
        &[parent_returns_object, parent_returns_string]
    ));

    let mut child = Function::new(Name::single(interner.intern("m")), Flags::PUBLIC | Flags::OVERRIDE);
    child.parameter_types = Some(vec![Type::class(string_id, vec![], false)]);
    child.return_type = Some(Type::class(string_id, vec![], false));
    let child_id = world.pkg.push_function(child);

    let env = TypeEnv::new(&world.pkg, &world.builtins);
    let overrides =
        resolve_overrides(env, child_id, &[parent_returns_string], true, Span::dummy()).unwrap();
    assert_eq!(overrides, vec![parent_returns_string.id()]);
}

// S6: a type-test pattern with a concrete type argument is rejected because
// generic arguments are erased at runtime; `_` is accepted and the bound
// type is existentially quantified over the class's type parameters.
#[test]
fn s6_concrete_type_argument_in_type_test_is_rejected_wildcard_is_accepted() {
    let mut world = base_world();
    let interner = Interner::new();

    let t_id = world.pkg.push_type_parameter(TypeParameter {
        name: Name::single(interner.intern("T")),
        upper_bound: Type::class(world.builtins.root, vec![], false),
        lower_bound: Type::class(world.builtins.nothing, vec![], false),
        variance: Variance::Invariant,
        flags: Flags::empty(),
    });
    let mut box_class = Class::new(Name::single(interner.intern("Box")), Flags::PUBLIC);
    box_class.type_parameters = vec![t_id];
    box_class.supertypes = Some(vec![Type::class(world.builtins.root, vec![], false)]);
    let box_id = world.pkg.push_class(box_class);

    let env = TypeEnv::new(&world.pkg, &world.builtins);
    let scrutinee = Type::class(world.builtins.root, vec![], false);
    let pattern = Pattern::Blank {
        node: NodeId(0),
        annotation: Some(Type::class(box_id, vec![Type::class(world.builtins.root, vec![], false)], false)),
    };

    let concrete_arg = [TestArgument::Concrete(Type::class(world.builtins.root, vec![], false))];
    assert!(type_pattern(env, &pattern, &scrutinee, Some((box_id, &concrete_arg)), Span::dummy()).is_err());

    let wildcard_arg = [TestArgument::Wildcard];
    let bound = type_pattern(env, &pattern, &scrutinee, Some((box_id, &wildcard_arg)), Span::dummy()).unwrap();
    assert!(bound.as_existential().is_some());

    // `Expr`'s own node accessor is exercised too, since this suite is the
    // one place that constructs bare `Expr`/`Pattern` nodes end to end.
    let block = Expr::Block { node: NodeId(7), stmts: vec![] };
    assert_eq!(block.node(), NodeId(7));
}
