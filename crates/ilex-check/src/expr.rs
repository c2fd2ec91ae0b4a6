//! Expression type synthesis (spec §4.4), the layer that actually walks a
//! method body and fills `CompileInfo`'s per-node `type` table.
//!
//! Name resolution is explicitly out of scope (spec §1): this module never
//! decides what a `UseRef`, `This`, `Super`, `Call`, `Lambda`, or pattern
//! type-test refers to. Instead it is generic over a `SynthesisContext`
//! that scope analysis (or, here, a test fixture) supplies those answers
//! through — mirroring how `call::resolve_call` takes an already-built
//! candidate list rather than doing name lookup itself.

use ilex_common::error::{AnalysisError, TypeError};
use ilex_common::Span;
use ilex_ir::{
    is_subtype, lub, CallInfo, ClassId, ClosureInfo, CompileInfo, DefinitionId, NodeId, Primitive,
    ReceiverStrategy, Type, TypeEnv,
};

use crate::ast::{Expr, Pattern, Stmt};
use crate::call::{resolve_call, Candidate, SiteKind};
use crate::pass::TypeAnalysisPass;
use crate::pattern::{type_pattern, TestArgument};

/// Everything expression synthesis needs that only scope analysis knows
/// (spec §1 Non-goals: lexing, parsing, and name resolution are out of
/// scope for this crate; this trait is the seam).
pub trait SynthesisContext {
    /// The type a resolved name reference (`UseRef`) already carries.
    fn type_of_use(&self, node: NodeId) -> Type;
    /// The enclosing method's `this` type; panics if called outside one
    /// (a `This` node with no enclosing method is a scope-analysis defect,
    /// not something this layer can recover from).
    fn this_type(&self) -> Type;
    /// The enclosing method's direct superclass type, if any.
    fn super_type(&self) -> Option<Type>;
    /// The call-site kind and pre-built candidate set for a `Call` node.
    fn call_site(&self, node: NodeId) -> (SiteKind, Vec<Candidate>);
    /// The explicit type arguments written at a `Call` node, `[]` when none
    /// were written. Type-argument inference for generic callees is not
    /// implemented here, so a generic winner requires these to be present.
    fn call_type_arguments(&self, node: NodeId) -> Vec<Type>;
    /// `(class, type-test arguments)` for a type-test/destructure pattern,
    /// `None` for patterns that aren't a type test.
    fn pattern_test(&self, node: NodeId) -> Option<(ClassId, Vec<TestArgument>)>;
    /// The synthetic class materialized for a `Lambda` node (spec §4.4
    /// "Lambda").
    fn closure_class(&self, node: NodeId) -> ClassId;
    /// Definitions captured by a `Lambda` node's closure.
    fn captured_for_closure(&self, node: NodeId) -> Vec<DefinitionId>;
}

fn width_to_primitive(width: u32) -> Option<Primitive> {
    match width {
        8 => Some(Primitive::I8),
        16 => Some(Primitive::I16),
        32 => Some(Primitive::I32),
        64 => Some(Primitive::I64),
        _ => None,
    }
}

fn check_boolean(ty: &Type, at: Span) -> Result<(), TypeError> {
    if *ty == Type::Primitive(Primitive::Boolean) {
        Ok(())
    } else {
        Err(TypeError::new(at, "condition must have type `bool`"))
    }
}

/// Type `expr`, recording every node's type (and, for calls/lambdas, their
/// `CallInfo`/`ClosureInfo`) into `info`. Returns the expression's own type.
pub fn synthesize<C: SynthesisContext>(
    pass: &mut TypeAnalysisPass<'_>,
    info: &mut CompileInfo,
    ctx: &C,
    expr: &Expr,
) -> Result<Type, AnalysisError> {
    let node = expr.node();
    let ty = synthesize_kind(pass, info, ctx, expr)?;
    info.set_type(node, ty.clone());
    Ok(ty)
}

fn synthesize_kind<C: SynthesisContext>(
    pass: &mut TypeAnalysisPass<'_>,
    info: &mut CompileInfo,
    ctx: &C,
    expr: &Expr,
) -> Result<Type, AnalysisError> {
    let at = Span::dummy();
    match expr {
        Expr::IntLiteral { value, width, .. } => {
            let prim = width.and_then(width_to_primitive).unwrap_or(Primitive::I64);
            if !prim.integer_fits(*value) {
                return Err(TypeError::new(
                    at,
                    format!("integer literal {value} does not fit in {prim:?}"),
                )
                .into());
            }
            Ok(Type::Primitive(prim))
        }
        Expr::FloatLiteral { width, .. } => Ok(Type::Primitive(if *width == 64 {
            Primitive::F64
        } else {
            Primitive::F32
        })),
        Expr::BoolLiteral { .. } => Ok(Type::Primitive(Primitive::Boolean)),
        Expr::Null { .. } => Ok(Type::class(pass.builtins.null, vec![], true)),
        Expr::UseRef { node, .. } => Ok(ctx.type_of_use(*node)),
        Expr::This { .. } => Ok(ctx.this_type()),
        Expr::Super { .. } => ctx
            .super_type()
            .ok_or_else(|| TypeError::new(at, "`super` used where the enclosing class has no superclass").into()),
        Expr::Block { stmts, .. } => synthesize_block(pass, info, ctx, stmts),
        Expr::Assign { target, value, .. } => {
            let target_ty = synthesize(pass, info, ctx, target)?;
            let value_ty = synthesize(pass, info, ctx, value)?;
            let env = TypeEnv::new(pass.package, pass.builtins);
            if !is_subtype(env, &value_ty, &target_ty) {
                return Err(TypeError::new(at, "assigned value is not a subtype of the target's type").into());
            }
            Ok(Type::Primitive(Primitive::Unit))
        }
        Expr::If {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            let cond_ty = synthesize(pass, info, ctx, cond)?;
            check_boolean(&cond_ty, at)?;
            let then_ty = synthesize(pass, info, ctx, then_branch)?;
            match else_branch {
                Some(else_expr) => {
                    let else_ty = synthesize(pass, info, ctx, else_expr)?;
                    let env = TypeEnv::new(pass.package, pass.builtins);
                    Ok(lub(env, &then_ty, &else_ty))
                }
                None => Ok(Type::Primitive(Primitive::Unit)),
            }
        }
        Expr::While { cond, body, .. } => {
            let cond_ty = synthesize(pass, info, ctx, cond)?;
            check_boolean(&cond_ty, at)?;
            synthesize(pass, info, ctx, body)?;
            Ok(Type::Primitive(Primitive::Unit))
        }
        Expr::Try {
            body,
            catches,
            finally,
            ..
        } => {
            let mut ty = synthesize(pass, info, ctx, body)?;
            for catch in catches {
                let catch_ty = synthesize(pass, info, ctx, catch)?;
                let env = TypeEnv::new(pass.package, pass.builtins);
                ty = lub(env, &ty, &catch_ty);
            }
            if let Some(f) = finally {
                synthesize(pass, info, ctx, f)?;
            }
            Ok(ty)
        }
        Expr::Throw { value, .. } => {
            synthesize(pass, info, ctx, value)?;
            Ok(Type::NoType)
        }
        Expr::Return { value, .. } => {
            if let Some(v) = value {
                synthesize(pass, info, ctx, v)?;
            }
            Ok(Type::NoType)
        }
        Expr::NewArray { array_class, length, .. } => {
            let len_ty = synthesize(pass, info, ctx, length)?;
            if len_ty != Type::Primitive(Primitive::I32) {
                return Err(TypeError::new(at, "array length must have type `i32`").into());
            }
            Ok(Type::class(*array_class, vec![], false))
        }
        Expr::Call { node, args, .. } => {
            let mut arg_types = Vec::with_capacity(args.len());
            for arg in args {
                arg_types.push(synthesize(pass, info, ctx, arg)?);
            }
            let (site, candidates) = ctx.call_site(*node);
            let type_arguments = ctx.call_type_arguments(*node);
            let env = TypeEnv::new(pass.package, pass.builtins);
            let resolved = resolve_call(env, &candidates, site, &arg_types, &type_arguments, at)?;
            let return_type = pass.package.function(resolved.callee).return_type().clone();
            info.set_call_info(
                *node,
                CallInfo {
                    callee: resolved.callee.id(),
                    type_arguments: resolved.type_arguments,
                    instantiated_parameter_types: resolved.instantiated_parameter_types,
                    receiver_strategy: match site {
                        SiteKind::Static => ReceiverStrategy::None,
                        SiteKind::Instance => ReceiverStrategy::ImplicitThis,
                    },
                },
            );
            Ok(return_type)
        }
        Expr::Lambda { node, body, .. } => {
            synthesize(pass, info, ctx, body)?;
            let class = ctx.closure_class(*node);
            info.set_closure_info(
                *node,
                ClosureInfo {
                    closure_class: class,
                    captured: ctx.captured_for_closure(*node),
                },
            );
            Ok(Type::class(class, vec![], false))
        }
        Expr::Match { scrutinee, arms, .. } => {
            let scrutinee_ty = synthesize(pass, info, ctx, scrutinee)?;
            let mut result: Option<Type> = None;
            for (pattern, arm_expr) in arms {
                let test = ctx.pattern_test(pattern.node());
                let env = TypeEnv::new(pass.package, pass.builtins);
                let test_ref = test.as_ref().map(|(c, a)| (*c, a.as_slice()));
                let bound = type_pattern(env, pattern, &scrutinee_ty, test_ref, at)?;
                info.set_type(pattern.node(), bound);
                let arm_ty = synthesize(pass, info, ctx, arm_expr)?;
                result = Some(match result {
                    Some(acc) => lub(TypeEnv::new(pass.package, pass.builtins), &acc, &arm_ty),
                    None => arm_ty,
                });
            }
            Ok(result.unwrap_or(Type::NoType))
        }
    }
}

fn synthesize_block<C: SynthesisContext>(
    pass: &mut TypeAnalysisPass<'_>,
    info: &mut CompileInfo,
    ctx: &C,
    stmts: &[Stmt],
) -> Result<Type, AnalysisError> {
    let mut last = Type::Primitive(Primitive::Unit);
    for stmt in stmts {
        last = match stmt {
            // A block ending in a nested definition yields `unit`, not the
            // definition's own type (spec §4.4 "Block").
            Stmt::Def(_) => Type::Primitive(Primitive::Unit),
            Stmt::Expr(e) => synthesize(pass, info, ctx, e)?,
        };
    }
    Ok(last)
}
