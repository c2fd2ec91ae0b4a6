//! Variance discipline (spec §4.5, scenario S3): every occurrence of an
//! enclosing class/trait's declared-variance type parameter in its surface
//! (field types, method parameter/return types, supertype arguments) must
//! sit in a position compatible with that parameter's declared variance.

use ilex_common::error::TypeError;
use ilex_common::{Interner, Span};
use ilex_ir::{Package, Position, Type, TypeParameterId, Variance};

use crate::error::variance_violation;

/// Walk `ty` accumulating, for every occurrence of `param`, the composed
/// position it appears in starting from `base_position`. Returns `true` iff
/// every occurrence is compatible with `variance`.
pub fn check_occurrences(
    ty: &Type,
    param: TypeParameterId,
    variance: Variance,
    base_position: Position,
) -> bool {
    match ty {
        Type::Variable(v) if v.param == param => base_position.compatible_with(variance),
        Type::Variable(_) | Type::Primitive(_) | Type::NoType => true,
        Type::Class(c) => {
            // Each type-argument position composes the class's own
            // variance for that slot with the position we arrived with;
            // since we don't have the defining class's parameter list
            // here, callers that care about per-argument variance use
            // `check_class_argument_occurrences` below instead. A bare
            // occurrence check (does `param` appear at all in a forbidden
            // position) degrades to treating every argument as invariant,
            // which is the conservative (always-safe) choice.
            c.arguments
                .iter()
                .all(|a| check_occurrences(a, param, variance, base_position.compose(Position::Invariant)))
        }
        Type::Existential(e) => {
            if e.captured.contains(&param) {
                true
            } else {
                check_occurrences(&e.inner, param, variance, base_position)
            }
        }
    }
}

/// Like `check_occurrences`, but given the defining class's own type
/// parameter variances for `ty`'s class (so a covariant slot composes as
/// `+`, contravariant as `-`, per spec §4.5 "supertype argument" row).
pub fn check_class_argument_occurrences(
    ty: &Type,
    param: TypeParameterId,
    variance: Variance,
    base_position: Position,
    argument_variance_of: &impl Fn(ilex_ir::ClassId, usize) -> Variance,
) -> bool {
    match ty {
        Type::Variable(v) if v.param == param => base_position.compatible_with(variance),
        Type::Variable(_) | Type::Primitive(_) | Type::NoType => true,
        Type::Class(c) => c.arguments.iter().enumerate().all(|(i, a)| {
            let arg_variance = argument_variance_of(c.class, i);
            let position = match arg_variance {
                Variance::Covariant => Position::Positive,
                Variance::Contravariant => Position::Negative,
                Variance::Invariant => Position::Invariant,
            };
            check_class_argument_occurrences(
                a,
                param,
                variance,
                base_position.compose(position),
                argument_variance_of,
            )
        }),
        Type::Existential(e) => {
            if e.captured.contains(&param) {
                true
            } else {
                check_class_argument_occurrences(&e.inner, param, variance, base_position, argument_variance_of)
            }
        }
    }
}

/// Which surface slot a type occurs in, fixing the starting position
/// before composing through the type's own structure (spec §4.5 table).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    ValField,
    VarField,
    MethodParameter,
    MethodReturn,
    ConstructorParameter,
}

impl Slot {
    pub fn base_position(self) -> Position {
        match self {
            Slot::ValField | Slot::MethodReturn => Position::Positive,
            Slot::VarField => Position::Invariant,
            Slot::MethodParameter => Position::Negative,
            // Constructor parameters are exempt (spec: "always allowed").
            Slot::ConstructorParameter => Position::Invariant,
        }
    }

    pub fn is_exempt(self) -> bool {
        matches!(self, Slot::ConstructorParameter)
    }
}

/// spec §4.5 table, collapsed to one entry point: does a use of `param`
/// (declared with `variance`) in `slot` of `ty` comply?
pub fn check_slot(ty: &Type, param: TypeParameterId, variance: Variance, slot: Slot) -> bool {
    if slot.is_exempt() {
        return true;
    }
    check_occurrences(ty, param, variance, slot.base_position())
}

/// `check_slot`, reporting a located `TypeError` naming the offending
/// parameter rather than a bare `bool` (the form a pass driver wants).
pub fn check_slot_result(
    package: &Package,
    interner: &Interner,
    ty: &Type,
    param: TypeParameterId,
    variance: Variance,
    slot: Slot,
    at: Span,
) -> Result<(), TypeError> {
    if check_slot(ty, param, variance, slot) {
        return Ok(());
    }
    let name = package.type_parameter(param).name.short_name();
    let display = name
        .map(|atom| interner.resolve(atom).to_string())
        .unwrap_or_else(|| "<anonymous>".to_string());
    Err(variance_violation(at, &display))
}
