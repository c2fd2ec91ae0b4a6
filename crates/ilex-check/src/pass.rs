//! The type-analysis pass's declaration-type layer (spec §4.4 layer 1,
//! `ensureTypeInfoForDefn`): on-demand computation of a definition's
//! declared surface type, memoized with a three-state marker so that a
//! cycle — a declaration whose own type is needed to compute itself —
//! is caught rather than looping forever (spec §5 "three-state marker").
//!
//! This is also, concretely, why `def f(x) = f(x)` is rejected while a
//! fully-annotated version is accepted (spec §8 scenario S1): computing
//! the unannotated function's return type requires typing its own body,
//! which calls itself, which re-enters `ensure_function_type_info` for
//! the same id while it is still `Visiting`.

use ilex_common::error::{AnalysisError, TypeError};
use ilex_common::Span;
use ilex_ir::{BuiltinIds, Class, DefinitionId, FunctionId, Package, Type};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::scope::AnalysisOptions;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum VisitState {
    Visiting,
    Done,
}

pub struct TypeAnalysisPass<'a> {
    pub package: &'a mut Package,
    pub builtins: &'a BuiltinIds,
    pub options: AnalysisOptions,
    state: FxHashMap<DefinitionId, VisitState>,
}

pub type DeclaredFunctionType =
    fn(&mut TypeAnalysisPass<'_>, FunctionId) -> Result<(Vec<Type>, Type), AnalysisError>;

impl<'a> TypeAnalysisPass<'a> {
    pub fn new(package: &'a mut Package, builtins: &'a BuiltinIds, options: AnalysisOptions) -> Self {
        TypeAnalysisPass {
            package,
            builtins,
            options,
            state: FxHashMap::default(),
        }
    }

    /// Compute and cache `id`'s parameter/return types, invoking `derive`
    /// only on first visit. `derive` is handed `self` so it can recurse
    /// into `ensure_function_type_info` for other (or the same) functions
    /// while computing the body.
    pub fn ensure_function_type_info(
        &mut self,
        id: FunctionId,
        derive: DeclaredFunctionType,
    ) -> Result<(), AnalysisError> {
        match self.state.get(&id.0) {
            Some(VisitState::Done) => return Ok(()),
            Some(VisitState::Visiting) => {
                return Err(TypeError::new(
                    Span::dummy(),
                    "recursive declaration requires an explicit type: cannot infer it from a \
                     body that calls itself before its own type is known",
                )
                .into());
            }
            None => {}
        }
        self.state.insert(id.0, VisitState::Visiting);
        let (parameter_types, return_type) = derive(self, id)?;
        let f = self.package.function_mut(id);
        f.parameter_types = Some(parameter_types);
        f.return_type = Some(return_type);
        self.state.insert(id.0, VisitState::Done);
        debug!(function = ?id.0, "declared type info computed");
        Ok(())
    }

    pub fn is_done(&self, id: DefinitionId) -> bool {
        matches!(self.state.get(&id), Some(VisitState::Done))
    }
}

/// Fills `class.supertypes` from an already-resolved, substituted list —
/// scope analysis hands the pass the raw superclass/supertrait references;
/// this just threads them into storage and marks linearization complete.
/// Cycle detection for class hierarchies is an `InheritanceError` territory
/// (spec invariant 2), handled by the caller before this is invoked.
pub fn set_class_supertypes(class: &mut Class, supertypes: Vec<Type>) {
    class.supertypes = Some(supertypes);
}
