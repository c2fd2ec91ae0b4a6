//! `CompileInfo` side tables (C7, spec §4.7): per-AST-node annotations
//! produced by scope analysis and filled in by the type analysis pass.
//!
//! Keyed by AST node identity rather than embedded in the AST itself, so
//! that an immutable, already-parsed AST can be annotated without being
//! mutated — mirroring the teacher's separation between a binder-owned
//! symbol table and the syntax tree it describes. `NodeId` is an opaque
//! handle the AST layer hands out; this crate never interprets it.

use crate::ids::DefinitionId;
use crate::types::Type;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// (irDefn, scope) for a node that introduces a definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefnInfo {
    pub defn: DefinitionId,
    pub scope: ScopeId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// (defnInfo, isReceiverNeeded) for a node that refers to an existing name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UseInfo {
    pub defn: DefinitionId,
    pub receiver_needed: bool,
}

/// How the receiver for a call is supplied (spec §4.4 call resolution).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiverStrategy {
    /// No receiver: static function or constructor call.
    None,
    /// Implicit `this` of the enclosing method.
    ImplicitThis,
    /// An explicit receiver expression, identified by its own node.
    Explicit(NodeId),
}

/// (typeArguments, instantiatedParameterTypes, receiverStrategy) for a call
/// node, recorded once overload resolution has committed to a callee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallInfo {
    pub callee: DefinitionId,
    pub type_arguments: Vec<Type>,
    pub instantiated_parameter_types: Vec<Type>,
    pub receiver_strategy: ReceiverStrategy,
}

/// (closureClass, capturedContext) for a lambda or nested function, once
/// materialized as a synthetic class (spec §4.4 "Lambda").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClosureInfo {
    pub closure_class: crate::ids::ClassId,
    pub captured: Vec<DefinitionId>,
}

/// The side-table set itself. Single-owner, mutated exclusively by the
/// analyzer (spec §5); never invalidated once a slot is written, and never
/// partially committed across a failed analysis (spec §5 "Failures are
/// never partial-commit") — callers drop the whole `CompileInfo` on error
/// rather than trying to keep previously written slots.
#[derive(Default)]
pub struct CompileInfo {
    defn_info: FxHashMap<NodeId, DefnInfo>,
    use_info: FxHashMap<NodeId, UseInfo>,
    types: FxHashMap<NodeId, Type>,
    call_info: FxHashMap<NodeId, CallInfo>,
    closure_info: FxHashMap<NodeId, ClosureInfo>,
}

impl CompileInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_defn_info(&mut self, node: NodeId, info: DefnInfo) {
        self.defn_info.insert(node, info);
    }
    pub fn defn_info(&self, node: NodeId) -> Option<&DefnInfo> {
        self.defn_info.get(&node)
    }

    pub fn set_use_info(&mut self, node: NodeId, info: UseInfo) {
        self.use_info.insert(node, info);
    }
    pub fn use_info(&self, node: NodeId) -> Option<&UseInfo> {
        self.use_info.get(&node)
    }

    pub fn set_type(&mut self, node: NodeId, ty: Type) {
        self.types.insert(node, ty);
    }
    pub fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.types.get(&node)
    }

    pub fn set_call_info(&mut self, node: NodeId, info: CallInfo) {
        self.call_info.insert(node, info);
    }
    pub fn call_info(&self, node: NodeId) -> Option<&CallInfo> {
        self.call_info.get(&node)
    }

    pub fn set_closure_info(&mut self, node: NodeId, info: ClosureInfo) {
        self.closure_info.insert(node, info);
    }
    pub fn closure_info(&self, node: NodeId) -> Option<&ClosureInfo> {
        self.closure_info.get(&node)
    }

    /// Number of type-bearing nodes annotated so far; used by the pass's
    /// post-condition check that every expression node has a recorded type
    /// (spec §6 outputs).
    pub fn typed_node_count(&self) -> usize {
        self.types.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ClassId, DefinitionId, LocalIndex, PackageIndex};

    fn dummy_defn() -> DefinitionId {
        DefinitionId::local(PackageIndex(1), LocalIndex(0))
    }

    #[test]
    fn slots_round_trip_by_node_identity() {
        let mut info = CompileInfo::new();
        let node = NodeId(7);
        info.set_use_info(
            node,
            UseInfo {
                defn: dummy_defn(),
                receiver_needed: true,
            },
        );
        assert_eq!(info.use_info(node).unwrap().defn, dummy_defn());
        assert!(info.use_info(NodeId(8)).is_none());
    }

    #[test]
    fn typed_node_count_tracks_distinct_nodes() {
        let mut info = CompileInfo::new();
        info.set_type(NodeId(1), Type::Primitive(crate::types::Primitive::I32));
        info.set_type(NodeId(2), Type::Primitive(crate::types::Primitive::I32));
        info.set_type(NodeId(1), Type::Primitive(crate::types::Primitive::Boolean));
        assert_eq!(info.typed_node_count(), 2);
    }

    #[test]
    fn closure_info_records_closure_class_and_captures() {
        let mut info = CompileInfo::new();
        let node = NodeId(3);
        info.set_closure_info(
            node,
            ClosureInfo {
                closure_class: ClassId(dummy_defn()),
                captured: vec![dummy_defn()],
            },
        );
        assert_eq!(info.closure_info(node).unwrap().captured.len(), 1);
    }
}
