//! The IR: names, ids, flags, the type algebra, definitions, packages, and
//! the `CompileInfo` side tables the type analysis pass mutates (spec §3,
//! §4).

pub mod name;
pub use name::Name;

pub mod ids;
pub use ids::{
    ClassId, DefinitionId, FieldId, FunctionId, GlobalId, LocalIndex, PackageIndex, TraitId,
    TypeParameterId,
};

pub mod flags;
pub use flags::Flags;

pub mod types;
pub use types::{ClassType, ExistentialType, Position, Primitive, Type, Variance, VariableType};

pub mod defn;
pub use defn::{Class, DefiningType, Field, Function, Global, Trait, TypeParameter, Variable, VariableKind};

pub mod package;
pub use package::{Dependency, Package};

pub mod builtins;
pub use builtins::{BuiltinIds, TypeEnv};

pub mod substitution;
pub use substitution::{effective_class_type, substitute, substitute_for_base};

pub mod subtype;
pub use subtype::{is_equivalent, is_subtype};

pub mod lub;
pub use lub::lub;

pub mod compile_info;
pub use compile_info::{CallInfo, ClosureInfo, CompileInfo, DefnInfo, NodeId, ReceiverStrategy, ScopeId, UseInfo};
