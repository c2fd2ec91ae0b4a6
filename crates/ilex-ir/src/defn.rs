//! IR definitions (C3, spec §3 "Class" / "Trait" / "Function" /
//! "TypeParameter" / "Variable").
//!
//! Definitions are created with skeletal fields by scope analysis (out of
//! scope here, spec §1) and have their type slots filled in by the type
//! analysis pass (C5) exactly once, on demand (spec §3 "Lifecycle"). A slot
//! is represented as `Option<T>`; reading an unset slot outside the pass's
//! own `ensureTypeInfoForDefn` recursion is a programming error in the pass,
//! not a recoverable condition, so accessors panic with a message naming
//! the violated contract rather than returning `Option`.

use crate::flags::Flags;
use crate::ids::{ClassId, FieldId, FunctionId, GlobalId, TraitId, TypeParameterId};
use crate::name::Name;
use crate::types::{Type, Variance};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Parameter,
    Local,
}

#[derive(Clone, Debug)]
pub struct Variable {
    pub name: Name,
    pub ty: Type,
    pub kind: VariableKind,
    pub flags: Flags,
}

impl Variable {
    pub fn is_mutable(&self) -> bool {
        !self.flags.contains(Flags::LET)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefiningType {
    Class(ClassId),
    Trait(TraitId),
}

#[derive(Clone, Debug)]
pub struct TypeParameter {
    pub name: Name,
    /// Upper bound; defaults to the root class type when undeclared.
    pub upper_bound: Type,
    /// Lower bound; defaults to the `nothing` class type when undeclared.
    pub lower_bound: Type,
    pub variance: Variance,
    pub flags: Flags,
}

#[derive(Clone, Debug)]
pub struct Field {
    pub name: Name,
    pub ty: Option<Type>,
    pub defining_class: ClassId,
    pub flags: Flags,
}

impl Field {
    pub fn ty(&self) -> &Type {
        self.ty
            .as_ref()
            .expect("Field::ty read before ensureTypeInfoForDefn populated it")
    }

    pub fn is_mutable(&self) -> bool {
        !self.flags.contains(Flags::LET)
    }
}

#[derive(Clone, Debug)]
pub struct Global {
    pub name: Name,
    pub ty: Option<Type>,
    pub flags: Flags,
}

impl Global {
    pub fn ty(&self) -> &Type {
        self.ty
            .as_ref()
            .expect("Global::ty read before ensureTypeInfoForDefn populated it")
    }

    pub fn is_mutable(&self) -> bool {
        !self.flags.contains(Flags::LET)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VariableId(pub u32);

/// A function, method, or constructor (spec §3 "Function"). For methods and
/// constructors, `parameter_types[0]` (and `locals[0]` once bound) is the
/// receiver.
#[derive(Clone, Debug)]
pub struct Function {
    pub name: Name,
    pub type_parameters: Vec<TypeParameterId>,
    pub return_type: Option<Type>,
    pub parameter_types: Option<Vec<Type>>,
    pub locals: Vec<Variable>,
    pub defining_type: Option<DefiningType>,
    /// Ids of methods this one overrides, possibly across packages.
    /// `None` until override resolution has run for the owning class;
    /// `Some(vec![])` means "resolved, overrides nothing".
    pub overrides: Option<Vec<crate::ids::DefinitionId>>,
    pub flags: Flags,
}

impl Function {
    pub fn new(name: Name, flags: Flags) -> Self {
        Function {
            name,
            type_parameters: Vec::new(),
            return_type: None,
            parameter_types: None,
            locals: Vec::new(),
            defining_type: None,
            overrides: None,
            flags,
        }
    }

    pub fn return_type(&self) -> &Type {
        self.return_type
            .as_ref()
            .expect("Function::return_type read before ensureTypeInfoForDefn populated it")
    }

    pub fn parameter_types(&self) -> &[Type] {
        self.parameter_types
            .as_deref()
            .expect("Function::parameter_types read before ensureTypeInfoForDefn populated it")
    }

    /// Parameter types excluding the implicit receiver, for methods and
    /// constructors.
    pub fn non_receiver_parameter_types(&self) -> &[Type] {
        let params = self.parameter_types();
        if self.is_method_or_constructor() {
            &params[1.min(params.len())..]
        } else {
            params
        }
    }

    pub fn is_method_or_constructor(&self) -> bool {
        self.defining_type.is_some()
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(Flags::STATIC)
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(Flags::ABSTRACT)
    }

    pub fn overrides(&self) -> &[crate::ids::DefinitionId] {
        self.overrides
            .as_deref()
            .expect("Function::overrides read before override resolution ran")
    }
}

/// A class (spec §3 "Class"). `supertypes[0]` is the direct superclass
/// (already substituted with this class's own type parameters, invariant
/// 3); the remainder is the C3-linearization of transitive supertypes,
/// ending with the root.
#[derive(Clone, Debug)]
pub struct Class {
    pub name: Name,
    pub type_parameters: Vec<TypeParameterId>,
    pub supertypes: Option<Vec<Type>>,
    pub primary_constructor: Option<FunctionId>,
    pub constructors: Vec<FunctionId>,
    pub fields: Vec<FieldId>,
    pub methods: Vec<FunctionId>,
    pub array_element: Option<Type>,
    pub flags: Flags,
}

impl Class {
    pub fn new(name: Name, flags: Flags) -> Self {
        Class {
            name,
            type_parameters: Vec::new(),
            supertypes: None,
            primary_constructor: None,
            constructors: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            array_element: None,
            flags,
        }
    }

    pub fn supertypes(&self) -> &[Type] {
        self.supertypes
            .as_deref()
            .expect("Class::supertypes read before scope analysis's linearization completed")
    }

    pub fn direct_superclass(&self) -> Option<&Type> {
        self.supertypes().first()
    }

    pub fn is_array_class(&self) -> bool {
        self.array_element.is_some()
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(Flags::ABSTRACT)
    }
}

/// A trait (spec §3 "Trait"): like a class but with no constructors, no
/// fields, and no array elements.
#[derive(Clone, Debug)]
pub struct Trait {
    pub name: Name,
    pub type_parameters: Vec<TypeParameterId>,
    pub supertypes: Option<Vec<Type>>,
    pub methods: Vec<FunctionId>,
    pub flags: Flags,
}

impl Trait {
    pub fn new(name: Name, flags: Flags) -> Self {
        Trait {
            name,
            type_parameters: Vec::new(),
            supertypes: None,
            methods: Vec::new(),
            flags,
        }
    }

    pub fn supertypes(&self) -> &[Type] {
        self.supertypes
            .as_deref()
            .expect("Trait::supertypes read before scope analysis's linearization completed")
    }
}
