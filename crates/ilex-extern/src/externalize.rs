//! Projecting foreign definitions into a target package's `Dependency`
//! records (spec §4.6).
//!
//! Each `externalize_*` method is idempotent and identity-preserving
//! (spec: "querying the extern of the same foreign definition twice
//! returns the same record") via a per-kind cache keyed by the foreign
//! definition's own id. Built-in definitions pass through unchanged
//! ("externs for built-in definitions return the built-in itself").
//!
//! Classes are externalized via a reserve-then-patch sequence: a
//! placeholder is pushed and cached *before* its supertypes/fields/methods
//! are walked, so a field or method whose type mentions the enclosing
//! class (a self-referential container, e.g. a linked node) resolves to
//! the already-reserved id instead of recursing forever.

use ilex_common::Atom;
use ilex_ir::{
    Class, ClassId, ClassType, DefiningType, ExistentialType, Field, FieldId, Flags, Function,
    FunctionId, Global, GlobalId, Package, PackageIndex, Trait, TraitId, Type, TypeParameter,
    TypeParameterId, VariableType,
};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::loader::PackageLoader;

pub struct Externalizer<'t, L: PackageLoader> {
    target: &'t mut Package,
    loader: &'t L,
    classes: FxHashMap<ilex_ir::DefinitionId, ClassId>,
    traits: FxHashMap<ilex_ir::DefinitionId, TraitId>,
    functions: FxHashMap<ilex_ir::DefinitionId, FunctionId>,
    globals: FxHashMap<ilex_ir::DefinitionId, GlobalId>,
    type_parameters: FxHashMap<ilex_ir::DefinitionId, TypeParameterId>,
    fields: FxHashMap<ilex_ir::DefinitionId, FieldId>,
}

impl<'t, L: PackageLoader> Externalizer<'t, L> {
    pub fn new(target: &'t mut Package, loader: &'t L) -> Self {
        Externalizer {
            target,
            loader,
            classes: FxHashMap::default(),
            traits: FxHashMap::default(),
            functions: FxHashMap::default(),
            globals: FxHashMap::default(),
            type_parameters: FxHashMap::default(),
            fields: FxHashMap::default(),
        }
    }

    fn is_already_local_or_builtin(&self, id: ilex_ir::DefinitionId) -> bool {
        id.is_local_to(self.target.index) || id.package == PackageIndex::BUILTIN
    }

    pub fn externalize_class(&mut self, id: ClassId) -> ClassId {
        if self.is_already_local_or_builtin(id.0) {
            return id;
        }
        if let Some(&cached) = self.classes.get(&id.0) {
            return cached;
        }

        let source = self.loader.package(id.0.package);
        let src = source.class(id).clone();
        trace!(class = ?id.0, "externalizing class");

        let placeholder = Class::new(src.name.clone(), src.flags.externalized());
        let new_id = self.target.push_extern_class(id.0.package, placeholder);
        self.classes.insert(id.0, new_id);

        let type_parameters: Vec<_> = src
            .type_parameters
            .iter()
            .map(|&p| self.externalize_type_parameter(p))
            .collect();
        let supertypes = src
            .supertypes
            .as_ref()
            .map(|sts| sts.iter().map(|t| self.externalize_type(t)).collect());

        let is_accessible = |flags: Flags| !flags.contains(Flags::PRIVATE);

        let fields: Vec<FieldId> = src
            .fields
            .iter()
            .filter(|&&fid| is_accessible(source.field(fid).flags))
            .map(|&fid| self.externalize_field(fid))
            .collect();

        let methods: Vec<FunctionId> = src
            .methods
            .iter()
            .filter(|&&m| is_accessible(source.function(m).flags))
            .map(|&m| self.externalize_function(m))
            .collect();

        let primary_constructor = src
            .primary_constructor
            .filter(|&c| is_accessible(source.function(c).flags))
            .map(|c| self.externalize_function(c));
        let constructors: Vec<FunctionId> = src
            .constructors
            .iter()
            .filter(|&&c| is_accessible(source.function(c).flags))
            .map(|&c| self.externalize_function(c))
            .collect();

        let array_element = src.array_element.as_ref().map(|t| self.externalize_type(t));

        let class = self.target.class_mut(new_id);
        class.type_parameters = type_parameters;
        class.supertypes = supertypes;
        class.fields = fields;
        class.methods = methods;
        class.primary_constructor = primary_constructor;
        class.constructors = constructors;
        class.array_element = array_element;

        new_id
    }

    pub fn externalize_trait(&mut self, id: TraitId) -> TraitId {
        if self.is_already_local_or_builtin(id.0) {
            return id;
        }
        if let Some(&cached) = self.traits.get(&id.0) {
            return cached;
        }

        let source = self.loader.package(id.0.package);
        let src = source.trait_(id).clone();

        let placeholder = Trait::new(src.name.clone(), src.flags.externalized());
        let new_id = self.target.push_extern_trait(id.0.package, placeholder);
        self.traits.insert(id.0, new_id);

        let type_parameters: Vec<_> = src
            .type_parameters
            .iter()
            .map(|&p| self.externalize_type_parameter(p))
            .collect();
        let supertypes = src
            .supertypes
            .as_ref()
            .map(|sts| sts.iter().map(|t| self.externalize_type(t)).collect());
        let methods: Vec<FunctionId> = src
            .methods
            .iter()
            .filter(|&&m| !source.function(m).flags.contains(Flags::PRIVATE))
            .map(|&m| self.externalize_function(m))
            .collect();

        let t = self.target.trait_mut(new_id);
        t.type_parameters = type_parameters;
        t.supertypes = supertypes;
        t.methods = methods;

        new_id
    }

    pub fn externalize_function(&mut self, id: FunctionId) -> FunctionId {
        if self.is_already_local_or_builtin(id.0) {
            return id;
        }
        if let Some(&cached) = self.functions.get(&id.0) {
            return cached;
        }

        let source = self.loader.package(id.0.package);
        let src = source.function(id).clone();

        let type_parameters: Vec<_> = src
            .type_parameters
            .iter()
            .map(|&p| self.externalize_type_parameter(p))
            .collect();
        let return_type = src.return_type.as_ref().map(|t| self.externalize_type(t));
        let parameter_types = src
            .parameter_types
            .as_ref()
            .map(|ps| ps.iter().map(|t| self.externalize_type(t)).collect());
        let defining_type = src.defining_type.map(|dt| match dt {
            DefiningType::Class(c) => DefiningType::Class(self.externalize_class(c)),
            DefiningType::Trait(t) => DefiningType::Trait(self.externalize_trait(t)),
        });

        let new_function = Function {
            name: src.name.clone(),
            type_parameters,
            return_type,
            // A function body's locals are never part of its public
            // signature and carry no meaning across a package boundary.
            locals: Vec::new(),
            parameter_types,
            defining_type,
            overrides: src.overrides.clone(),
            flags: src.flags.externalized(),
        };
        let new_id = self.target.push_extern_function(id.0.package, new_function);
        self.functions.insert(id.0, new_id);
        new_id
    }

    pub fn externalize_field(&mut self, id: FieldId) -> FieldId {
        if self.is_already_local_or_builtin(id.0) {
            return id;
        }
        if let Some(&cached) = self.fields.get(&id.0) {
            return cached;
        }

        let source = self.loader.package(id.0.package);
        let src = source.field(id).clone();
        let ty = src.ty.as_ref().map(|t| self.externalize_type(t));
        let defining_class = self.externalize_class(src.defining_class);

        let new_field = Field {
            name: src.name.clone(),
            ty,
            defining_class,
            flags: src.flags.externalized(),
        };
        let new_id = self.target.push_extern_field(id.0.package, new_field);
        self.fields.insert(id.0, new_id);
        new_id
    }

    pub fn externalize_global(&mut self, id: GlobalId) -> GlobalId {
        if self.is_already_local_or_builtin(id.0) {
            return id;
        }
        if let Some(&cached) = self.globals.get(&id.0) {
            return cached;
        }

        let source = self.loader.package(id.0.package);
        let src = source.global(id).clone();
        let ty = src.ty.as_ref().map(|t| self.externalize_type(t));

        let new_global = Global {
            name: src.name.clone(),
            ty,
            flags: src.flags.externalized(),
        };
        let new_id = self.target.push_extern_global(id.0.package, new_global);
        self.globals.insert(id.0, new_id);
        new_id
    }

    pub fn externalize_type_parameter(&mut self, id: TypeParameterId) -> TypeParameterId {
        if self.is_already_local_or_builtin(id.0) {
            return id;
        }
        if let Some(&cached) = self.type_parameters.get(&id.0) {
            return cached;
        }

        let source = self.loader.package(id.0.package);
        let src = source.type_parameter(id).clone();
        let upper_bound = self.externalize_type(&src.upper_bound);
        let lower_bound = self.externalize_type(&src.lower_bound);

        let new_param = TypeParameter {
            name: src.name.clone(),
            upper_bound,
            lower_bound,
            variance: src.variance,
            flags: src.flags,
        };
        let new_id = self
            .target
            .push_extern_type_parameter(id.0.package, new_param);
        self.type_parameters.insert(id.0, new_id);
        new_id
    }

    pub fn externalize_type(&mut self, ty: &Type) -> Type {
        match ty {
            Type::Primitive(_) | Type::NoType => ty.clone(),
            Type::Class(c) => Type::Class(ClassType {
                class: self.externalize_class(c.class),
                arguments: c.arguments.iter().map(|a| self.externalize_type(a)).collect(),
                nullable: c.nullable,
            }),
            Type::Variable(v) => Type::Variable(VariableType {
                param: self.externalize_type_parameter(v.param),
                nullable: v.nullable,
            }),
            Type::Existential(e) => Type::Existential(ExistentialType {
                captured: e
                    .captured
                    .iter()
                    .map(|&p| self.externalize_type_parameter(p))
                    .collect(),
                inner: Box::new(self.externalize_type(&e.inner)),
            }),
        }
    }

    /// Names of packages this target package now depends on. Diagnostic
    /// helper, not consulted by the algebra itself.
    pub fn referenced_package_names(&self) -> Vec<(PackageIndex, Option<Atom>)> {
        self.target
            .dependencies()
            .iter()
            .map(|d| (d.package, None))
            .collect()
    }
}
