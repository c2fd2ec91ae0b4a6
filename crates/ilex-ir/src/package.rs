//! Packages and dependencies (C3, spec §3 "Package").
//!
//! A `Package` owns its own definitions plus an explicit list of
//! `Dependency` records — one per foreign package it has referenced so
//! far. Each `Dependency` owns parallel extern-record lists mirroring the
//! foreign package's classes, traits, functions (methods included — the
//! spec's prose lists "functions, methods" separately but a method is just
//! a `Function` with `defining_type` set, so one list covers both; see
//! DESIGN.md), globals, and type parameters. A `Dependency` is created on
//! first demand and persists for the rest of compilation (spec §3, §9
//! "Package dependencies as explicit records").

use crate::defn::{Class, Field, Function, Global, Trait, TypeParameter};
use crate::ids::{
    ClassId, DefinitionId, FieldId, FunctionId, GlobalId, LocalIndex, PackageIndex, TraitId,
    TypeParameterId,
};
use crate::name::Name;
use rustc_hash::FxHashMap;
use std::num::NonZeroU32;

#[derive(Default)]
pub struct Dependency {
    pub package: PackageIndex,
    pub classes: Vec<Class>,
    pub traits: Vec<Trait>,
    pub functions: Vec<Function>,
    pub globals: Vec<Global>,
    pub type_parameters: Vec<TypeParameter>,
    /// Fields of externalized classes. Not one of the spec's "five parallel
    /// lists" (a field has no independent existence outside its owning
    /// class), but an extern class mirrors a visibility-filtered subset of
    /// its source's fields (spec §4.6), and those fields need to live
    /// somewhere `Package::field` can resolve a `FieldId` against.
    pub fields: Vec<Field>,
}

impl Dependency {
    fn new(package: PackageIndex) -> Self {
        Dependency {
            package,
            ..Default::default()
        }
    }
}

pub struct Package {
    pub index: PackageIndex,
    pub name: Name,
    pub classes: Vec<Class>,
    pub traits: Vec<Trait>,
    pub functions: Vec<Function>,
    pub globals: Vec<Global>,
    pub fields: Vec<Field>,
    pub type_parameters: Vec<TypeParameter>,
    dependencies: Vec<Dependency>,
    dependency_index: FxHashMap<PackageIndex, usize>,
}

impl Package {
    pub fn new(index: PackageIndex, name: Name) -> Self {
        Package {
            index,
            name,
            classes: Vec::new(),
            traits: Vec::new(),
            functions: Vec::new(),
            globals: Vec::new(),
            fields: Vec::new(),
            type_parameters: Vec::new(),
            dependencies: Vec::new(),
            dependency_index: FxHashMap::default(),
        }
    }

    /// Returns the `Dependency` record for `package`, creating it if this
    /// is the first reference to that foreign package.
    pub fn dependency_mut(&mut self, package: PackageIndex) -> &mut Dependency {
        if let Some(&idx) = self.dependency_index.get(&package) {
            return &mut self.dependencies[idx];
        }
        let idx = self.dependencies.len();
        self.dependencies.push(Dependency::new(package));
        self.dependency_index.insert(package, idx);
        &mut self.dependencies[idx]
    }

    pub fn dependency(&self, package: PackageIndex) -> Option<&Dependency> {
        self.dependency_index
            .get(&package)
            .map(|&idx| &self.dependencies[idx])
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    // --- local definition registration -------------------------------

    pub fn push_class(&mut self, class: Class) -> ClassId {
        let idx = self.classes.len() as u32;
        self.classes.push(class);
        ClassId(DefinitionId::local(self.index, LocalIndex(idx)))
    }

    pub fn push_trait(&mut self, t: Trait) -> TraitId {
        let idx = self.traits.len() as u32;
        self.traits.push(t);
        TraitId(DefinitionId::local(self.index, LocalIndex(idx)))
    }

    pub fn push_function(&mut self, f: Function) -> FunctionId {
        let idx = self.functions.len() as u32;
        self.functions.push(f);
        FunctionId(DefinitionId::local(self.index, LocalIndex(idx)))
    }

    pub fn push_field(&mut self, f: Field) -> FieldId {
        let idx = self.fields.len() as u32;
        self.fields.push(f);
        FieldId(DefinitionId::local(self.index, LocalIndex(idx)))
    }

    pub fn push_global(&mut self, g: Global) -> GlobalId {
        let idx = self.globals.len() as u32;
        self.globals.push(g);
        GlobalId(DefinitionId::local(self.index, LocalIndex(idx)))
    }

    pub fn push_type_parameter(&mut self, p: TypeParameter) -> TypeParameterId {
        let idx = self.type_parameters.len() as u32;
        self.type_parameters.push(p);
        TypeParameterId(DefinitionId::local(self.index, LocalIndex(idx)))
    }

    // --- foreign extern registration (C6) -----------------------------

    pub fn push_extern_class(&mut self, package: PackageIndex, class: Class) -> ClassId {
        let dep = self.dependency_mut(package);
        let idx = dep.classes.len() as u32;
        dep.classes.push(class);
        let extern_index = NonZeroU32::new(idx + 1).unwrap();
        ClassId(DefinitionId::foreign(package, LocalIndex(idx), extern_index))
    }

    pub fn push_extern_trait(&mut self, package: PackageIndex, t: Trait) -> TraitId {
        let dep = self.dependency_mut(package);
        let idx = dep.traits.len() as u32;
        dep.traits.push(t);
        let extern_index = NonZeroU32::new(idx + 1).unwrap();
        TraitId(DefinitionId::foreign(package, LocalIndex(idx), extern_index))
    }

    pub fn push_extern_function(&mut self, package: PackageIndex, f: Function) -> FunctionId {
        let dep = self.dependency_mut(package);
        let idx = dep.functions.len() as u32;
        dep.functions.push(f);
        let extern_index = NonZeroU32::new(idx + 1).unwrap();
        FunctionId(DefinitionId::foreign(package, LocalIndex(idx), extern_index))
    }

    pub fn push_extern_global(&mut self, package: PackageIndex, g: Global) -> GlobalId {
        let dep = self.dependency_mut(package);
        let idx = dep.globals.len() as u32;
        dep.globals.push(g);
        let extern_index = NonZeroU32::new(idx + 1).unwrap();
        GlobalId(DefinitionId::foreign(package, LocalIndex(idx), extern_index))
    }

    pub fn push_extern_field(&mut self, package: PackageIndex, f: Field) -> FieldId {
        let dep = self.dependency_mut(package);
        let idx = dep.fields.len() as u32;
        dep.fields.push(f);
        let extern_index = NonZeroU32::new(idx + 1).unwrap();
        FieldId(DefinitionId::foreign(package, LocalIndex(idx), extern_index))
    }

    pub fn push_extern_type_parameter(
        &mut self,
        package: PackageIndex,
        p: TypeParameter,
    ) -> TypeParameterId {
        let dep = self.dependency_mut(package);
        let idx = dep.type_parameters.len() as u32;
        dep.type_parameters.push(p);
        let extern_index = NonZeroU32::new(idx + 1).unwrap();
        TypeParameterId(DefinitionId::foreign(package, LocalIndex(idx), extern_index))
    }

    // --- lookup --------------------------------------------------------

    pub fn class(&self, id: ClassId) -> &Class {
        self.resolve(id.0, &self.classes, |d| &d.classes)
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut Class {
        self.resolve_mut(id.0, |p| &mut p.classes, |d| &mut d.classes)
    }

    pub fn trait_(&self, id: TraitId) -> &Trait {
        self.resolve(id.0, &self.traits, |d| &d.traits)
    }

    pub fn trait_mut(&mut self, id: TraitId) -> &mut Trait {
        self.resolve_mut(id.0, |p| &mut p.traits, |d| &mut d.traits)
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        self.resolve(id.0, &self.functions, |d| &d.functions)
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut Function {
        self.resolve_mut(id.0, |p| &mut p.functions, |d| &mut d.functions)
    }

    pub fn field(&self, id: FieldId) -> &Field {
        self.resolve(id.0, &self.fields, |d| &d.fields)
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut Field {
        self.resolve_mut(id.0, |p| &mut p.fields, |d| &mut d.fields)
    }

    pub fn global(&self, id: GlobalId) -> &Global {
        self.resolve(id.0, &self.globals, |d| &d.globals)
    }

    pub fn type_parameter(&self, id: TypeParameterId) -> &TypeParameter {
        self.resolve(id.0, &self.type_parameters, |d| &d.type_parameters)
    }

    fn resolve<'a, T>(
        &'a self,
        id: DefinitionId,
        local: &'a [T],
        foreign: impl FnOnce(&'a Dependency) -> &'a [T],
    ) -> &'a T {
        if id.is_local_to(self.index) {
            &local[id.local.0 as usize]
        } else {
            let dep = self
                .dependency(id.package)
                .expect("foreign definition referenced with no Dependency record");
            &foreign(dep)[id.local.0 as usize]
        }
    }

    fn resolve_mut<'a, T>(
        &'a mut self,
        id: DefinitionId,
        local: impl FnOnce(&'a mut Package) -> &'a mut Vec<T>,
        foreign: impl FnOnce(&'a mut Dependency) -> &'a mut Vec<T>,
    ) -> &'a mut T {
        if id.is_local_to(self.index) {
            &mut local(self)[id.local.0 as usize]
        } else {
            let package = id.package;
            let dep = self
                .dependency_mut(package)
                .pipe(foreign);
            &mut dep[id.local.0 as usize]
        }
    }
}

trait Pipe: Sized {
    fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }
}
impl<T> Pipe for T {}
