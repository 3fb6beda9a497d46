//! The package model: the unit of one analysis run

use super::function::Function;
use super::method::{Method, MethodArena, MethodId, TypeId};
use super::types::{ConcreteType, InterfaceType};
use indexmap::IndexMap;

/// Named collections of everything the passes discovered in one package.
///
/// All three maps keep declaration order. Inserting a name that is already
/// present replaces the earlier value in place, so a redeclaration wins
/// without moving the entry.
#[derive(Debug, Clone, Default)]
pub struct Package {
    pub name: String,
    pub path: String,
    interfaces: IndexMap<String, InterfaceType>,
    concrete_types: IndexMap<String, ConcreteType>,
    functions: IndexMap<String, Function>,
    methods: MethodArena,
}

impl Package {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn insert_interface(&mut self, interface: InterfaceType) -> Option<InterfaceType> {
        self.interfaces.insert(interface.name.clone(), interface)
    }

    pub fn insert_concrete_type(&mut self, concrete: ConcreteType) -> Option<ConcreteType> {
        self.concrete_types.insert(concrete.name.clone(), concrete)
    }

    pub fn insert_function(&mut self, function: Function) -> Option<Function> {
        self.functions.insert(function.name.clone(), function)
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceType> {
        self.interfaces.get(name)
    }

    pub fn concrete_type(&self, name: &str) -> Option<&ConcreteType> {
        self.concrete_types.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceType> {
        self.interfaces.values()
    }

    pub fn concrete_types(&self) -> impl Iterator<Item = &ConcreteType> {
        self.concrete_types.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn concrete_type_count(&self) -> usize {
        self.concrete_types.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.concrete_types
            .get_index_of(name)
            .map(|index| TypeId(index as u32))
    }

    pub fn concrete_type_by_id(&self, id: TypeId) -> Option<&ConcreteType> {
        self.concrete_types
            .get_index(id.index())
            .map(|(_, concrete)| concrete)
    }

    pub(crate) fn concrete_type_by_id_mut(&mut self, id: TypeId) -> Option<&mut ConcreteType> {
        self.concrete_types
            .get_index_mut(id.index())
            .map(|(_, concrete)| concrete)
    }

    pub(crate) fn concrete_type_mut(&mut self, name: &str) -> Option<&mut ConcreteType> {
        self.concrete_types.get_mut(name)
    }

    pub(crate) fn interfaces_mut(&mut self) -> impl Iterator<Item = &mut InterfaceType> {
        self.interfaces.values_mut()
    }

    pub fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(id)
    }

    /// All bound methods, in binding order
    pub fn methods(&self) -> &MethodArena {
        &self.methods
    }

    /// Bound methods of a concrete type, in declaration order
    pub fn methods_of<'a>(&'a self, concrete: &'a ConcreteType) -> impl Iterator<Item = &'a Method> {
        concrete
            .method_ids()
            .iter()
            .filter_map(|id| self.methods.get(*id))
    }

    /// Store a method in the arena and attach it to its owner
    pub(crate) fn attach_method(&mut self, owner: TypeId, mut method: Method) -> Option<MethodId> {
        self.concrete_type_by_id(owner)?;
        method.bind_to(owner);
        let id = self.methods.alloc(method);
        self.concrete_type_by_id_mut(owner)?.methods.push(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, Signature};
    use autofx_parser::Span;

    #[test]
    fn test_redeclaration_last_write_wins() {
        let mut package = Package::new("example", "./example");
        package.insert_concrete_type(ConcreteType::new("Widget").with_span(Span::new(0, 10)));
        package.insert_concrete_type(ConcreteType::new("Gadget"));
        let replaced =
            package.insert_concrete_type(ConcreteType::new("Widget").with_span(Span::new(40, 55)));

        assert_eq!(replaced.map(|c| c.span), Some(Span::new(0, 10)));
        assert_eq!(package.concrete_type_count(), 2);
        assert_eq!(package.concrete_type("Widget").map(|c| c.span), Some(Span::new(40, 55)));
        assert_eq!(package.type_id("Widget"), Some(TypeId(0)));
    }

    #[test]
    fn test_function_redeclaration_replaces_signature() {
        let mut package = Package::new("example", "./example");
        package.insert_function(Function::new("init", Signature::default()));
        package.insert_function(Function::new(
            "init",
            Signature::new(vec![Parameter::named("x", "int")], vec![]),
        ));

        assert_eq!(package.function_count(), 1);
        assert_eq!(
            package.function("init").map(Function::render),
            Some("init(x int)".to_string())
        );
    }

    #[test]
    fn test_attach_method_sets_back_reference() {
        let mut package = Package::new("example", "./example");
        package.insert_concrete_type(ConcreteType::new("Service"));
        let owner = package.type_id("Service").unwrap();

        let method = Method::new(Function::new("Run", Signature::default()), "*Service", "Service");
        let id = package.attach_method(owner, method).unwrap();

        let stored = package.method(id).unwrap();
        assert_eq!(stored.owner(), Some(owner));
        assert_eq!(stored.render(&package), "(Service) Run()");
        let service = package.concrete_type("Service").unwrap();
        assert_eq!(service.method_ids(), &[id]);
    }

    #[test]
    fn test_unbound_method_renders_raw_receiver() {
        let package = Package::new("example", "./example");
        let method = Method::new(Function::new("Run", Signature::default()), "*Ghost", "Ghost");

        assert!(!method.is_bound());
        assert_eq!(method.render(&package), "(*Ghost) Run()");
    }
}
