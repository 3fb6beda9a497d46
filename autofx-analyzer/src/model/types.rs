//! Concrete and interface types

use super::function::{Function, Visibility};
use super::method::MethodId;
use autofx_parser::{MethodSpecDecl, Span};

/// A nominal, struct-shaped type that can own methods and be constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteType {
    pub name: String,
    visibility: Visibility,
    pub(crate) methods: Vec<MethodId>,
    pub(crate) constructor: Option<Function>,
    pub span: Span,
}

impl ConcreteType {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            visibility: Visibility::of(&name),
            name,
            methods: Vec::new(),
            constructor: None,
            span: Span::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    /// Bound methods in the order they were declared
    pub fn method_ids(&self) -> &[MethodId] {
        &self.methods
    }

    pub fn constructor(&self) -> Option<&Function> {
        self.constructor.as_ref()
    }
}

/// A structural contract: the method set a type must expose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceType {
    pub name: String,
    /// Required methods; the receiver is implicit. After conformance has
    /// run this also holds the methods promoted from embedded interfaces.
    pub methods: Vec<Function>,
    /// Embedded interfaces and constraint terms as written
    pub embedded: Vec<String>,
    unresolved: Vec<String>,
    implementations: Vec<String>,
    pub span: Span,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>, methods: Vec<Function>) -> Self {
        Self {
            name: name.into(),
            methods,
            embedded: Vec::new(),
            unresolved: Vec::new(),
            implementations: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn from_specs(name: impl Into<String>, specs: &[MethodSpecDecl]) -> Self {
        let methods = specs
            .iter()
            .map(|spec| Function::new(spec.name.clone(), (&spec.signature).into()))
            .collect();
        Self::new(name, methods)
    }

    pub fn with_embedded(mut self, embedded: Vec<String>) -> Self {
        self.embedded = embedded;
        self
    }

    pub fn find_method(&self, name: &str) -> Option<&Function> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Embedded elements that name no interface of the package. An
    /// interface with any of these has an unknown method set.
    pub fn unresolved_embeds(&self) -> &[String] {
        &self.unresolved
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub(crate) fn set_unresolved(&mut self, unresolved: Vec<String>) {
        self.unresolved = unresolved;
    }

    /// Names of the concrete types found to satisfy this interface
    pub fn implementations(&self) -> &[String] {
        &self.implementations
    }

    pub(crate) fn record_implementation(&mut self, type_name: String) {
        self.implementations.push(type_name);
    }
}
