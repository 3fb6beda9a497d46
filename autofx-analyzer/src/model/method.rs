//! Methods and the method arena
//!
//! Bound methods live in a single append-only arena owned by the package.
//! Concrete types hold [`MethodId`]s into it and each method points back at
//! its owner through a [`TypeId`], so no reference ever aliases a slot that
//! could move.

use super::function::Function;
use super::package::Package;

/// Index of a concrete type in its package's (insertion-ordered) type map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable handle to a method stored in a [`MethodArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

impl MethodId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A function declared with a receiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub function: Function,
    /// Receiver exactly as written, pointer marker included
    receiver_text: String,
    /// Receiver type name with the pointer marker stripped
    receiver_name: String,
    owner: Option<TypeId>,
}

impl Method {
    pub fn new(
        function: Function,
        receiver_text: impl Into<String>,
        receiver_name: impl Into<String>,
    ) -> Self {
        Self {
            function,
            receiver_text: receiver_text.into(),
            receiver_name: receiver_name.into(),
            owner: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn receiver_name(&self) -> &str {
        &self.receiver_name
    }

    pub fn receiver_text(&self) -> &str {
        &self.receiver_text
    }

    /// Owning type, known only once the binder has run
    pub fn owner(&self) -> Option<TypeId> {
        self.owner
    }

    pub fn is_bound(&self) -> bool {
        self.owner.is_some()
    }

    pub(crate) fn bind_to(&mut self, owner: TypeId) {
        self.owner = Some(owner);
    }

    /// The owning type's name once bound, else the raw receiver text
    pub fn receiver_display<'a>(&'a self, package: &'a Package) -> &'a str {
        self.owner
            .and_then(|id| package.concrete_type_by_id(id))
            .map(|owner| owner.name.as_str())
            .unwrap_or(&self.receiver_text)
    }

    /// `(Service) DoSomething(something string) string`
    pub fn render(&self, package: &Package) -> String {
        format!("({}) {}", self.receiver_display(package), self.function.render())
    }
}

/// Append-only store of bound methods
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodArena {
    methods: Vec<Method>,
}

impl MethodArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, method: Method) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(method);
        id
    }

    pub fn get(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MethodId, &Method)> {
        self.methods
            .iter()
            .enumerate()
            .map(|(index, method)| (MethodId(index as u32), method))
    }
}
