//! Free functions and constructors

use super::signature::Signature;
use autofx_parser::CallableDecl;
use serde::Serialize;

/// Exported-ness, derived once from the first letter of a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Lowercase first character means private; everything else is public
    pub fn of(name: &str) -> Self {
        match name.chars().next() {
            Some(first) if first.is_lowercase() => Visibility::Private,
            _ => Visibility::Public,
        }
    }
}

/// A free function, constructor or the callable part of a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    visibility: Visibility,
    pub signature: Signature,
}

impl Function {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        let name = name.into();
        Self {
            visibility: Visibility::of(&name),
            name,
            signature,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    /// `Get(id string) (string, error)`
    pub fn render(&self) -> String {
        format!("{}{}", self.name, self.signature.render())
    }
}

impl From<&CallableDecl> for Function {
    fn from(decl: &CallableDecl) -> Self {
        Function::new(decl.name.clone(), Signature::from(&decl.signature))
    }
}
