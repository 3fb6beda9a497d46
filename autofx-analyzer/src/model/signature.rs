//! Parameters and signatures
//!
//! Types are kept as canonical text; the pointer marker stays part of the
//! type so `*Store` and `Store` never compare equal during conformance.

use autofx_parser::{ParamDecl, SignatureDecl};
use serde::Serialize;
use std::fmt;

/// One parameter or return slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    pub fn named(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_name: type_name.into(),
        }
    }

    pub fn anonymous(type_name: impl Into<String>) -> Self {
        Self {
            name: None,
            type_name: type_name.into(),
        }
    }

    /// The type with any leading pointer markers removed (`**Widget` -> `Widget`)
    pub fn base_type(&self) -> &str {
        self.type_name.trim_start_matches('*')
    }

    pub fn is_pointer(&self) -> bool {
        self.type_name.starts_with('*')
    }
}

impl From<&ParamDecl> for Parameter {
    fn from(decl: &ParamDecl) -> Self {
        Self {
            name: decl.name.clone(),
            type_name: decl.type_text.clone(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} {}", self.type_name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// Ordered parameter and return lists of a callable
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Signature {
    pub params: Vec<Parameter>,
    pub returns: Vec<Parameter>,
}

impl Signature {
    pub fn new(params: Vec<Parameter>, returns: Vec<Parameter>) -> Self {
        Self { params, returns }
    }

    /// `a int, b string`
    pub fn render_params(&self) -> String {
        join_parameters(&self.params)
    }

    /// Empty for no returns, bare for one, parenthesised for several
    pub fn render_returns(&self) -> String {
        match self.returns.len() {
            0 => String::new(),
            1 => self.returns[0].to_string(),
            _ => format!("({})", join_parameters(&self.returns)),
        }
    }

    /// `(a int, b string) (string, error)`
    pub fn render(&self) -> String {
        let returns = self.render_returns();
        if returns.is_empty() {
            format!("({})", self.render_params())
        } else {
            format!("({}) {returns}", self.render_params())
        }
    }
}

impl From<&SignatureDecl> for Signature {
    fn from(decl: &SignatureDecl) -> Self {
        Self {
            params: decl.params.iter().map(Parameter::from).collect(),
            returns: decl.results.iter().map(Parameter::from).collect(),
        }
    }
}

/// Comma plus space between entries, as gofmt prints them. Tools that
/// compare against a bare `,` join need to normalise first.
fn join_parameters(params: &[Parameter]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_get() -> Signature {
        Signature::new(
            vec![Parameter::named("id", "string")],
            vec![Parameter::anonymous("string"), Parameter::anonymous("error")],
        )
    }

    #[test]
    fn test_render_wraps_multiple_returns() {
        assert_eq!(store_get().render(), "(id string) (string, error)");
    }

    #[test]
    fn test_render_single_return_unwrapped() {
        let signature = Signature::new(
            vec![Parameter::named("a", "int"), Parameter::anonymous("string")],
            vec![Parameter::anonymous("*Widget")],
        );

        assert_eq!(signature.render_params(), "a int, string");
        assert_eq!(signature.render_returns(), "*Widget");
        assert_eq!(signature.render(), "(a int, string) *Widget");
    }

    #[test]
    fn test_render_without_returns() {
        let signature = Signature::new(vec![], vec![]);

        assert_eq!(signature.render_returns(), "");
        assert_eq!(signature.render(), "()");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let signature = store_get();
        let first = signature.render();
        let second = signature.render();

        assert_eq!(first, second);
        assert_eq!(signature, store_get());
    }

    #[test]
    fn test_base_type_strips_pointer_markers() {
        assert_eq!(Parameter::anonymous("*Widget").base_type(), "Widget");
        assert_eq!(Parameter::anonymous("**Widget").base_type(), "Widget");
        assert_eq!(Parameter::anonymous("Widget").base_type(), "Widget");
        assert!(Parameter::anonymous("*Widget").is_pointer());
    }
}
