// autofx Parser Error Handling
// Declaration front-end errors with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Parse error: {message}")]
    #[diagnostic(
        code(autofx::parse::pest_error),
        help("Check the Go syntax near the highlighted location")
    )]
    PestError {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Mixed named and unnamed parameters")]
    #[diagnostic(
        code(autofx::parse::mixed_parameters),
        help("Either every parameter in a list has a name or none does")
    )]
    MixedParameters {
        #[source_code]
        src: String,
        #[label("parameter list declared here")]
        span: SourceSpan,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(
        code(autofx::parse::unexpected_rule),
        help("Expected rule: {expected}")
    )]
    UnexpectedRule {
        expected: String,
        found: Rule,
        span: crate::decl::Span,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<&str> = positives.iter().map(rule_description).collect();
                format!("expected {}", expected.join(" or "))
            }
            pest::error::ErrorVariant::ParsingError { .. } => "unexpected input".to_string(),
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError::PestError { src, span, message }
    }

    pub fn mixed_parameters(src: String, span: crate::decl::Span) -> Self {
        ParseError::MixedParameters {
            src,
            span: span.into(),
        }
    }

    pub fn unexpected_rule(expected: impl Into<String>, found: Rule, span: crate::decl::Span) -> Self {
        ParseError::UnexpectedRule {
            expected: expected.into(),
            found,
            span,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_description(rule: &Rule) -> &'static str {
    match rule {
        Rule::package_clause => "a package clause (package name)",
        Rule::identifier => "an identifier",
        Rule::qualified_ident => "a qualified name (pkg.Name)",
        Rule::import_decl => "an import declaration",
        Rule::import_spec => "an import path",
        Rule::type_decl => "a type declaration",
        Rule::type_spec => "a type specification",
        Rule::type_expr => "a type",
        Rule::func_decl => "a function declaration",
        Rule::value_decl => "a const or var declaration",
        Rule::parameters => "a parameter list",
        Rule::parameter_decl => "a parameter",
        Rule::method_spec => "a method specification",
        Rule::embedded_elem => "an embedded interface",
        Rule::brace_group => "a '{ ... }' block",
        Rule::string_lit => "a string literal",
        Rule::EOI => "end of file",
        _ => "a declaration",
    }
}
