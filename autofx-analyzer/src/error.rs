//! Error types for the autofx analyzer
//!
//! Following the parser's miette patterns for consistent error reporting.
//! Only [`AnalyzerError`] ever leaves an analysis run; [`ResolutionIssue`]s
//! are logged where they happen and the offending declaration is skipped.

use autofx_parser::ParseError;
use miette::{Diagnostic, SourceSpan};
use std::fmt;
use thiserror::Error;

/// Fatal errors: the run stops and no model is produced
#[derive(Error, Diagnostic, Debug)]
pub enum AnalyzerError {
    #[error("Failed to load package at {path}: {reason}")]
    #[diagnostic(
        code(autofx::analyzer::package_load_failure),
        help("Point the package path at a directory containing the package's .go files")
    )]
    PackageLoadFailure { path: String, reason: String },

    #[error("Failed to parse {file}")]
    #[diagnostic(
        code(autofx::analyzer::parse_failure),
        help("The package cannot be analysed until every source file parses")
    )]
    ParseFailure {
        file: String,
        #[source]
        #[diagnostic_source]
        source: ParseError,
    },

    #[error("Failed to render output: {reason}")]
    #[diagnostic(
        code(autofx::analyzer::render_failure),
        help("The analysed model is still valid; only the output step failed")
    )]
    RenderFailure { reason: String },
}

impl AnalyzerError {
    pub fn package_load(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        AnalyzerError::PackageLoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn render(reason: impl fmt::Display) -> Self {
        AnalyzerError::RenderFailure {
            reason: reason.to_string(),
        }
    }

    /// Whether this error happened before any model could be built
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            AnalyzerError::PackageLoadFailure { .. } | AnalyzerError::ParseFailure { .. }
        )
    }
}

/// What an unresolved name was supposed to refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Receiver,
    Constructor,
    Embedded,
}

impl ReferenceKind {
    /// The kind of declaration the reference should have named
    pub fn target(self) -> &'static str {
        match self {
            ReferenceKind::Receiver | ReferenceKind::Constructor => "struct",
            ReferenceKind::Embedded => "interface",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Receiver => write!(f, "receiver"),
            ReferenceKind::Constructor => write!(f, "constructor result"),
            ReferenceKind::Embedded => write!(f, "embedded element"),
        }
    }
}

/// Non-fatal problems: logged, then the declaration is skipped
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ResolutionIssue {
    #[error("Type {name} is a {shape}, neither struct nor interface")]
    #[diagnostic(
        code(autofx::analyzer::classification_mismatch),
        severity(Warning),
        help("Only struct and interface declarations take part in the analysis")
    )]
    ClassificationMismatch {
        name: String,
        shape: String,
        #[label("skipped declaration")]
        span: Option<SourceSpan>,
    },

    #[error("Method {method} has an unsupported receiver type {receiver}")]
    #[diagnostic(
        code(autofx::analyzer::invalid_receiver),
        severity(Warning),
        help("Receivers must be a named type or a pointer to a named type")
    )]
    InvalidReceiverExpression {
        method: String,
        receiver: String,
        #[label("receiver declared here")]
        span: Option<SourceSpan>,
    },

    #[error("{kind} {reference} of {name} matches no {} in the package", .kind.target())]
    #[diagnostic(
        code(autofx::analyzer::unresolved_reference),
        severity(Advice)
    )]
    UnresolvedReference {
        name: String,
        reference: String,
        kind: ReferenceKind,
    },
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
