//! autofx Analyzer
//!
//! Builds a semantic model of a Go package from its declarations and resolves
//! the relationships a dependency-injection generator needs.
//!
//! ## Architecture
//!
//! - **Semantic Model**: a [`Package`] owning interfaces, concrete types and
//!   free functions in insertion-ordered maps, with methods in an arena
//! - **Binder**: attaches methods to the concrete type named by their receiver
//! - **Constructor Resolver**: finds each concrete type's constructor using a
//!   pluggable [`ConstructorConvention`]
//! - **Conformance Engine**: lists, per interface, the concrete types that
//!   structurally satisfy it
//!
//! The passes run once each, in that order, inside [`Inspector::inspect`].
//! Nothing here installs a logger; events go through `tracing` and the host
//! decides where they end up.

pub mod binder;
pub mod config;
pub mod conformance;
pub mod constructors;
pub mod error;
pub mod export;
pub mod inspector;
pub mod loader;
pub mod model;
pub mod report;

pub use binder::{bind_methods, BindingSummary};
pub use config::{AnalysisSettings, AnalyzerConfig, GenerateSettings};
pub use conformance::{expand_embedded, method_matches, resolve_implementations, satisfies, MatchMode};
pub use constructors::{
    resolve_constructors, ConstructorConvention, ConstructorSummary, PrefixConvention,
};
pub use error::{AnalyzerError, AnalyzerResult, ReferenceKind, ResolutionIssue};
pub use export::PackageDocument;
pub use inspector::Inspector;
pub use loader::{load_package, LoadedPackage};
pub use model::{
    ConcreteType, Function, InterfaceType, Method, MethodId, Package, Parameter, Signature,
    TypeId, Visibility,
};
pub use report::Report;

use autofx_parser::DeclarationSet;
use std::path::Path;

/// Inspect parsed declarations with the default settings
pub fn inspect_declarations(declarations: DeclarationSet, path: impl Into<String>) -> Package {
    Inspector::new().inspect(declarations, path)
}

/// Load, configure and inspect a package directory.
///
/// Settings come from the directory's `autofx.toml` when there is one.
pub fn inspect_package_dir(package_dir: &Path) -> AnalyzerResult<Package> {
    let config = AnalyzerConfig::load_from_directory(package_dir)?;
    Inspector::from_config(&config).inspect_directory(package_dir)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
