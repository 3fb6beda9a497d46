//! The inspection pipeline
//!
//! Populates a [`Package`] from declaration records, then runs binding,
//! constructor resolution and conformance exactly once each, in that order.

use crate::binder::bind_methods;
use crate::config::AnalyzerConfig;
use crate::conformance::{resolve_implementations, MatchMode};
use crate::constructors::{resolve_constructors, ConstructorConvention, PrefixConvention};
use crate::error::{AnalyzerResult, ResolutionIssue};
use crate::loader::load_package;
use crate::model::{ConcreteType, Function, InterfaceType, Method, Package};
use autofx_parser::{CallableDecl, DeclarationSet, ReceiverExpr, TypeDecl, TypeShape};
use std::path::Path;
use tracing::{debug, info, info_span, warn};

pub struct Inspector {
    convention: Box<dyn ConstructorConvention>,
    match_mode: MatchMode,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self {
            convention: Box::new(PrefixConvention::default()),
            match_mode: MatchMode::default(),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            convention: Box::new(config.convention()),
            match_mode: config.analysis.match_mode,
        }
    }

    pub fn with_convention(mut self, convention: impl ConstructorConvention + 'static) -> Self {
        self.convention = Box::new(convention);
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Build the package model from already-parsed declarations
    pub fn inspect(&self, declarations: DeclarationSet, path: impl Into<String>) -> Package {
        let path = path.into();
        let span = info_span!("inspect", package = %declarations.package_name, path = %path);
        let _guard = span.enter();

        let mut package = Package::new(declarations.package_name, path);
        for decl in declarations.types {
            add_type(&mut package, decl);
        }

        let mut methods = Vec::new();
        for decl in declarations.callables {
            match decl.receiver {
                None => {
                    package.insert_function(Function::from(&decl));
                }
                Some(_) => {
                    if let Some(method) = method_from_decl(&decl) {
                        methods.push(method);
                    }
                }
            }
        }

        let binding = bind_methods(&mut package, methods);
        info!(bound = binding.bound, dropped = binding.dropped, "bound methods");

        let constructors = resolve_constructors(&mut package, self.convention.as_ref());
        info!(
            attached = constructors.attached,
            unresolved = constructors.unresolved,
            "resolved constructors"
        );

        let implementations = resolve_implementations(&mut package, self.match_mode);
        info!(
            interfaces = package.interface_count(),
            implementations,
            mode = %self.match_mode,
            "resolved implementations"
        );

        package
    }

    /// Load a package directory and inspect it
    pub fn inspect_directory(&self, package_dir: &Path) -> AnalyzerResult<Package> {
        let loaded = load_package(package_dir)?;
        Ok(self.inspect(loaded.declarations, package_dir.display().to_string()))
    }
}

fn add_type(package: &mut Package, decl: TypeDecl) {
    match decl.shape {
        TypeShape::Struct => {
            debug!(name = %decl.name, "struct");
            package.insert_concrete_type(ConcreteType::new(decl.name).with_span(decl.span));
        }
        TypeShape::Interface { methods, embedded } => {
            debug!(name = %decl.name, methods = methods.len(), "interface");
            let mut interface = InterfaceType::from_specs(decl.name, &methods).with_embedded(embedded);
            interface.span = decl.span;
            package.insert_interface(interface);
        }
        ref shape @ TypeShape::Other { .. } => {
            let issue = ResolutionIssue::ClassificationMismatch {
                name: decl.name.clone(),
                shape: shape.describe().to_string(),
                span: Some(decl.span.into()),
            };
            warn!("{issue}");
        }
    }
}

fn method_from_decl(decl: &CallableDecl) -> Option<Method> {
    let receiver = decl.receiver.as_ref()?;
    match receiver {
        ReceiverExpr::Named(base) | ReceiverExpr::Pointer(base) => Some(Method::new(
            Function::from(decl),
            receiver.raw_text(),
            base.clone(),
        )),
        ReceiverExpr::Unsupported(text) => {
            let issue = ResolutionIssue::InvalidReceiverExpression {
                method: decl.name.clone(),
                receiver: text.clone(),
                span: Some(decl.span.into()),
            };
            warn!("{issue}");
            None
        }
    }
}
