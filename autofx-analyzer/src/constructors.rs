//! Constructor resolution
//!
//! A free function is a constructor candidate when the naming convention
//! accepts it and it returns something. The type it constructs is the base
//! type of its first return.

use crate::error::{ReferenceKind, ResolutionIssue};
use crate::model::{Function, Package};
use tracing::debug;

/// Decides whether a function name looks like a constructor
pub trait ConstructorConvention {
    fn is_constructor_name(&self, name: &str) -> bool;
}

impl<F> ConstructorConvention for F
where
    F: Fn(&str) -> bool,
{
    fn is_constructor_name(&self, name: &str) -> bool {
        self(name)
    }
}

/// Names starting with a literal prefix, `New` by default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixConvention(pub String);

impl PrefixConvention {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }
}

impl Default for PrefixConvention {
    fn default() -> Self {
        Self("New".to_string())
    }
}

impl ConstructorConvention for PrefixConvention {
    fn is_constructor_name(&self, name: &str) -> bool {
        name.starts_with(&self.0)
    }
}

/// Counts from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructorSummary {
    pub attached: usize,
    pub unresolved: usize,
}

/// The type a candidate constructs, if it is a candidate at all
fn constructed_type<'a>(
    function: &'a Function,
    convention: &dyn ConstructorConvention,
) -> Option<&'a str> {
    if !convention.is_constructor_name(&function.name) {
        return None;
    }
    function.signature.returns.first().map(|first| first.base_type())
}

/// Attach constructors to concrete types.
///
/// Candidates are visited by ascending name, and a later candidate for the
/// same type overwrites an earlier one.
pub fn resolve_constructors(
    package: &mut Package,
    convention: &dyn ConstructorConvention,
) -> ConstructorSummary {
    let mut candidates: Vec<(String, Function)> = package
        .functions()
        .filter_map(|function| {
            constructed_type(function, convention)
                .map(|target| (target.to_string(), function.clone()))
        })
        .collect();
    candidates.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));

    let mut summary = ConstructorSummary::default();
    for (target, function) in candidates {
        match package.concrete_type_mut(&target) {
            Some(concrete) => {
                debug!(constructor = %function.name, target = %target, "attached constructor");
                concrete.constructor = Some(function);
                summary.attached += 1;
            }
            None => {
                let issue = ResolutionIssue::UnresolvedReference {
                    name: function.name.clone(),
                    reference: target,
                    kind: ReferenceKind::Constructor,
                };
                debug!("{issue}");
                summary.unresolved += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConcreteType, Parameter, Signature};
    use pretty_assertions::assert_eq;

    fn constructor(name: &str, returns: &[&str]) -> Function {
        Function::new(
            name,
            Signature::new(
                vec![],
                returns.iter().map(|r| Parameter::anonymous(*r)).collect(),
            ),
        )
    }

    fn constructor_name(package: &Package, type_name: &str) -> Option<String> {
        package
            .concrete_type(type_name)
            .and_then(|c| c.constructor())
            .map(|f| f.name.clone())
    }

    #[test]
    fn test_constructor_attached_to_existing_type() {
        let mut package = Package::new("example", "./example");
        package.insert_concrete_type(ConcreteType::new("Widget"));
        package.insert_function(constructor("NewWidget", &["*Widget", "error"]));

        let summary = resolve_constructors(&mut package, &PrefixConvention::default());

        assert_eq!(summary, ConstructorSummary { attached: 1, unresolved: 0 });
        assert_eq!(constructor_name(&package, "Widget"), Some("NewWidget".to_string()));
    }

    #[test]
    fn test_constructor_for_missing_type_leaves_model_untouched() {
        let mut package = Package::new("example", "./example");
        package.insert_concrete_type(ConcreteType::new("Widget"));
        package.insert_function(constructor("NewGadget", &["*Gadget"]));

        let summary = resolve_constructors(&mut package, &PrefixConvention::default());

        assert_eq!(summary, ConstructorSummary { attached: 0, unresolved: 1 });
        assert_eq!(constructor_name(&package, "Widget"), None);
        assert!(package.concrete_type("Gadget").is_none());
    }

    #[test]
    fn test_non_candidates_are_ignored() {
        let mut package = Package::new("example", "./example");
        package.insert_concrete_type(ConcreteType::new("Widget"));
        package.insert_function(constructor("NewWidget", &[]));
        package.insert_function(constructor("MakeWidget", &["*Widget"]));

        let summary = resolve_constructors(&mut package, &PrefixConvention::default());

        assert_eq!(summary, ConstructorSummary::default());
        assert_eq!(constructor_name(&package, "Widget"), None);
    }

    #[test]
    fn test_lexicographically_last_candidate_wins() {
        let mut package = Package::new("example", "./example");
        package.insert_concrete_type(ConcreteType::new("Widget"));
        // Declared in reverse order on purpose
        package.insert_function(constructor("NewWidgetWithDefaults", &["*Widget"]));
        package.insert_function(constructor("NewWidget", &["Widget"]));

        resolve_constructors(&mut package, &PrefixConvention::default());

        assert_eq!(
            constructor_name(&package, "Widget"),
            Some("NewWidgetWithDefaults".to_string())
        );
    }

    #[test]
    fn test_custom_convention() {
        let mut package = Package::new("example", "./example");
        package.insert_concrete_type(ConcreteType::new("Widget"));
        package.insert_function(constructor("MakeWidget", &["*Widget"]));

        let convention = |name: &str| name.starts_with("Make");
        resolve_constructors(&mut package, &convention);

        assert_eq!(constructor_name(&package, "Widget"), Some("MakeWidget".to_string()));
        assert!(PrefixConvention::new("Build").is_constructor_name("BuildWidget"));
    }
}
