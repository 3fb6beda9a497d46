//! Structural conformance
//!
//! A concrete type satisfies an interface when, for each required method,
//! it has a method with the same name and the same parameter and return
//! counts whose slots match under the active [`MatchMode`].
//!
//! Embedded interfaces contribute their methods to the embedding interface
//! before any type is checked. An embedded element that names no interface
//! of the package leaves the method set unknown, and such an interface is
//! never reported as implemented.

use crate::error::{ReferenceKind, ResolutionIssue};
use crate::model::{Function, InterfaceType, Package, Parameter};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// How parameter and return lists are compared once arities agree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Each required slot must appear somewhere in the candidate's list.
    /// Slots are not consumed, so one candidate slot can cover several
    /// identical required slots.
    #[default]
    Membership,
    /// Both lists must hold the same slots with the same multiplicities
    Multiset,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Membership => write!(f, "membership"),
            MatchMode::Multiset => write!(f, "multiset"),
        }
    }
}

fn slots_match(required: &[Parameter], offered: &[Parameter], mode: MatchMode) -> bool {
    match mode {
        MatchMode::Membership => required.iter().all(|slot| offered.contains(slot)),
        MatchMode::Multiset => {
            let mut remaining: Vec<&Parameter> = offered.iter().collect();
            required.iter().all(|slot| {
                match remaining.iter().position(|candidate| *candidate == slot) {
                    Some(index) => {
                        remaining.swap_remove(index);
                        true
                    }
                    None => false,
                }
            })
        }
    }
}

/// Whether `offered` can stand in for the interface method `required`
pub fn method_matches(required: &Function, offered: &Function, mode: MatchMode) -> bool {
    if required.name != offered.name {
        return false;
    }

    let (want, have) = (&required.signature, &offered.signature);
    if want.params.len() != have.params.len() || want.returns.len() != have.returns.len() {
        return false;
    }

    slots_match(&want.params, &have.params, mode) && slots_match(&want.returns, &have.returns, mode)
}

/// Walk `name` and the interfaces it embeds, collecting methods into
/// `flattened` and unknown elements into `unresolved`
fn collect_method_set<'a>(
    package: &'a Package,
    name: &'a str,
    visited: &mut HashSet<&'a str>,
    flattened: &mut InterfaceType,
    unresolved: &mut Vec<String>,
) {
    if !visited.insert(name) {
        return;
    }
    let Some(interface) = package.interface(name) else {
        return;
    };

    for method in &interface.methods {
        if flattened.find_method(&method.name).is_none() {
            flattened.methods.push(method.clone());
        }
    }

    for element in &interface.embedded {
        if package.interface(element).is_some() {
            collect_method_set(package, element, visited, flattened, unresolved);
        } else if !unresolved.contains(element) {
            unresolved.push(element.clone());
        }
    }
}

/// Promote the methods of embedded interfaces into every interface that
/// embeds them, directly or transitively. Returns how many interfaces keep
/// elements that could not be resolved.
pub fn expand_embedded(package: &mut Package) -> usize {
    let expanded: Vec<(Vec<Function>, Vec<String>)> = package
        .interfaces()
        .map(|interface| {
            let mut flattened = InterfaceType::new(interface.name.clone(), Vec::new());
            let mut unresolved = Vec::new();
            let mut visited = HashSet::new();
            collect_method_set(package, &interface.name, &mut visited, &mut flattened, &mut unresolved);
            (flattened.methods, unresolved)
        })
        .collect();

    let mut incomplete = 0;
    for (interface, (methods, unresolved)) in package.interfaces_mut().zip(expanded) {
        for element in &unresolved {
            let issue = ResolutionIssue::UnresolvedReference {
                name: interface.name.clone(),
                reference: element.clone(),
                kind: ReferenceKind::Embedded,
            };
            warn!("{issue}");
        }
        if !unresolved.is_empty() {
            incomplete += 1;
        }
        if methods.len() > interface.methods.len() {
            debug!(
                interface = %interface.name,
                promoted = methods.len() - interface.methods.len(),
                "promoted embedded methods"
            );
        }
        interface.methods = methods;
        interface.set_unresolved(unresolved);
    }
    incomplete
}

/// Whether the named concrete type satisfies `interface`.
///
/// Only the methods listed on `interface` are checked, so embedded
/// interfaces must already be expanded with [`expand_embedded`]. An
/// interface with unresolved embedded elements is satisfied by nothing.
pub fn satisfies(package: &Package, type_name: &str, interface: &InterfaceType, mode: MatchMode) -> bool {
    if !interface.is_fully_resolved() {
        return false;
    }
    let Some(concrete) = package.concrete_type(type_name) else {
        return false;
    };

    interface.methods.iter().all(|required| {
        package
            .methods_of(concrete)
            .any(|offered| method_matches(required, &offered.function, mode))
    })
}

/// Expand embedded interfaces, then fill every interface's implementation
/// list, sorted by type name
pub fn resolve_implementations(package: &mut Package, mode: MatchMode) -> usize {
    let incomplete = expand_embedded(package);
    if incomplete > 0 {
        debug!(incomplete, "interfaces with unresolved embedded elements get no implementers");
    }

    let mut type_names: Vec<String> = package.concrete_types().map(|c| c.name.clone()).collect();
    type_names.sort();

    let found: Vec<(String, Vec<String>)> = package
        .interfaces()
        .map(|interface| {
            let implementers = type_names
                .iter()
                .filter(|name| satisfies(package, name, interface, mode))
                .cloned()
                .collect();
            (interface.name.clone(), implementers)
        })
        .collect();

    let mut total = 0;
    for (interface, (name, implementers)) in package.interfaces_mut().zip(found) {
        debug_assert_eq!(interface.name, name);
        debug!(interface = %name, implementers = ?implementers, "resolved implementations");
        total += implementers.len();
        for implementer in implementers {
            interface.record_implementation(implementer);
        }
    }
    total
}
