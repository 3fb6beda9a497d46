//! Method binding
//!
//! Attaches each parsed method to the concrete type named by its receiver.
//! Binding is keyed on the receiver name with the pointer marker already
//! stripped, so `func (s *Service)` and `func (s Service)` land on the same
//! type.

use crate::error::{ReferenceKind, ResolutionIssue};
use crate::model::{Method, Package};
use tracing::debug;

/// Outcome counts of one binding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingSummary {
    pub bound: usize,
    pub dropped: usize,
}

/// Bind methods in encounter order. Methods whose receiver names no concrete
/// type in the package are dropped.
pub fn bind_methods(package: &mut Package, methods: Vec<Method>) -> BindingSummary {
    let mut summary = BindingSummary::default();

    for method in methods {
        let Some(owner) = package.type_id(method.receiver_name()) else {
            debug!("dropping method: {}", unresolved_receiver(&method));
            summary.dropped += 1;
            continue;
        };

        let method_name = method.name().to_string();
        match package.attach_method(owner, method) {
            Some(_) => {
                debug!(method = %method_name, owner = owner.0, "bound method");
                summary.bound += 1;
            }
            None => summary.dropped += 1,
        }
    }

    summary
}

fn unresolved_receiver(method: &Method) -> ResolutionIssue {
    ResolutionIssue::UnresolvedReference {
        name: method.name().to_string(),
        reference: method.receiver_text().to_string(),
        kind: ReferenceKind::Receiver,
    }
}
