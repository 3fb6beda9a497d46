// Receiver classification for method declarations

use crate::decl::*;
use crate::parser::GoParser;

fn receiver_of(input: &str) -> Option<ReceiverExpr> {
    let file = GoParser::parse_source(input).unwrap();
    file.callables.into_iter().next().and_then(|c| c.receiver)
}

#[test]
fn test_pointer_receiver() {
    let receiver = receiver_of("package p\nfunc (s *Service) Run() {}\n").unwrap();

    assert_eq!(receiver, ReceiverExpr::Pointer("Service".to_string()));
    assert_eq!(receiver.base_name(), Some("Service"));
    assert_eq!(receiver.raw_text(), "*Service");
}

#[test]
fn test_value_receiver() {
    let receiver = receiver_of("package p\nfunc (s Service) Name() string { return \"\" }\n").unwrap();

    assert_eq!(receiver, ReceiverExpr::Named("Service".to_string()));
}

#[test]
fn test_unnamed_receiver() {
    let receiver = receiver_of("package p\nfunc (Service) Kind() string { return \"svc\" }\n").unwrap();

    assert_eq!(receiver.base_name(), Some("Service"));
}

#[test]
fn test_generic_receiver_is_unsupported() {
    let receiver = receiver_of("package p\nfunc (b *Box[T]) Get() T { return b.v }\n").unwrap();

    assert_eq!(receiver, ReceiverExpr::Unsupported("*Box[T]".to_string()));
    assert_eq!(receiver.base_name(), None);
}

#[test]
fn test_free_function_has_no_receiver() {
    assert_eq!(receiver_of("package p\nfunc Run() {}\n"), None);
}

#[test]
fn test_receiver_classification_from_text() {
    assert_eq!(
        ReceiverExpr::from_type_text("*pkg.Store"),
        ReceiverExpr::Unsupported("*pkg.Store".to_string())
    );
    assert_eq!(
        ReceiverExpr::from_type_text("Store"),
        ReceiverExpr::Named("Store".to_string())
    );
    assert_eq!(
        ReceiverExpr::from_type_text("*Store"),
        ReceiverExpr::Pointer("Store".to_string())
    );
}
