// Test function declaration parsing
// Free functions, methods, opaque bodies and skipped value declarations

use autofx_parser::*;
use pretty_assertions::assert_eq;

const REPOSITORY: &str = r#"// Package example holds a tiny service graph.
package example

import (
	"errors"
	log "github.com/sirupsen/logrus"
)

var ErrNotFound = errors.New("not found {")

const (
	defaultName = "John Doe"
	maxItems    = 10
)

var _ Store = (*UserDB)(nil)

type UserDB struct{}

func NewUserDB() *UserDB {
	return &UserDB{}
}

func (u *UserDB) Get(id string) (string, error) {
	if id == "" {
		return "", ErrNotFound // never "}"
	}
	/* a block comment with a brace } */
	return defaultName, nil
}

func (u *UserDB) GetAll() ([]string, error) {
	return []string{"John Doe", "Jane Doe"}, nil
}

func (u *UserDB) Set(id string, value string) error {
	log.Info('{')
	return nil
}
"#;

#[test]
fn test_package_clause_and_imports() {
    let file = parse_source(REPOSITORY).unwrap();

    assert_eq!(file.package_name, "example");
    assert_eq!(
        file.imports,
        vec![
            ImportDecl {
                alias: None,
                path: "errors".to_string()
            },
            ImportDecl {
                alias: Some("log".to_string()),
                path: "github.com/sirupsen/logrus".to_string()
            },
        ]
    );
}

#[test]
fn test_bodies_and_values_are_skipped() {
    let file = parse_source(REPOSITORY).unwrap();

    assert_eq!(file.types.len(), 1);
    let names: Vec<&str> = file.callables.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["NewUserDB", "Get", "GetAll", "Set"]);
    assert!(file.callables.iter().all(|c| c.has_body));
}

#[test]
fn test_methods_carry_receivers() {
    let file = parse_source(REPOSITORY).unwrap();

    let constructor = &file.callables[0];
    assert!(!constructor.is_method());
    assert_eq!(constructor.signature.results[0].type_text, "*UserDB");

    for method in &file.callables[1..] {
        assert_eq!(
            method.receiver,
            Some(ReceiverExpr::Pointer("UserDB".to_string()))
        );
    }

    let get_all = &file.callables[2];
    let results: Vec<&str> = get_all
        .signature
        .results
        .iter()
        .map(|r| r.type_text.as_str())
        .collect();
    assert_eq!(results, vec!["[]string", "error"]);
}

#[test]
fn test_source_name_is_recorded() {
    let file =
        parse_source_with_name("package example\n", Some("example/doc.go".to_string())).unwrap();

    assert_eq!(file.source_file.as_deref(), Some("example/doc.go"));
    assert!(file.types.is_empty());
    assert!(file.callables.is_empty());
}

#[test]
fn test_generic_function_declaration() {
    let file = parse_source(
        "package example\n\nfunc Map[T, U any](items []T, f func(T) U) []U { return nil }\n",
    )
    .unwrap();

    let func = &file.callables[0];
    assert_eq!(func.name, "Map");
    assert_eq!(func.signature.params.len(), 2);
    assert_eq!(func.signature.params[1].type_text, "func(T) U");
    assert_eq!(func.signature.results[0].type_text, "[]U");
}

#[test]
fn test_missing_package_clause_is_a_parse_error() {
    let result = parse_source("func Orphan() {}\n");

    match result {
        Err(ParseError::PestError { message, .. }) => {
            assert!(message.contains("package clause"), "message was: {message}");
        }
        other => panic!("Expected pest error, got {other:?}"),
    }
}

#[test]
fn test_declarations_merge_in_file_order() {
    let first = parse_source("package example\n\ntype A struct{}\nfunc NewA() *A { return nil }\n")
        .unwrap();
    let second = parse_source("package example\n\ntype B interface{}\n").unwrap();

    let mut set = DeclarationSet::default();
    set.add_file(first);
    set.add_file(second);

    assert_eq!(set.package_name, "example");
    let names: Vec<&str> = set.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(set.callables.len(), 1);
    assert!(!set.is_empty());
}
