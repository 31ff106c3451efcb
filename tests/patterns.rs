//! Integration tests for destruct-pattern.

use destruct_pattern::{
    Expr, Pattern, PatternError, PatternKind, PropertyKey, Slot, Target,
};
use pretty_assertions::assert_eq;

// Validation tests

#[test]
fn test_rest_must_be_last() {
    let err = Pattern::positional().rest("xs").bind("y").build().unwrap_err();
    assert_eq!(err, PatternError::RestNotLast);
}

#[test]
fn test_rest_not_last_in_nested_pattern() {
    let inner = Pattern::Positional(vec![
        Slot::Rest(Target::from("xs")),
        Slot::Skip,
    ]);
    let err = Pattern::keyed().nested("list", inner).build().unwrap_err();
    assert_eq!(err, PatternError::RestNotLast);
}

#[test]
fn test_empty_names_rejected() {
    assert_eq!(
        Pattern::positional().bind("").build().unwrap_err(),
        PatternError::EmptyName
    );
    assert_eq!(
        Pattern::keyed().field("").build().unwrap_err(),
        PatternError::EmptyName
    );
}

#[test]
fn test_declaration_rules() {
    let pattern = Pattern::positional()
        .bind("a")
        .nested(Pattern::keyed().rename("b", "a").build().unwrap())
        .build()
        .unwrap();
    assert!(pattern.validate().is_ok());
    assert_eq!(
        pattern.check_declaration(),
        Err(PatternError::DuplicateBinding("a".to_string()))
    );

    let pattern = Pattern::keyed()
        .entry(PropertyKey::from("foo"), Target::member("obj", "prop"), None)
        .build()
        .unwrap();
    assert_eq!(
        pattern.check_declaration(),
        Err(PatternError::MemberInDeclaration {
            object: "obj".to_string()
        })
    );
}

// Analysis tests

#[test]
fn test_kind_and_names() {
    let pattern = Pattern::keyed()
        .field("loc")
        .nested(
            "loc",
            Pattern::keyed()
                .nested("start", Pattern::keyed().field("line").build().unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    assert_eq!(pattern.kind(), PatternKind::Keyed);
    assert_eq!(pattern.bound_names(), vec!["loc", "line"]);
    assert_eq!(pattern.max_pulls(), Some(0));
    assert_eq!(pattern.depth(), 3);
}

#[test]
fn test_member_targets_declare_nothing() {
    let pattern = Pattern::positional()
        .element(Target::member("arr", "0"), None)
        .bind("x")
        .build()
        .unwrap();
    assert_eq!(pattern.bound_names(), vec!["x"]);
    assert_eq!(pattern.summary().members, 1);
}

#[test]
fn test_summary_display() {
    let pattern = Pattern::positional()
        .bind_or("head", Expr::lit(0))
        .skip()
        .rest("tail")
        .build()
        .unwrap();
    assert_eq!(
        pattern.summary().to_string(),
        "kind:     positional (3 top-level)\n\
         bindings: head, tail\n\
         pulls:    until exhausted\n\
         depth:    1\n\
         defaults: 1\n\
         members:  0\n\
         reads:    -"
    );
}

#[test]
fn test_summary_lists_reads() {
    // [x = 1, y = x, z = fallback]
    let pattern = Pattern::positional()
        .bind_or("x", Expr::lit(1))
        .bind_or("y", Expr::reference("x"))
        .bind_or("z", Expr::reference("fallback"))
        .build()
        .unwrap();
    let summary = pattern.summary().to_string();
    assert!(summary.ends_with("reads:    x, fallback"), "{summary}");
}

#[test]
fn test_expr_references() {
    let expr = Expr::Array(vec![
        Expr::reference("a"),
        Expr::Object(vec![("k".to_string(), Expr::reference("b"))]),
        Expr::lit(1),
    ]);
    assert_eq!(expr.references(), vec!["a", "b"]);
}
