//! Override-table precedence tests
//!
//! The override table is consulted before any structural dispatch, on
//! every recursion level; these tests drive it through the full engine
//! with configurations the macro's users would write.

use typelift_macro::{Binder, MacroConfig, OverrideError, OverrideTable, Reifier};
use typelift_parser::ast::*;
use typelift_parser::{print_expression, Parser};

/// Reify the last `var` declarator's annotation under a JSON macro
/// configuration.
fn reify_with_config(config_json: &str, source: &str) -> (typelift_macro::ReifiedType, Reifier) {
    let config: MacroConfig = serde_json::from_str(config_json).expect("valid config");
    let (module, interner) = Parser::new(source).expect("lex").parse().expect("parse");
    let (overrides, interner) =
        OverrideTable::from_config(&config, interner).expect("valid overrides");
    let bindings = Binder::bind(&module);
    let scope = bindings.module_scope();

    let annotation = module
        .statements
        .iter()
        .rev()
        .find_map(|stmt| match stmt {
            Statement::VariableDecl(decl) => decl.declarations[0].type_annotation.as_ref(),
            _ => None,
        })
        .expect("subject annotation");

    let mut reifier = Reifier::new(interner, bindings, overrides);
    let deduced = reifier.reify(scope, Some(annotation), None);
    (deduced, reifier)
}

fn ident_text<'a>(expr: &Expression, reifier: &'a Reifier) -> &'a str {
    match expr {
        Expression::Identifier(id) => reifier.interner().resolve(id.name),
        other => panic!("expected identifier, got {:?}", other.span()),
    }
}

#[test]
fn test_override_replaces_qualified_name() {
    let (deduced, reifier) = reify_with_config(
        r#"{ "typeMap": { "Types.ObjectId": "String" } }"#,
        "var _subject: Types.ObjectId;",
    );
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "String");
    assert!(!deduced.nullable);
    // The override short-circuits the qualified-name resolver: no
    // temporary was declared.
    assert!(reifier.temps().declared().is_empty());
}

#[test]
fn test_override_beats_primitive_dispatch() {
    let (deduced, reifier) = reify_with_config(
        r#"{ "typeMap": { "string": "CustomString" } }"#,
        "var _subject: string;",
    );
    assert_eq!(
        ident_text(deduced.ty.as_ref().unwrap(), &reifier),
        "CustomString"
    );
}

#[test]
fn test_override_applies_inside_unions() {
    // Union members consult the table individually; nullability is still
    // extracted at the union level.
    let (deduced, reifier) = reify_with_config(
        r#"{ "typeMap": { "Types.ObjectId": "String" } }"#,
        "var _subject: Types.ObjectId | null;",
    );
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "String");
    assert!(deduced.nullable);
}

#[test]
fn test_override_applies_inside_arrays() {
    let (deduced, reifier) = reify_with_config(
        r#"{ "typeMap": { "Types.ObjectId": "String" } }"#,
        "var _subject: Types.ObjectId[];",
    );
    let Some(Expression::Array(array)) = &deduced.ty else {
        panic!("expected array expression");
    };
    assert_eq!(ident_text(&array.elements[0], &reifier), "String");
}

#[test]
fn test_replacement_can_be_any_expression() {
    let (deduced, reifier) = reify_with_config(
        r#"{ "typeMap": { "Types.Decimal128": "Scalars.Decimal" } }"#,
        "var _subject: Types.Decimal128;",
    );
    assert_eq!(
        print_expression(deduced.ty.as_ref().unwrap(), reifier.interner()),
        "Scalars.Decimal"
    );
}

#[test]
fn test_bare_pattern_matches_generic_instantiation() {
    // Accepted approximate matching: absent type arguments on the
    // pattern are a wildcard.
    let (deduced, reifier) = reify_with_config(
        r#"{ "typeMap": { "Types.ObjectId": "String" } }"#,
        "var _subject: Types.ObjectId<User>;",
    );
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "String");
}

#[test]
fn test_unmatched_type_falls_through_to_dispatch() {
    let (deduced, reifier) = reify_with_config(
        r#"{ "typeMap": { "Types.ObjectId": "String" } }"#,
        "var _subject: number;",
    );
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Number");
}

#[test]
fn test_invalid_key_fails_table_compilation() {
    let config: MacroConfig =
        serde_json::from_str(r#"{ "typeMap": { "not a | | type": "String" } }"#).unwrap();
    let err = OverrideTable::from_config(&config, typelift_parser::Interner::new()).unwrap_err();
    assert!(matches!(err, OverrideError::InvalidKey { .. }));
}

#[test]
fn test_invalid_value_fails_table_compilation() {
    let config: MacroConfig =
        serde_json::from_str(r#"{ "typeMap": { "string": "class {}" } }"#).unwrap();
    let err = OverrideTable::from_config(&config, typelift_parser::Interner::new()).unwrap_err();
    assert!(matches!(err, OverrideError::InvalidValue { .. }));
}

#[test]
fn test_absent_type_map_means_no_overrides() {
    let (deduced, reifier) = reify_with_config("{}", "var _subject: string;");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "String");
}
