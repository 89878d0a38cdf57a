//! End-to-end reification tests
//!
//! Each test parses a realistic module, binds it, and reifies one
//! annotation (or initializer) the way the decorator rewriter would,
//! asserting on the produced runtime expression and nullability.

use typelift_macro::{structural, Binder, OverrideTable, ReifiedType, Reifier};
use typelift_parser::ast::*;
use typelift_parser::{print_expression, Parser};

/// Reify the annotation of the last `var` declarator in `source` at
/// module scope.
fn reify(source: &str) -> (ReifiedType, Reifier) {
    let (module, interner) = Parser::new(source).expect("lex").parse().expect("parse");
    let bindings = Binder::bind(&module);
    let scope = bindings.module_scope();
    let annotation = subject_annotation(&module);

    let mut reifier = Reifier::new(interner, bindings, OverrideTable::empty());
    let deduced = reifier.reify(scope, Some(annotation), None);
    (deduced, reifier)
}

/// Shorthand for sources that are just `var _subject: <ty>;`.
fn reify_type(ty: &str) -> (ReifiedType, Reifier) {
    reify(&format!("var _subject: {};", ty))
}

fn subject_annotation(module: &Module) -> &TypeAnnotation {
    for stmt in module.statements.iter().rev() {
        if let Statement::VariableDecl(decl) = stmt {
            return decl.declarations[0]
                .type_annotation
                .as_ref()
                .expect("subject has an annotation");
        }
    }
    panic!("no var declaration in source");
}

fn ident_text<'a>(expr: &Expression, reifier: &'a Reifier) -> &'a str {
    match expr {
        Expression::Identifier(id) => reifier.interner().resolve(id.name),
        other => panic!("expected identifier, got {:?}", other.span()),
    }
}

// ============================================================================
// Keyword, Literal, and Array Types
// ============================================================================

#[test]
fn test_primitive_keywords_map_to_scalars() {
    for (ty, expected) in [("string", "String"), ("number", "Number"), ("boolean", "Boolean")] {
        let (deduced, reifier) = reify_type(ty);
        assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), expected);
        assert!(!deduced.nullable);
    }
}

#[test]
fn test_imprecise_keywords_degrade_to_object() {
    for ty in ["any", "unknown", "bigint", "void", "never", "object"] {
        let (deduced, reifier) = reify_type(ty);
        assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Object");
    }
}

#[test]
fn test_literal_types_infer_their_scalar() {
    for (ty, expected) in [
        ("\"active\"", "String"),
        ("42", "Number"),
        ("-1", "Number"),
        ("true", "Boolean"),
    ] {
        let (deduced, reifier) = reify_type(ty);
        assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), expected);
    }
}

#[test]
fn test_array_wraps_element_in_one_element_list() {
    let (deduced, reifier) = reify_type("string[]");
    let Some(Expression::Array(array)) = &deduced.ty else {
        panic!("expected array expression");
    };
    assert_eq!(array.elements.len(), 1);
    assert_eq!(ident_text(&array.elements[0], &reifier), "String");
    assert!(!deduced.nullable);
}

#[test]
fn test_nested_array() {
    let (deduced, _) = reify_type("string[][]");
    let Some(Expression::Array(outer)) = &deduced.ty else {
        panic!("expected array expression");
    };
    assert!(matches!(outer.elements[0], Expression::Array(_)));
}

// ============================================================================
// Unions
// ============================================================================

#[test]
fn test_nullable_union_extracts_member() {
    let (deduced, reifier) = reify_type("string | null");
    assert!(deduced.nullable);
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "String");
}

#[test]
fn test_undefined_also_marks_nullable() {
    let (deduced, reifier) = reify_type("number | undefined");
    assert!(deduced.nullable);
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Number");
}

#[test]
fn test_homogeneous_union_collapses_to_member() {
    let source = "class Role {}\nvar _subject: Role | Role | null;";
    let (deduced, reifier) = reify(source);
    assert!(deduced.nullable);
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Role");
}

#[test]
fn test_heterogeneous_union_collapses_to_object() {
    let (deduced, reifier) = reify_type("string | number | boolean");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Object");
    assert!(!deduced.nullable);
}

#[test]
fn test_null_after_mismatch_is_not_visited() {
    // The collapse is an early return: the trailing null is never seen.
    let (deduced, reifier) = reify_type("string | number | null");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Object");
    assert!(!deduced.nullable);
}

#[test]
fn test_null_before_mismatch_is_kept() {
    let (deduced, reifier) = reify_type("null | string | number");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Object");
    assert!(deduced.nullable);
}

#[test]
fn test_union_of_only_nullish_members() {
    let (deduced, reifier) = reify_type("null | undefined");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Object");
    assert!(deduced.nullable);
}

#[test]
fn test_parenthesized_nullish_member_marks_nullable() {
    // Parentheses are transparent, so `(null)` behaves like `null`.
    let (deduced, reifier) = reify_type("string | (null)");
    assert!(deduced.nullable);
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "String");

    let (deduced, reifier) = reify_type("number | (undefined)");
    assert!(deduced.nullable);
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Number");
}

#[test]
fn test_nullability_flows_up_from_array_element() {
    // One nullable flag is shared across recursion depths.
    let (deduced, reifier) = reify_type("(string | null)[]");
    let Some(Expression::Array(array)) = &deduced.ty else {
        panic!("expected array expression");
    };
    assert_eq!(ident_text(&array.elements[0], &reifier), "String");
    assert!(deduced.nullable);
}

// ============================================================================
// Type References
// ============================================================================

#[test]
fn test_class_reference_is_direct() {
    let (deduced, reifier) = reify("class Role {}\nvar _subject: Role;");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Role");
}

#[test]
fn test_exported_class_reference_is_direct() {
    let (deduced, reifier) = reify("export class Role {}\nvar _subject: Role;");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Role");
}

#[test]
fn test_generic_arguments_are_dropped_on_direct_references() {
    let (deduced, reifier) = reify("class Page {}\nvar _subject: Page<string>;");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Page");
}

#[test]
fn test_function_reference_is_guarded() {
    let (deduced, reifier) = reify("function Helper() {}\nvar _subject: Helper;");
    assert_eq!(
        print_expression(deduced.ty.as_ref().unwrap(), reifier.interner()),
        r#"typeof Helper === "undefined" ? Object : Helper"#
    );
}

#[test]
fn test_imported_reference_is_guarded() {
    let source = "import { ObjectId } from \"bson\";\nvar _subject: ObjectId;";
    let (deduced, _) = reify(source);
    assert!(matches!(deduced.ty, Some(Expression::Conditional(_))));
}

#[test]
fn test_unresolved_reference_is_guarded() {
    let (deduced, _) = reify_type("Mystery");
    assert!(matches!(deduced.ty, Some(Expression::Conditional(_))));
}

#[test]
fn test_date_is_built_in() {
    let (deduced, reifier) = reify_type("Date");
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Date");
}

#[test]
fn test_numeric_aliases_import_from_schema_library() {
    for (ty, local) in [("Int", "_Int"), ("Float", "_Float"), ("int", "_int")] {
        let (deduced, reifier) = reify_type(ty);
        assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), local);

        let requests = reifier.imports().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].module.path(), "type-graphql");
    }
}

#[test]
fn test_record_degrades_to_json_object_scalar() {
    let (deduced, reifier) = reify_type("Record<string, number>");
    assert_eq!(
        ident_text(deduced.ty.as_ref().unwrap(), &reifier),
        "_GraphQLJSONObject"
    );
    assert!(!deduced.nullable);

    let requests = reifier.imports().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].module.path(), "graphql-type-json");
    assert_eq!(
        reifier.interner().resolve(requests[0].imported),
        "GraphQLJSONObject"
    );
}

#[test]
fn test_record_with_wrong_arity_is_an_ordinary_name() {
    let (deduced, _) = reify_type("Record<string>");
    // No Record binding exists, so the name falls back to the guard.
    assert!(matches!(deduced.ty, Some(Expression::Conditional(_))));
}

// ============================================================================
// Qualified Names
// ============================================================================

#[test]
fn test_qualified_name_emits_guarded_chain() {
    let source = "import { Types } from \"mongoose\";\nvar _subject: Types.ObjectId;";
    let (deduced, reifier) = reify(source);
    assert_eq!(
        print_expression(deduced.ty.as_ref().unwrap(), reifier.interner()),
        r#"typeof (_ref = typeof Types !== "undefined" && Types?.ObjectId) === "function" ? _ref : Object"#
    );
    assert_eq!(reifier.temps().declared().len(), 1);
}

#[test]
fn test_deep_chain_keeps_every_access_optional() {
    let (deduced, reifier) = reify_type("mongoose.Types.ObjectId");
    assert_eq!(
        print_expression(deduced.ty.as_ref().unwrap(), reifier.interner()),
        r#"typeof (_ref = typeof mongoose !== "undefined" && mongoose?.Types?.ObjectId) === "function" ? _ref : Object"#
    );
}

#[test]
fn test_repeated_qualified_reification_reuses_the_temp() {
    let source = "var _subject: Types.ObjectId;";
    let (module, interner) = Parser::new(source).unwrap().parse().unwrap();
    let bindings = Binder::bind(&module);
    let scope = bindings.module_scope();
    let annotation = subject_annotation(&module);

    let mut reifier = Reifier::new(interner, bindings, OverrideTable::empty());
    let first = reifier.reify(scope, Some(annotation), None);
    let second = reifier.reify(scope, Some(annotation), None);

    assert!(structural::expr_eq(
        first.ty.as_ref().unwrap(),
        second.ty.as_ref().unwrap()
    ));
    assert_eq!(reifier.temps().declared().len(), 1);
}

// ============================================================================
// Initializer Fallback
// ============================================================================

#[test]
fn test_initializer_fallback_infers_scalar() {
    let source = r#"
        class Counter {
            count = 42;
        }
    "#;
    let (module, interner) = Parser::new(source).unwrap().parse().unwrap();
    let bindings = Binder::bind(&module);
    let scope = bindings.module_scope();

    let Statement::ClassDecl(class) = &module.statements[0] else {
        panic!("expected class");
    };
    let ClassMember::Field(field) = &class.members[0] else {
        panic!("expected field");
    };

    let mut reifier = Reifier::new(interner, bindings, OverrideTable::empty());
    let deduced = reifier.reify(scope, None, field.initializer.as_ref());
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Number");
    assert!(!deduced.nullable);
}

#[test]
fn test_unrecognized_initializer_yields_no_type() {
    let (module, interner) = Parser::new("var other = 1;").unwrap().parse().unwrap();
    let bindings = Binder::bind(&module);
    let scope = bindings.module_scope();
    let value = Expression::identifier(interner.lookup("other").unwrap());

    let mut reifier = Reifier::new(interner, bindings, OverrideTable::empty());
    let deduced = reifier.reify(scope, None, Some(&value));
    assert_eq!(deduced.ty, None);
    assert!(!deduced.nullable);
}

#[test]
fn test_nothing_to_deduce_yields_placeholder() {
    let (module, interner) = Parser::new("").unwrap().parse().unwrap();
    let bindings = Binder::bind(&module);
    let scope = bindings.module_scope();

    let mut reifier = Reifier::new(interner, bindings, OverrideTable::empty());
    let deduced = reifier.reify(scope, None, None);
    assert_eq!(ident_text(deduced.ty.as_ref().unwrap(), &reifier), "Object");
    assert!(!deduced.nullable);
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_reification_is_idempotent() {
    let source = "class Role {}\nvar _subject: Role[] | null;";
    let (module, interner) = Parser::new(source).unwrap().parse().unwrap();
    let bindings = Binder::bind(&module);
    let scope = bindings.module_scope();
    let annotation = subject_annotation(&module);

    let mut reifier = Reifier::new(interner, bindings, OverrideTable::empty());
    let first = reifier.reify(scope, Some(annotation), None);
    let second = reifier.reify(scope, Some(annotation), None);

    assert_eq!(first.nullable, second.nullable);
    assert!(structural::expr_eq(
        first.ty.as_ref().unwrap(),
        second.ty.as_ref().unwrap()
    ));
}
