//! Span-insensitive structural comparison.
//!
//! Two comparisons drive the reifier:
//!
//! - **Equality** (`expr_eq`, `type_eq`): used when collapsing union
//!   members. Nodes compare by shape and content only; source spans never
//!   participate, so two references to the same class at different source
//!   locations are equal.
//! - **Subset matching** (`type_matches`): used by the override table. The
//!   pattern must be satisfied by the live node, but the live node may
//!   carry more: absent optional fields on the pattern are wildcards, and
//!   pattern sequences match a prefix of the live sequence. `Types.ObjectId`
//!   as a pattern therefore also matches `Types.ObjectId<T>`.
//!
//! Parenthesized expressions and types are transparent on both sides of
//! every comparison.

use typelift_parser::ast::*;

// =========================================================================
// Structural equality
// =========================================================================

/// Span-insensitive expression equality.
pub fn expr_eq(a: &Expression, b: &Expression) -> bool {
    use Expression::*;

    // Parentheses carry no meaning of their own.
    if let Parenthesized(p) = a {
        return expr_eq(&p.expression, b);
    }
    if let Parenthesized(p) = b {
        return expr_eq(a, &p.expression);
    }

    match (a, b) {
        (IntLiteral(x), IntLiteral(y)) => x.value == y.value,
        (FloatLiteral(x), FloatLiteral(y)) => x.value == y.value,
        (BigIntLiteral(x), BigIntLiteral(y)) => x.digits == y.digits,
        (StringLiteral(x), StringLiteral(y)) => x.value == y.value,
        (TemplateLiteral(x), TemplateLiteral(y)) => x.value == y.value,
        (BooleanLiteral(x), BooleanLiteral(y)) => x.value == y.value,
        (NullLiteral(_), NullLiteral(_)) => true,
        (This(_), This(_)) => true,
        (Super(_), Super(_)) => true,
        (Identifier(x), Identifier(y)) => x.name == y.name,
        (Array(x), Array(y)) => expr_seq_eq(&x.elements, &y.elements),
        (Object(x), Object(y)) => {
            x.properties.len() == y.properties.len()
                && x.properties
                    .iter()
                    .zip(&y.properties)
                    .all(|(p, q)| property_eq(p, q))
        }
        (Unary(x), Unary(y)) => x.operator == y.operator && expr_eq(&x.operand, &y.operand),
        (Binary(x), Binary(y)) => {
            x.operator == y.operator && expr_eq(&x.left, &y.left) && expr_eq(&x.right, &y.right)
        }
        (Logical(x), Logical(y)) => {
            x.operator == y.operator && expr_eq(&x.left, &y.left) && expr_eq(&x.right, &y.right)
        }
        (Assignment(x), Assignment(y)) => {
            x.operator == y.operator && expr_eq(&x.left, &y.left) && expr_eq(&x.right, &y.right)
        }
        (Conditional(x), Conditional(y)) => {
            expr_eq(&x.test, &y.test)
                && expr_eq(&x.consequent, &y.consequent)
                && expr_eq(&x.alternate, &y.alternate)
        }
        (Call(x), Call(y)) => {
            expr_eq(&x.callee, &y.callee) && expr_seq_eq(&x.arguments, &y.arguments)
        }
        (New(x), New(y)) => {
            expr_eq(&x.callee, &y.callee) && expr_seq_eq(&x.arguments, &y.arguments)
        }
        (Member(x), Member(y)) => {
            x.property.name == y.property.name
                && x.optional == y.optional
                && expr_eq(&x.object, &y.object)
        }
        (Index(x), Index(y)) => expr_eq(&x.object, &y.object) && expr_eq(&x.index, &y.index),
        (Await(x), Await(y)) => expr_eq(&x.argument, &y.argument),
        (Typeof(x), Typeof(y)) => expr_eq(&x.argument, &y.argument),
        (TypeCast(x), TypeCast(y)) => {
            expr_eq(&x.expression, &y.expression) && type_eq(&x.target_type.ty, &y.target_type.ty)
        }
        (Arrow(x), Arrow(y)) => {
            x.is_async == y.is_async
                && x.params.len() == y.params.len()
                && x.params.iter().zip(&y.params).all(|(p, q)| param_eq(p, q))
                && match (&x.body, &y.body) {
                    (ArrowBody::Expression(e), ArrowBody::Expression(f)) => expr_eq(e, f),
                    (ArrowBody::Block(e), ArrowBody::Block(f)) => block_eq(e, f),
                    _ => false,
                }
        }
        _ => false,
    }
}

/// Span-insensitive type equality.
pub fn type_eq(a: &Type, b: &Type) -> bool {
    if let Type::Parenthesized(p) = a {
        return type_eq(&p.ty, b);
    }
    if let Type::Parenthesized(p) = b {
        return type_eq(a, &p.ty);
    }

    match (a, b) {
        (Type::Keyword(x), Type::Keyword(y)) => x == y,
        (Type::Reference(x), Type::Reference(y)) => {
            entity_eq(&x.name, &y.name)
                && match (&x.type_args, &y.type_args) {
                    (None, None) => true,
                    (Some(p), Some(q)) => annotation_seq_eq(p, q),
                    _ => false,
                }
        }
        (Type::Union(x), Type::Union(y)) => annotation_seq_eq(&x.types, &y.types),
        (Type::Intersection(x), Type::Intersection(y)) => annotation_seq_eq(&x.types, &y.types),
        (Type::Array(x), Type::Array(y)) => type_eq(&x.element_type.ty, &y.element_type.ty),
        (Type::Tuple(x), Type::Tuple(y)) => annotation_seq_eq(&x.element_types, &y.element_types),
        (Type::Literal(x), Type::Literal(y)) => expr_eq(&x.expression, &y.expression),
        (Type::Query(x), Type::Query(y)) => entity_eq(&x.expr_name, &y.expr_name),
        (Type::Object(x), Type::Object(y)) => {
            x.members.len() == y.members.len()
                && x.members
                    .iter()
                    .zip(&y.members)
                    .all(|(p, q)| object_member_eq(p, q))
        }
        (Type::Function(x), Type::Function(y)) => {
            x.params.len() == y.params.len()
                && x.params
                    .iter()
                    .zip(&y.params)
                    .all(|(p, q)| fn_type_param_eq(p, q))
                && type_eq(&x.return_type.ty, &y.return_type.ty)
        }
        _ => false,
    }
}

/// Entity-name (dotted chain) equality by segment symbols.
pub fn entity_eq(a: &EntityName, b: &EntityName) -> bool {
    match (a, b) {
        (EntityName::Ident(x), EntityName::Ident(y)) => x.name == y.name,
        (EntityName::Qualified(x), EntityName::Qualified(y)) => {
            x.right.name == y.right.name && entity_eq(&x.left, &y.left)
        }
        _ => false,
    }
}

fn expr_seq_eq(a: &[Expression], b: &[Expression]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| expr_eq(x, y))
}

fn annotation_seq_eq(a: &[TypeAnnotation], b: &[TypeAnnotation]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| type_eq(&x.ty, &y.ty))
}

fn property_eq(a: &Property, b: &Property) -> bool {
    let keys = match (&a.key, &b.key) {
        (PropertyKey::Identifier(x), PropertyKey::Identifier(y)) => x.name == y.name,
        (PropertyKey::StringLiteral(x), PropertyKey::StringLiteral(y)) => x.value == y.value,
        (PropertyKey::IntLiteral(x), PropertyKey::IntLiteral(y)) => x.value == y.value,
        (PropertyKey::Computed(x), PropertyKey::Computed(y)) => expr_eq(x, y),
        _ => false,
    };
    keys && expr_eq(&a.value, &b.value)
}

fn param_eq(a: &Parameter, b: &Parameter) -> bool {
    a.name.name == b.name.name
        && a.optional == b.optional
        && match (&a.type_annotation, &b.type_annotation) {
            (None, None) => true,
            (Some(x), Some(y)) => type_eq(&x.ty, &y.ty),
            _ => false,
        }
        && match (&a.default_value, &b.default_value) {
            (None, None) => true,
            (Some(x), Some(y)) => expr_eq(x, y),
            _ => false,
        }
}

fn fn_type_param_eq(a: &FunctionTypeParam, b: &FunctionTypeParam) -> bool {
    a.name.name == b.name.name
        && a.optional == b.optional
        && match (&a.ty, &b.ty) {
            (None, None) => true,
            (Some(x), Some(y)) => type_eq(&x.ty, &y.ty),
            _ => false,
        }
}

fn object_member_eq(a: &ObjectTypeProperty, b: &ObjectTypeProperty) -> bool {
    a.name.name == b.name.name && a.optional == b.optional && type_eq(&a.ty.ty, &b.ty.ty)
}

/// Block equality for the arrow-body case. Emitted fragments only ever
/// contain expression-level statements; declaration statements inside a
/// compared block are treated as never equal.
fn block_eq(a: &BlockStatement, b: &BlockStatement) -> bool {
    a.statements.len() == b.statements.len()
        && a.statements.iter().zip(&b.statements).all(|(x, y)| match (x, y) {
            (Statement::Expression(p), Statement::Expression(q)) => {
                expr_eq(&p.expression, &q.expression)
            }
            (Statement::Return(p), Statement::Return(q)) => match (&p.value, &q.value) {
                (None, None) => true,
                (Some(e), Some(f)) => expr_eq(e, f),
                _ => false,
            },
            (Statement::Empty(_), Statement::Empty(_)) => true,
            _ => false,
        })
}

// =========================================================================
// Subset matching (override patterns)
// =========================================================================

/// Does `live` satisfy the override pattern?
///
/// Every property the pattern specifies must be present and equal on the
/// live node. Absent optional fields on the pattern (`None` generic
/// argument lists, untyped function-type parameters) match anything, and
/// pattern sequences match a prefix of the live sequence.
pub fn type_matches(live: &Type, pattern: &Type) -> bool {
    if let Type::Parenthesized(p) = pattern {
        return type_matches(live, &p.ty);
    }
    if let Type::Parenthesized(p) = live {
        return type_matches(&p.ty, pattern);
    }

    match (pattern, live) {
        (Type::Keyword(p), Type::Keyword(l)) => p == l,
        (Type::Reference(p), Type::Reference(l)) => {
            entity_eq(&p.name, &l.name)
                && match (&p.type_args, &l.type_args) {
                    // Pattern without arguments matches any instantiation.
                    (None, _) => true,
                    (Some(pa), Some(la)) => annotation_seq_matches(la, pa),
                    (Some(_), None) => false,
                }
        }
        (Type::Union(p), Type::Union(l)) => annotation_seq_matches(&l.types, &p.types),
        (Type::Intersection(p), Type::Intersection(l)) => {
            annotation_seq_matches(&l.types, &p.types)
        }
        (Type::Array(p), Type::Array(l)) => {
            type_matches(&l.element_type.ty, &p.element_type.ty)
        }
        (Type::Tuple(p), Type::Tuple(l)) => {
            annotation_seq_matches(&l.element_types, &p.element_types)
        }
        (Type::Literal(p), Type::Literal(l)) => expr_eq(&l.expression, &p.expression),
        (Type::Query(p), Type::Query(l)) => entity_eq(&l.expr_name, &p.expr_name),
        (Type::Object(p), Type::Object(l)) => {
            p.members.len() <= l.members.len()
                && p.members
                    .iter()
                    .zip(&l.members)
                    .all(|(pm, lm)| {
                        pm.name.name == lm.name.name
                            && pm.optional == lm.optional
                            && type_matches(&lm.ty.ty, &pm.ty.ty)
                    })
        }
        (Type::Function(p), Type::Function(l)) => {
            p.params.len() <= l.params.len()
                && p.params.iter().zip(&l.params).all(|(pp, lp)| {
                    pp.name.name == lp.name.name
                        && pp.optional == lp.optional
                        && match (&pp.ty, &lp.ty) {
                            (None, _) => true,
                            (Some(pt), Some(lt)) => type_matches(&lt.ty, &pt.ty),
                            (Some(_), None) => false,
                        }
                })
                && type_matches(&l.return_type.ty, &p.return_type.ty)
        }
        _ => false,
    }
}

/// Prefix match: every pattern element must match the live element at the
/// same position; extra live elements are ignored.
fn annotation_seq_matches(live: &[TypeAnnotation], pattern: &[TypeAnnotation]) -> bool {
    pattern.len() <= live.len()
        && pattern
            .iter()
            .zip(live)
            .all(|(p, l)| type_matches(&l.ty, &p.ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use typelift_parser::Parser;

    fn parse_type(source: &str) -> (Type, typelift_parser::Interner) {
        let full = format!("var _: {};", source);
        let (module, interner) = Parser::new(&full).unwrap().parse().unwrap();
        let Statement::VariableDecl(decl) = &module.statements[0] else {
            panic!("expected variable declaration");
        };
        let ty = decl.declarations[0]
            .type_annotation
            .clone()
            .expect("annotation")
            .ty;
        (ty, interner)
    }

    fn parse_type_with(
        source: &str,
        interner: typelift_parser::Interner,
    ) -> (Type, typelift_parser::Interner) {
        let full = format!("var _: {};", source);
        let (module, interner) = Parser::with_interner(&full, interner)
            .unwrap()
            .parse()
            .unwrap();
        let Statement::VariableDecl(decl) = &module.statements[0] else {
            panic!("expected variable declaration");
        };
        let ty = decl.declarations[0]
            .type_annotation
            .clone()
            .expect("annotation")
            .ty;
        (ty, interner)
    }

    #[test]
    fn test_equality_ignores_spans() {
        let (a, interner) = parse_type("Types.ObjectId");
        let (b, _) = parse_type_with("   Types.ObjectId", interner);
        assert!(type_eq(&a, &b));
    }

    #[test]
    fn test_equality_distinguishes_names() {
        let (a, interner) = parse_type("User");
        let (b, _) = parse_type_with("Role", interner);
        assert!(!type_eq(&a, &b));
    }

    #[test]
    fn test_parenthesized_types_are_transparent() {
        let (a, interner) = parse_type("(string | null)");
        let (b, _) = parse_type_with("string | null", interner);
        assert!(type_eq(&a, &b));
    }

    #[test]
    fn test_pattern_without_args_matches_generic_instantiation() {
        let (pattern, interner) = parse_type("Types.ObjectId");
        let (live, _) = parse_type_with("Types.ObjectId<User>", interner);
        assert!(type_matches(&live, &pattern));
        // The other direction does not hold: the pattern's arguments are
        // absent on the live node.
        assert!(!type_matches(&pattern, &live));
    }

    #[test]
    fn test_union_pattern_matches_prefix() {
        let (pattern, interner) = parse_type("string | number");
        let (live, _) = parse_type_with("string | number | boolean", interner);
        assert!(type_matches(&live, &pattern));
        assert!(!type_matches(&pattern, &live));
    }

    #[test]
    fn test_literal_type_matching_compares_values() {
        let (pattern, interner) = parse_type("\"active\"");
        let (live, interner) = parse_type_with("\"active\"", interner);
        let (other, _) = parse_type_with("\"inactive\"", interner);
        assert!(type_matches(&live, &pattern));
        assert!(!type_matches(&other, &pattern));
    }
}
