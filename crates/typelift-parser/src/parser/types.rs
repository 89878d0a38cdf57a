//! Type annotation parsing
//!
//! Parses the type syntax of the subset: keyword types, entity-name
//! references with generics, unions and intersections, postfix arrays,
//! tuples, inline object types, literal types, and type queries.

use super::{ParseError, Parser};
use crate::ast::*;
use crate::token::{Span, Token};

/// Parse a type annotation.
///
/// Entry point for all type positions: field annotations, return types,
/// type arguments, and alias right-hand sides.
pub fn parse_type_annotation(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    parse_union_type(parser)
}

/// Parse a union type: `A | B | C`. A leading `|` is allowed.
fn parse_union_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    if parser.check(&Token::Pipe) {
        parser.advance();
    }

    let first = parse_intersection_type(parser)?;

    if !parser.check(&Token::Pipe) {
        return Ok(first);
    }

    let start_span = first.span;
    let mut members = vec![first];
    let mut guard = super::guards::LoopGuard::new("union_members");

    while parser.check(&Token::Pipe) {
        guard.check()?;
        parser.advance();
        members.push(parse_intersection_type(parser)?);
    }

    let span = parser.combine_spans(&start_span, &members[members.len() - 1].span);

    Ok(TypeAnnotation {
        ty: Type::Union(UnionType::new(members)),
        span,
    })
}

/// Parse an intersection type: `A & B`.
fn parse_intersection_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let first = parse_postfix_type(parser)?;

    if !parser.check(&Token::Amp) {
        return Ok(first);
    }

    let start_span = first.span;
    let mut members = vec![first];
    let mut guard = super::guards::LoopGuard::new("intersection_members");

    while parser.check(&Token::Amp) {
        guard.check()?;
        parser.advance();
        members.push(parse_postfix_type(parser)?);
    }

    let span = parser.combine_spans(&start_span, &members[members.len() - 1].span);

    Ok(TypeAnnotation {
        ty: Type::Intersection(IntersectionType { types: members }),
        span,
    })
}

/// Parse postfix type operators: the `[]` array suffix, possibly stacked
/// (`string[][]`).
fn parse_postfix_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let mut ty = parse_primary_type(parser)?;
    let mut guard = super::guards::LoopGuard::new("array_suffixes");

    while parser.check(&Token::LeftBracket) {
        guard.check()?;
        let bracket_span = parser.current_span();
        parser.advance();

        if !parser.check(&Token::RightBracket) {
            return Err(ParseError::unsupported_feature(
                "indexed access types",
                bracket_span,
            ));
        }

        let end_span = parser.current_span();
        parser.advance();

        let span = parser.combine_spans(&ty.span, &end_span);
        ty = TypeAnnotation {
            ty: Type::Array(ArrayType::new(ty)),
            span,
        };
    }

    Ok(ty)
}

/// Parse a primary type.
fn parse_primary_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let start_span = parser.current_span();

    match parser.current() {
        // Literal types
        Token::StringLiteral(value) => {
            let value = *value;
            parser.advance();
            Ok(literal_type(
                Expression::StringLiteral(StringLiteral {
                    value,
                    span: start_span,
                }),
                start_span,
            ))
        }
        Token::IntLiteral(value) => {
            let value = *value;
            parser.advance();
            Ok(literal_type(
                Expression::IntLiteral(IntLiteral {
                    value,
                    span: start_span,
                }),
                start_span,
            ))
        }
        Token::FloatLiteral(value) => {
            let value = *value;
            parser.advance();
            Ok(literal_type(
                Expression::FloatLiteral(FloatLiteral {
                    value,
                    span: start_span,
                }),
                start_span,
            ))
        }
        Token::BigIntLiteral(digits) => {
            let digits = *digits;
            parser.advance();
            Ok(literal_type(
                Expression::BigIntLiteral(BigIntLiteral {
                    digits,
                    span: start_span,
                }),
                start_span,
            ))
        }
        Token::True | Token::False => {
            let value = matches!(parser.current(), Token::True);
            parser.advance();
            Ok(literal_type(
                Expression::BooleanLiteral(BooleanLiteral {
                    value,
                    span: start_span,
                }),
                start_span,
            ))
        }

        // Negative numeric literal type: -1
        Token::Minus => {
            parser.advance();
            let operand_span = parser.current_span();
            let operand = match parser.current() {
                Token::IntLiteral(value) => {
                    let value = *value;
                    parser.advance();
                    Expression::IntLiteral(IntLiteral {
                        value,
                        span: operand_span,
                    })
                }
                Token::FloatLiteral(value) => {
                    let value = *value;
                    parser.advance();
                    Expression::FloatLiteral(FloatLiteral {
                        value,
                        span: operand_span,
                    })
                }
                _ => {
                    return Err(parser
                        .unexpected_token(&[Token::IntLiteral(0), Token::FloatLiteral(0.0)]));
                }
            };

            let span = parser.combine_spans(&start_span, &operand_span);
            Ok(literal_type(
                Expression::Unary(UnaryExpression {
                    operator: UnaryOperator::Minus,
                    operand: Box::new(operand),
                    span,
                }),
                span,
            ))
        }

        // null keyword type
        Token::Null => {
            parser.advance();
            Ok(TypeAnnotation {
                ty: Type::Keyword(KeywordType::Null),
                span: start_span,
            })
        }

        // Type query: typeof value
        Token::Typeof => {
            parser.advance();
            let expr_name = parse_entity_name(parser)?;
            let span = parser.combine_spans(&start_span, expr_name.span());
            Ok(TypeAnnotation {
                ty: Type::Query(TypeQuery { expr_name }),
                span,
            })
        }

        // Function type or parenthesized type
        Token::LeftParen => parse_paren_or_function_type(parser),

        // Tuple type
        Token::LeftBracket => parse_tuple_type(parser),

        // Inline object type
        Token::LeftBrace => parse_object_type(parser),

        // Keyword type or type reference
        Token::Identifier(sym) => {
            let spelling = parser.resolve(*sym);
            if let Some(keyword) = KeywordType::from_name(spelling) {
                parser.advance();
                return Ok(TypeAnnotation {
                    ty: Type::Keyword(keyword),
                    span: start_span,
                });
            }

            let name = parse_entity_name(parser)?;
            let name_span = *name.span();

            let (type_args, span) = if parser.check(&Token::Less) {
                let (args, end_span) = parse_type_arguments(parser)?;
                (Some(args), parser.combine_spans(&start_span, &end_span))
            } else {
                (None, parser.combine_spans(&start_span, &name_span))
            };

            Ok(TypeAnnotation {
                ty: Type::Reference(TypeReference { name, type_args }),
                span,
            })
        }

        _ => Err(parser.unexpected_token(&[
            Token::Identifier(crate::interner::Symbol::dummy()),
            Token::LeftParen,
            Token::LeftBracket,
            Token::LeftBrace,
        ])),
    }
}

fn literal_type(expression: Expression, span: Span) -> TypeAnnotation {
    TypeAnnotation {
        ty: Type::Literal(LiteralType {
            expression: Box::new(expression),
        }),
        span,
    }
}

/// Parse an entity name: `User` or `Types.ObjectId` or deeper chains.
pub fn parse_entity_name(parser: &mut Parser) -> Result<EntityName, ParseError> {
    let first = parser.expect_identifier()?;
    let mut name = EntityName::Ident(first);
    let mut guard = super::guards::LoopGuard::new("entity_name");

    while parser.check(&Token::Dot) {
        guard.check()?;
        parser.advance();
        let right = parser.expect_identifier()?;
        let span = parser.combine_spans(name.span(), &right.span);
        name = EntityName::Qualified(QualifiedName {
            left: Box::new(name),
            right,
            span,
        });
    }

    Ok(name)
}

/// Parse type arguments: `<T, U>`. Returns the arguments and the span of
/// the closing `>`.
fn parse_type_arguments(
    parser: &mut Parser,
) -> Result<(Vec<TypeAnnotation>, Span), ParseError> {
    parser.expect(Token::Less)?;

    let mut args = Vec::new();
    let mut guard = super::guards::LoopGuard::new("type_arguments");

    while !parser.check(&Token::Greater) && !parser.at_eof() {
        guard.check()?;
        args.push(parse_type_annotation(parser)?);

        if !parser.check(&Token::Greater) {
            parser.expect(Token::Comma)?;
        }
    }

    let end_span = parser.current_span();
    parser.expect(Token::Greater)?;

    Ok((args, end_span))
}

/// Parse `(...)` in type position: either a function type
/// `(x: number) => void` or a parenthesized type `(string | null)`.
///
/// Tries the function type first and backtracks on failure.
fn parse_paren_or_function_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let checkpoint = parser.checkpoint();

    match parse_function_type(parser) {
        Ok(ty) => Ok(ty),
        Err(_) => {
            parser.rewind(checkpoint);

            let start_span = parser.current_span();
            parser.expect(Token::LeftParen)?;
            let inner = parse_type_annotation(parser)?;
            let end_span = parser.current_span();
            parser.expect(Token::RightParen)?;

            let span = parser.combine_spans(&start_span, &end_span);
            Ok(TypeAnnotation {
                ty: Type::Parenthesized(Box::new(inner)),
                span,
            })
        }
    }
}

/// Parse a function type: `(x: number, cb?: () => void) => string`.
fn parse_function_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftParen)?;

    let mut params = Vec::new();
    let mut guard = super::guards::LoopGuard::new("function_type_params");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check()?;

        let name = parser.expect_identifier()?;

        let optional = if parser.check(&Token::Question) {
            parser.advance();
            true
        } else {
            false
        };

        let ty = if parser.check(&Token::Colon) {
            parser.advance();
            Some(parse_type_annotation(parser)?)
        } else {
            None
        };

        params.push(FunctionTypeParam { name, optional, ty });

        if !parser.check(&Token::RightParen) {
            parser.expect(Token::Comma)?;
        }
    }

    parser.expect(Token::RightParen)?;
    parser.expect(Token::Arrow)?;

    let return_type = parse_type_annotation(parser)?;
    let span = parser.combine_spans(&start_span, &return_type.span);

    Ok(TypeAnnotation {
        ty: Type::Function(FunctionType {
            params,
            return_type: Box::new(return_type),
        }),
        span,
    })
}

/// Parse a tuple type: `[number, string]`.
fn parse_tuple_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftBracket)?;

    let mut element_types = Vec::new();
    let mut guard = super::guards::LoopGuard::new("tuple_elements");

    while !parser.check(&Token::RightBracket) && !parser.at_eof() {
        guard.check()?;
        element_types.push(parse_type_annotation(parser)?);

        if !parser.check(&Token::RightBracket) {
            parser.expect(Token::Comma)?;
        }
    }

    let end_span = parser.current_span();
    parser.expect(Token::RightBracket)?;

    let span = parser.combine_spans(&start_span, &end_span);
    Ok(TypeAnnotation {
        ty: Type::Tuple(TupleType { element_types }),
        span,
    })
}

/// Parse an inline object type: `{ x: number; y?: string }`.
///
/// Members are properties only; separators may be `;` or `,` and the
/// trailing separator is optional.
fn parse_object_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftBrace)?;

    let mut members = Vec::new();
    let mut guard = super::guards::LoopGuard::new("object_type_members");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        let member_start = parser.current_span();

        let name = parser.expect_identifier()?;

        let optional = if parser.check(&Token::Question) {
            parser.advance();
            true
        } else {
            false
        };

        parser.expect(Token::Colon)?;
        let ty = parse_type_annotation(parser)?;

        let span = parser.combine_spans(&member_start, &ty.span);
        members.push(ObjectTypeProperty {
            name,
            optional,
            ty,
            span,
        });

        if parser.check(&Token::Semicolon) || parser.check(&Token::Comma) {
            parser.advance();
        } else {
            break;
        }
    }

    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;

    let span = parser.combine_spans(&start_span, &end_span);
    Ok(TypeAnnotation {
        ty: Type::Object(ObjectType { members }),
        span,
    })
}
