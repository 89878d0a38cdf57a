//! Expression parsing
//!
//! Precedence-climbing parser for the expression subset. Arrow functions
//! are disambiguated from parenthesized expressions by checkpointing and
//! backtracking.

use super::{precedence, precedence::Precedence, ParseError, Parser};
use crate::ast::*;
use crate::token::Token;

/// Parse an expression.
///
/// This is the assignment-level entry point; every recursive descent
/// into a nested expression goes through here so depth is tracked.
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.depth += 1;
    if parser.depth > super::guards::MAX_PARSE_DEPTH {
        parser.depth -= 1;
        return Err(ParseError::parser_limit_exceeded(
            format!(
                "maximum nesting depth ({}) exceeded in expression",
                super::guards::MAX_PARSE_DEPTH
            ),
            parser.current_span(),
        ));
    }

    let result = parse_assignment(parser);

    parser.depth -= 1;
    result
}

/// Parse an assignment-level expression, including arrow functions.
fn parse_assignment(parser: &mut Parser) -> Result<Expression, ParseError> {
    // `x => expr` single-parameter arrow
    if matches!(parser.current(), Token::Identifier(_))
        && matches!(parser.peek(), Some(Token::Arrow))
        && !parser.is_contextual("async")
    {
        return parse_arrow_function(parser, false);
    }

    // `async ...` may start an arrow function or just be an identifier
    if parser.is_contextual("async") {
        let checkpoint = parser.checkpoint();
        parser.advance();

        let looks_like_arrow = parser.check(&Token::LeftParen)
            || (matches!(parser.current(), Token::Identifier(_))
                && matches!(parser.peek(), Some(Token::Arrow)));

        if looks_like_arrow {
            match parse_arrow_function(parser, true) {
                Ok(expr) => return Ok(expr),
                Err(_) => parser.rewind(checkpoint),
            }
        } else {
            parser.rewind(checkpoint);
        }
    }

    // `(...) => expr` arrow, or a plain parenthesized expression
    if parser.check(&Token::LeftParen) {
        let checkpoint = parser.checkpoint();
        match parse_arrow_function(parser, false) {
            Ok(expr) => return Ok(expr),
            Err(_) => parser.rewind(checkpoint),
        }
    }

    let left = parse_conditional(parser)?;

    if let Some(operator) = assignment_operator(parser.current()) {
        if !matches!(
            left,
            Expression::Identifier(_) | Expression::Member(_) | Expression::Index(_)
        ) {
            return Err(ParseError::invalid_syntax(
                "invalid assignment target",
                *left.span(),
            ));
        }

        parser.advance();
        let right = parse_expression(parser)?;
        let span = parser.combine_spans(left.span(), right.span());

        return Ok(Expression::Assignment(AssignmentExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }));
    }

    Ok(left)
}

fn assignment_operator(token: &Token) -> Option<AssignmentOperator> {
    match token {
        Token::Equal => Some(AssignmentOperator::Assign),
        Token::PlusEqual => Some(AssignmentOperator::AddAssign),
        Token::MinusEqual => Some(AssignmentOperator::SubAssign),
        Token::StarEqual => Some(AssignmentOperator::MulAssign),
        Token::SlashEqual => Some(AssignmentOperator::DivAssign),
        _ => None,
    }
}

/// Parse a conditional (ternary) expression.
fn parse_conditional(parser: &mut Parser) -> Result<Expression, ParseError> {
    let test = parse_binary_expression(parser, Precedence::NullCoalescing)?;

    if !parser.check(&Token::Question) {
        return Ok(test);
    }
    parser.advance();

    let consequent = parse_expression(parser)?;
    parser.expect(Token::Colon)?;
    let alternate = parse_expression(parser)?;

    let span = parser.combine_spans(test.span(), alternate.span());
    Ok(Expression::Conditional(ConditionalExpression {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
        span,
    }))
}

/// Parse binary and logical operators with precedence climbing.
fn parse_binary_expression(
    parser: &mut Parser,
    min: Precedence,
) -> Result<Expression, ParseError> {
    let mut left = parse_unary_expression(parser)?;
    let mut guard = super::guards::LoopGuard::new("binary_operators");

    loop {
        guard.check()?;

        let prec = precedence::get_precedence(parser.current());
        if prec == Precedence::None || prec < min {
            break;
        }
        // Assignment and ?: are handled above this level
        if matches!(prec, Precedence::Assignment | Precedence::Conditional) {
            break;
        }

        let op_token = parser.advance();
        let right = parse_binary_expression(parser, prec.one_tighter())?;
        let span = parser.combine_spans(left.span(), right.span());

        left = match logical_operator(&op_token) {
            Some(operator) => Expression::Logical(LogicalExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            }),
            None => {
                let operator = binary_operator(&op_token).ok_or_else(|| {
                    ParseError::invalid_syntax(
                        format!("'{}' is not a binary operator", op_token),
                        span,
                    )
                })?;
                Expression::Binary(BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    span,
                })
            }
        };
    }

    Ok(left)
}

fn logical_operator(token: &Token) -> Option<LogicalOperator> {
    match token {
        Token::AmpAmp => Some(LogicalOperator::And),
        Token::PipePipe => Some(LogicalOperator::Or),
        Token::QuestionQuestion => Some(LogicalOperator::NullishCoalescing),
        _ => None,
    }
}

fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Subtract),
        Token::Star => Some(BinaryOperator::Multiply),
        Token::Slash => Some(BinaryOperator::Divide),
        Token::Percent => Some(BinaryOperator::Modulo),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::EqualEqualEqual => Some(BinaryOperator::StrictEqual),
        Token::BangEqualEqual => Some(BinaryOperator::StrictNotEqual),
        Token::Less => Some(BinaryOperator::LessThan),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::GreaterThan),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Amp => Some(BinaryOperator::BitwiseAnd),
        Token::Pipe => Some(BinaryOperator::BitwiseOr),
        _ => None,
    }
}

/// Parse a unary expression.
fn parse_unary_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();

    let operator = match parser.current() {
        Token::Bang => Some(UnaryOperator::Not),
        Token::Minus => Some(UnaryOperator::Minus),
        Token::Plus => Some(UnaryOperator::Plus),
        _ => None,
    };

    if let Some(operator) = operator {
        parser.advance();
        let operand = parse_unary_expression(parser)?;
        let span = parser.combine_spans(&start_span, operand.span());
        return Ok(Expression::Unary(UnaryExpression {
            operator,
            operand: Box::new(operand),
            span,
        }));
    }

    if parser.check(&Token::Typeof) {
        parser.advance();
        let argument = parse_unary_expression(parser)?;
        let span = parser.combine_spans(&start_span, argument.span());
        return Ok(Expression::Typeof(TypeofExpression {
            argument: Box::new(argument),
            span,
        }));
    }

    if parser.check(&Token::Await) {
        parser.advance();
        let argument = parse_unary_expression(parser)?;
        let span = parser.combine_spans(&start_span, argument.span());
        return Ok(Expression::Await(AwaitExpression {
            argument: Box::new(argument),
            span,
        }));
    }

    parse_postfix_expression(parser)
}

/// Parse call, member, index, and cast suffixes.
fn parse_postfix_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut expr = parse_primary_expression(parser)?;
    let mut guard = super::guards::LoopGuard::new("postfix_operators");

    loop {
        guard.check()?;

        match parser.current() {
            Token::Dot => {
                parser.advance();
                let property = parse_member_name(parser)?;
                let span = parser.combine_spans(expr.span(), &property.span);
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    property,
                    optional: false,
                    span,
                });
            }

            Token::QuestionDot => {
                let op_span = parser.current_span();
                parser.advance();

                if parser.check(&Token::LeftParen) || parser.check(&Token::LeftBracket) {
                    return Err(ParseError::unsupported_feature(
                        "optional call and index access",
                        op_span,
                    ));
                }

                let property = parse_member_name(parser)?;
                let span = parser.combine_spans(expr.span(), &property.span);
                expr = Expression::Member(MemberExpression {
                    object: Box::new(expr),
                    property,
                    optional: true,
                    span,
                });
            }

            Token::LeftParen => {
                parser.advance();
                let arguments = parse_call_arguments(parser)?;
                let end_span = parser.current_span();
                parser.expect(Token::RightParen)?;

                let span = parser.combine_spans(expr.span(), &end_span);
                expr = Expression::Call(CallExpression {
                    callee: Box::new(expr),
                    arguments,
                    span,
                });
            }

            Token::LeftBracket => {
                parser.advance();
                let index = parse_expression(parser)?;
                let end_span = parser.current_span();
                parser.expect(Token::RightBracket)?;

                let span = parser.combine_spans(expr.span(), &end_span);
                expr = Expression::Index(IndexExpression {
                    object: Box::new(expr),
                    index: Box::new(index),
                    span,
                });
            }

            _ => {
                // `value as Type` cast
                if parser.is_contextual("as") {
                    parser.advance();
                    let target_type = super::types::parse_type_annotation(parser)?;
                    let span = parser.combine_spans(expr.span(), &target_type.span);
                    expr = Expression::TypeCast(TypeCastExpression {
                        expression: Box::new(expr),
                        target_type,
                        span,
                    });
                    continue;
                }
                break;
            }
        }
    }

    Ok(expr)
}

/// Parse a member name after `.` or `?.`.
///
/// Keywords are legal member names in JavaScript (`config.default`), so
/// keyword tokens are interned by their spelling here.
fn parse_member_name(parser: &mut Parser) -> Result<Identifier, ParseError> {
    match parser.current() {
        Token::Identifier(_) => parser.expect_identifier(),
        tok if tok.is_keyword() => {
            let spelling = tok.to_string();
            let span = parser.current_span();
            parser.advance();
            let name = parser.intern(&spelling);
            Ok(Identifier { name, span })
        }
        _ => Err(parser.unexpected_token(&[Token::Identifier(crate::interner::Symbol::dummy())])),
    }
}

/// Parse comma-separated call arguments (closing paren not consumed).
fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expression>, ParseError> {
    let mut arguments = Vec::new();
    let mut guard = super::guards::LoopGuard::new("call_arguments");

    while !parser.check(&Token::RightParen) && !parser.at_eof() {
        guard.check()?;
        arguments.push(parse_expression(parser)?);

        if !parser.check(&Token::RightParen) {
            parser.expect(Token::Comma)?;
        }
    }

    Ok(arguments)
}

/// Parse a primary expression.
fn parse_primary_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let span = parser.current_span();

    match parser.current() {
        Token::IntLiteral(value) => {
            let value = *value;
            parser.advance();
            Ok(Expression::IntLiteral(IntLiteral { value, span }))
        }
        Token::FloatLiteral(value) => {
            let value = *value;
            parser.advance();
            Ok(Expression::FloatLiteral(FloatLiteral { value, span }))
        }
        Token::BigIntLiteral(digits) => {
            let digits = *digits;
            parser.advance();
            Ok(Expression::BigIntLiteral(BigIntLiteral { digits, span }))
        }
        Token::StringLiteral(value) => {
            let value = *value;
            parser.advance();
            Ok(Expression::StringLiteral(StringLiteral { value, span }))
        }
        Token::TemplateLiteral(value) => {
            let value = *value;
            parser.advance();
            Ok(Expression::TemplateLiteral(TemplateLiteral { value, span }))
        }
        Token::True => {
            parser.advance();
            Ok(Expression::BooleanLiteral(BooleanLiteral { value: true, span }))
        }
        Token::False => {
            parser.advance();
            Ok(Expression::BooleanLiteral(BooleanLiteral {
                value: false,
                span,
            }))
        }
        Token::Null => {
            parser.advance();
            Ok(Expression::NullLiteral(span))
        }
        Token::This => {
            parser.advance();
            Ok(Expression::This(span))
        }
        Token::Super => {
            parser.advance();
            Ok(Expression::Super(span))
        }

        Token::Identifier(_) => {
            let ident = parser.expect_identifier()?;
            Ok(Expression::Identifier(ident))
        }

        Token::LeftParen => {
            parser.advance();
            let inner = parse_expression(parser)?;
            let end_span = parser.current_span();
            parser.expect(Token::RightParen)?;

            let span = parser.combine_spans(&span, &end_span);
            Ok(Expression::Parenthesized(ParenthesizedExpression {
                expression: Box::new(inner),
                span,
            }))
        }

        Token::LeftBracket => parse_array_literal(parser),
        Token::LeftBrace => parse_object_literal(parser),
        Token::New => parse_new_expression(parser),

        Token::Function => Err(ParseError::unsupported_feature(
            "function expressions",
            span,
        )),

        _ => Err(parser.unexpected_token(&[
            Token::Identifier(crate::interner::Symbol::dummy()),
            Token::IntLiteral(0),
            Token::StringLiteral(crate::interner::Symbol::dummy()),
            Token::LeftParen,
            Token::LeftBracket,
            Token::LeftBrace,
        ])),
    }
}

/// Parse an array literal: `[1, 2, 3]`.
fn parse_array_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftBracket)?;

    let mut elements = Vec::new();
    let mut guard = super::guards::LoopGuard::new("array_elements");

    while !parser.check(&Token::RightBracket) && !parser.at_eof() {
        guard.check()?;
        elements.push(parse_expression(parser)?);

        if !parser.check(&Token::RightBracket) {
            parser.expect(Token::Comma)?;
        }
    }

    let end_span = parser.current_span();
    parser.expect(Token::RightBracket)?;

    let span = parser.combine_spans(&start_span, &end_span);
    Ok(Expression::Array(ArrayExpression { elements, span }))
}

/// Parse an object literal: `{ x: 1, "y": 2, [k]: 3, shorthand }`.
fn parse_object_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftBrace)?;

    let mut properties = Vec::new();
    let mut guard = super::guards::LoopGuard::new("object_properties");

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        guard.check()?;
        let prop_start = parser.current_span();

        let key = match parser.current() {
            Token::Identifier(_) => PropertyKey::Identifier(parser.expect_identifier()?),
            Token::StringLiteral(value) => {
                let value = *value;
                let key_span = parser.current_span();
                parser.advance();
                PropertyKey::StringLiteral(StringLiteral {
                    value,
                    span: key_span,
                })
            }
            Token::IntLiteral(value) => {
                let value = *value;
                let key_span = parser.current_span();
                parser.advance();
                PropertyKey::IntLiteral(IntLiteral {
                    value,
                    span: key_span,
                })
            }
            Token::LeftBracket => {
                parser.advance();
                let key_expr = parse_expression(parser)?;
                parser.expect(Token::RightBracket)?;
                PropertyKey::Computed(key_expr)
            }
            _ => {
                return Err(parser.unexpected_token(&[
                    Token::Identifier(crate::interner::Symbol::dummy()),
                    Token::StringLiteral(crate::interner::Symbol::dummy()),
                    Token::RightBrace,
                ]));
            }
        };

        let value = if parser.check(&Token::Colon) {
            parser.advance();
            parse_expression(parser)?
        } else if let PropertyKey::Identifier(ref id) = key {
            if parser.check(&Token::LeftParen) {
                return Err(ParseError::unsupported_feature(
                    "object literal methods",
                    parser.current_span(),
                ));
            }
            // Shorthand { x } expands to { x: x }
            Expression::Identifier(id.clone())
        } else {
            return Err(parser.unexpected_token(&[Token::Colon]));
        };

        let span = parser.combine_spans(&prop_start, value.span());
        properties.push(Property { key, value, span });

        if parser.check(&Token::Comma) {
            parser.advance();
        } else {
            break;
        }
    }

    let end_span = parser.current_span();
    parser.expect(Token::RightBrace)?;

    let span = parser.combine_spans(&start_span, &end_span);
    Ok(Expression::Object(ObjectExpression { properties, span }))
}

/// Parse a new expression: `new Date()`, `new mongoose.Types.ObjectId()`.
fn parse_new_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::New)?;

    let mut callee = parse_primary_expression(parser)?;
    let mut guard = super::guards::LoopGuard::new("new_callee");

    // Member chain binds tighter than the construction call
    while parser.check(&Token::Dot) {
        guard.check()?;
        parser.advance();
        let property = parse_member_name(parser)?;
        let span = parser.combine_spans(callee.span(), &property.span);
        callee = Expression::Member(MemberExpression {
            object: Box::new(callee),
            property,
            optional: false,
            span,
        });
    }

    let (arguments, end_span) = if parser.check(&Token::LeftParen) {
        parser.advance();
        let arguments = parse_call_arguments(parser)?;
        let end_span = parser.current_span();
        parser.expect(Token::RightParen)?;
        (arguments, end_span)
    } else {
        (Vec::new(), *callee.span())
    };

    let span = parser.combine_spans(&start_span, &end_span);
    Ok(Expression::New(NewExpression {
        callee: Box::new(callee),
        arguments,
        span,
    }))
}

/// Parse an arrow function, assuming the caller has decided this is one.
///
/// Entered either at a single identifier parameter or at the opening
/// paren of a parameter list; errors cause the caller to backtrack.
fn parse_arrow_function(parser: &mut Parser, is_async: bool) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();

    let (params, return_type) = if parser.check(&Token::LeftParen) {
        parser.advance();
        let params = super::stmt::parse_function_parameters(parser)?;
        parser.expect(Token::RightParen)?;

        let return_type = if parser.check(&Token::Colon) {
            parser.advance();
            Some(super::types::parse_type_annotation(parser)?)
        } else {
            None
        };

        (params, return_type)
    } else {
        let name = parser.expect_identifier()?;
        let param_span = name.span;
        (
            vec![Parameter {
                decorators: Vec::new(),
                visibility: None,
                readonly: false,
                name,
                optional: false,
                type_annotation: None,
                default_value: None,
                span: param_span,
            }],
            None,
        )
    };

    parser.expect(Token::Arrow)?;

    let (body, end_span) = if parser.check(&Token::LeftBrace) {
        parser.advance();
        let block = super::stmt::parse_block_statement(parser)?;
        let block_span = block.span;
        (ArrowBody::Block(block), block_span)
    } else {
        let expr = parse_expression(parser)?;
        let expr_span = *expr.span();
        (ArrowBody::Expression(Box::new(expr)), expr_span)
    };

    let span = parser.combine_spans(&start_span, &end_span);
    Ok(Expression::Arrow(ArrowFunction {
        params,
        return_type,
        body,
        is_async,
        span,
    }))
}
