use super::literals;
use super::operators;
use super::token::Token;
use super::utils::{ParserExtra, ParserInput, byte_span, name, punct};
use crate::ast::{BinaryOp, CallArgument, Expr, Span};
use chumsky::prelude::*;

/// Creates a parser for a parenthesised argument list; also yields the closing `)`
pub fn call_arguments<'a, E>(
    expr: E,
) -> Boxed<'a, 'a, ParserInput<'a>, (Vec<CallArgument>, Token), ParserExtra<'a>>
where
    E: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
{
    let named = name()
        .then_ignore(punct("="))
        .then(expr.clone())
        .map(|(name, value): (Token, Expr)| CallArgument::Named {
            name: name.text,
            value,
        });

    let positional = expr.map(CallArgument::Positional);

    punct("(")
        .ignore_then(
            choice((named, positional))
                .separated_by(punct(","))
                .allow_trailing()
                .collect::<Vec<CallArgument>>(),
        )
        .then(punct(")"))
        .boxed()
}

/// One left-associative precedence level: `operand (op operand)*`
fn binary_level<'a, P, O>(operand: P, op: O) -> Boxed<'a, 'a, ParserInput<'a>, Expr, ParserExtra<'a>>
where
    P: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
    O: Parser<'a, ParserInput<'a>, BinaryOp, ParserExtra<'a>> + Clone + 'a,
{
    operand
        .clone()
        .then(op.then(operand).repeated().collect::<Vec<_>>())
        .map(|(first, rest)| {
            rest.into_iter().fold(first, |left, (op, right)| {
                let span = left.span().merge(right.span());
                Expr::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                    span,
                }
            })
        })
        .boxed()
}

/// Creates the full expression parser.
///
/// Precedence, tightest first: primary, postfix index, unary `! + -`, `* / %`,
/// `+ -`, `<< >>`, `< <= > >=`, `== !=`, `&`, `^`, `|`, `&&`, `||`, and the
/// right-associative conditional `c ? a : b`.
pub fn expression<'a>() -> Boxed<'a, 'a, ParserInput<'a>, Expr, ParserExtra<'a>> {
    let mut expr = Recursive::declare();

    let identifier = name().map(|token: Token| Expr::Identifier {
        name: token.text.clone(),
        token,
    });

    // Call syntax is only valid on a bare name
    let call = name()
        .then(call_arguments(expr.clone()))
        .map(|(callee, (arguments, close)): (Token, _)| Expr::Call {
            span: Span::new(callee.offset, close.end()),
            name: callee.text,
            arguments,
        });

    // [start : end] and [start : step : end]
    let range = punct("[")
        .ignore_then(expr.clone())
        .then_ignore(punct(":"))
        .then(expr.clone())
        .then(punct(":").ignore_then(expr.clone()).or_not())
        .then_ignore(punct("]"))
        .map_with(|((start, second), third), e| {
            let span = byte_span(e.slice());
            match third {
                Some(end) => Expr::Range {
                    start: Box::new(start),
                    step: Some(Box::new(second)),
                    end: Box::new(end),
                    span,
                },
                None => Expr::Range {
                    start: Box::new(start),
                    step: None,
                    end: Box::new(second),
                    span,
                },
            }
        })
        .boxed();

    let vector = expr
        .clone()
        .separated_by(punct(","))
        .allow_trailing()
        .collect::<Vec<Expr>>()
        .delimited_by(punct("["), punct("]"))
        .map_with(|elements, e| Expr::Vector {
            elements,
            span: byte_span(e.slice()),
        })
        .boxed();

    // Parenthesized expressions - allows precedence override
    let paren_expr = expr.clone().delimited_by(punct("("), punct(")"));

    // Primary expressions (atoms)
    let primary = choice((
        literals::number().boxed(),
        literals::string().boxed(),
        literals::boolean().boxed(),
        literals::undef().boxed(),
        call.boxed(),
        identifier.boxed(),
        range,
        vector,
        paren_expr.boxed(),
    ))
    .boxed();

    // Postfix indexing: v[i][j]
    let index = punct("[").ignore_then(expr.clone()).then(punct("]"));

    let postfix = primary
        .then(index.repeated().collect::<Vec<_>>())
        .map(|(object, indices)| {
            indices.into_iter().fold(object, |object, (index, close): (Expr, Token)| {
                let span = Span::new(object.span().start, close.end());
                Expr::Index {
                    object: Box::new(object),
                    index: Box::new(index),
                    span,
                }
            })
        })
        .boxed();

    // Unary operators apply right-to-left
    let unary = operators::unary_op()
        .repeated()
        .collect::<Vec<_>>()
        .then(postfix)
        .map(|(ops, operand)| {
            ops.into_iter().rev().fold(operand, |operand, (op, token)| {
                let span = Span::new(token.offset, operand.span().end);
                Expr::Unary {
                    op,
                    operand: Box::new(operand),
                    span,
                }
            })
        })
        .boxed();

    let mul_expr = binary_level(unary, operators::mul_op());
    let add_expr = binary_level(mul_expr, operators::add_op());
    let shift_expr = binary_level(add_expr, operators::shift_op());
    let cmp_expr = binary_level(shift_expr, operators::cmp_op());
    let eq_expr = binary_level(cmp_expr, operators::eq_op());
    let bit_and_expr = binary_level(eq_expr, operators::bit_and_op());
    let bit_xor_expr = binary_level(bit_and_expr, operators::bit_xor_op());
    let bit_or_expr = binary_level(bit_xor_expr, operators::bit_or_op());
    let and_expr = binary_level(bit_or_expr, operators::and_op());
    let or_expr = binary_level(and_expr, operators::or_op());

    let conditional = or_expr
        .then(
            punct("?")
                .ignore_then(expr.clone())
                .then_ignore(punct(":"))
                .then(expr.clone())
                .or_not(),
        )
        .map(|(condition, branches)| match branches {
            Some((then_expr, else_expr)) => {
                let span = condition.span().merge(else_expr.span());
                Expr::Conditional {
                    condition: Box::new(condition),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                    span,
                }
            }
            None => condition,
        });

    expr.define(conditional);
    expr.boxed()
}
