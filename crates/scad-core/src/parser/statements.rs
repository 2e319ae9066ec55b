use super::expressions::call_arguments;
use super::raw::RawNode;
use super::token::Token;
use super::utils::{ParserExtra, ParserInput, StmtParser, byte_span, keyword, name, punct};
use crate::ast::{Expr, Parameter};
use chumsky::prelude::*;

/// Creates a parser for a parenthesised parameter list: `(a, b = 2)`
fn parameters<'a, E>(expr: E) -> Boxed<'a, 'a, ParserInput<'a>, Vec<Parameter>, ParserExtra<'a>>
where
    E: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
{
    let parameter = name()
        .then(punct("=").ignore_then(expr).or_not())
        .map(|(name, default): (Token, Option<Expr>)| Parameter {
            name: name.text,
            default,
        });

    parameter
        .separated_by(punct(","))
        .allow_trailing()
        .collect::<Vec<Parameter>>()
        .delimited_by(punct("("), punct(")"))
        .boxed()
}

/// Creates a parser for the empty statement `;`
pub fn empty_stmt<'a>() -> StmtParser<'a> {
    punct(";")
        .map(|terminator| RawNode::Seq(vec![RawNode::Terminator(terminator)]))
        .boxed()
}

/// Creates a parser for compound statements `{ ... }`
pub fn compound_stmt<'a, S>(stmt: S) -> StmtParser<'a>
where
    S: Parser<'a, ParserInput<'a>, RawNode, ParserExtra<'a>> + Clone + 'a,
{
    stmt.repeated()
        .collect::<Vec<RawNode>>()
        .delimited_by(punct("{"), punct("}"))
        .map_with(|body, e| RawNode::Compound {
            body: Box::new(RawNode::Seq(body)),
            span: byte_span(e.slice()),
        })
        .boxed()
}

/// Creates a parser for `if (cond) stmt [else stmt]`
pub fn if_stmt<'a, E, S>(expr: E, stmt: S) -> StmtParser<'a>
where
    E: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
    S: Parser<'a, ParserInput<'a>, RawNode, ParserExtra<'a>> + Clone + 'a,
{
    keyword("if")
        .ignore_then(expr.delimited_by(punct("("), punct(")")))
        .then(stmt.clone())
        .then(keyword("else").ignore_then(stmt).or_not())
        .map_with(|((condition, then_branch), else_branch), e| RawNode::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch.unwrap_or(RawNode::Placeholder)),
            span: byte_span(e.slice()),
        })
        .boxed()
}

/// Creates a parser for `module name(params) stmt`
pub fn module_def<'a, E, S>(expr: E, stmt: S) -> StmtParser<'a>
where
    E: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
    S: Parser<'a, ParserInput<'a>, RawNode, ParserExtra<'a>> + Clone + 'a,
{
    keyword("module")
        .ignore_then(name())
        .then(parameters(expr))
        .then(stmt)
        .map_with(|((name, params), body), e| RawNode::ModuleDef {
            name: name.text,
            params,
            body: Box::new(body),
            span: byte_span(e.slice()),
        })
        .boxed()
}

/// Creates a parser for `function name(params) = expr;`
pub fn function_def<'a, E>(expr: E) -> StmtParser<'a>
where
    E: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
{
    keyword("function")
        .ignore_then(name())
        .then(parameters(expr.clone()))
        .then_ignore(punct("="))
        .then(expr)
        .map_with(|((name, params), body), e| RawNode::FunctionDef {
            name: name.text,
            params,
            body,
            span: byte_span(e.slice()),
        })
        .then(punct(";"))
        .map(|(node, terminator)| RawNode::terminated(node, terminator))
        .boxed()
}

/// Creates a parser for `target = value;`.
///
/// Any expression is accepted as the target here; the normalizer rejects
/// everything but a bare identifier, pointing at the target's first token.
pub fn assignment<'a, E>(expr: E) -> StmtParser<'a>
where
    E: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
{
    any()
        .rewind()
        .then(expr.clone())
        .then_ignore(punct("="))
        .then(expr)
        .map_with(|((target_token, target), value), e| RawNode::Assignment {
            target,
            target_token,
            value,
            span: byte_span(e.slice()),
        })
        .then(punct(";"))
        .map(|(node, terminator)| RawNode::terminated(node, terminator))
        .boxed()
}

/// Creates a parser for module instantiation `name(args);`
pub fn module_call<'a, E>(expr: E) -> StmtParser<'a>
where
    E: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
{
    name()
        .then(call_arguments(expr))
        .map_with(|(name, (arguments, _close)), e| RawNode::ModuleCall {
            name: name.text,
            arguments,
            span: byte_span(e.slice()),
        })
        .then(punct(";"))
        .map(|(node, terminator)| RawNode::terminated(node, terminator))
        .boxed()
}

/// Creates a parser for expression statements `expr;`.
///
/// A bare call is a module instantiation, so it is left to `module_call`.
pub fn expr_stmt<'a, E>(expr: E) -> StmtParser<'a>
where
    E: Parser<'a, ParserInput<'a>, Expr, ParserExtra<'a>> + Clone + 'a,
{
    expr.filter(|e: &Expr| !matches!(e, Expr::Call { .. }))
        .map(|expr| RawNode::Expr {
            span: expr.span(),
            expr,
        })
        .then(punct(";"))
        .map(|(node, terminator)| RawNode::terminated(node, terminator))
        .boxed()
}
