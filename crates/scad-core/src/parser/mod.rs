//! Lexer, grammar, normalizer and hoister
//!
//! `compile` runs the whole front-end: source text is tokenized, the significant
//! tokens are parsed into a raw derivation tree, the tree is normalized into a
//! flat statement list, and repeated top-level declarations are hoisted.

use crate::ast::Stmt;
use chumsky::prelude::*;

mod errors;
mod expressions;
mod hoist;
mod lexer;
mod literals;
mod normalize;
mod operators;
mod raw;
mod statements;
mod token;
mod utils;

pub use errors::{CompileError, LexError, ParseError};
pub use hoist::hoist;
pub use lexer::{KEYWORDS, significant, tokenize};
pub use normalize::normalize;
pub use raw::RawNode;
pub use token::{Token, TokenKind};

use utils::{ParserExtra, ParserInput, StmtParser};

/// The statement grammar, plus each statement production on its own so a
/// statement can be checked for more than one derivation
struct Grammar<'a> {
    program: Boxed<'a, 'a, ParserInput<'a>, Vec<(RawNode, SimpleSpan)>, ParserExtra<'a>>,
    productions: Vec<(&'static str, StmtParser<'a>)>,
}

impl<'a> Grammar<'a> {
    fn new() -> Self {
        let expr = expressions::expression();
        let mut stmt_ref = Recursive::declare();

        let empty = statements::empty_stmt();
        let compound = statements::compound_stmt(stmt_ref.clone());
        let if_stmt = statements::if_stmt(expr.clone(), stmt_ref.clone());
        let module_def = statements::module_def(expr.clone(), stmt_ref.clone());
        let function_def = statements::function_def(expr.clone());
        let module_call = statements::module_call(expr.clone());
        let assignment = statements::assignment(expr.clone());
        let expr_stmt = statements::expr_stmt(expr);

        let stmt = choice((
            empty.clone(),
            compound.clone(),
            if_stmt.clone(),
            module_def.clone(),
            function_def.clone(),
            module_call.clone(),
            assignment.clone(),
            expr_stmt.clone(),
        ))
        .boxed();

        stmt_ref.define(stmt.clone());

        let program = stmt
            .map_with(|node, e| (node, e.span()))
            .repeated()
            .collect::<Vec<_>>()
            .then_ignore(end())
            .boxed();

        let productions = [
            ("empty", empty),
            ("compound", compound),
            ("if", if_stmt),
            ("module definition", module_def),
            ("function definition", function_def),
            ("module call", module_call),
            ("assignment", assignment),
            ("expression", expr_stmt),
        ]
        .into_iter()
        .map(|(label, production)| (label, production.then_ignore(end()).boxed()))
        .collect();

        Grammar {
            program,
            productions,
        }
    }
}

/// Count the productions that accept exactly `tokens`; anything but one is an error
fn check_derivations<'a>(
    tokens: &'a [Token],
    productions: &[(&'static str, StmtParser<'a>)],
) -> Result<(), ParseError> {
    let accepted: Vec<&str> = productions
        .iter()
        .filter(|(_, production)| production.parse(tokens).into_result().is_ok())
        .map(|(label, _)| *label)
        .collect();

    match (accepted.len(), tokens.first()) {
        (1, _) => Ok(()),
        (0, _) | (_, None) => Err(ParseError::UnexpectedEnd {
            offset: tokens.last().map(Token::end).unwrap_or(0),
        }),
        (derivations, Some(first)) => {
            tracing::error!(?accepted, "statement has more than one derivation");
            Err(ParseError::Ambiguous {
                derivations,
                token: first.clone(),
            })
        }
    }
}

/// Map grammar errors to the furthest offending token, or end of input
fn syntax_error(tokens: &[Token], errors: &[Rich<'_, Token>]) -> ParseError {
    let furthest = errors.iter().map(|e| e.span().start).max();
    match furthest.and_then(|index| tokens.get(index)) {
        Some(token) => ParseError::InvalidSyntax {
            token: token.clone(),
        },
        None => ParseError::UnexpectedEnd {
            offset: tokens.last().map(Token::end).unwrap_or(0),
        },
    }
}

/// Parse significant tokens into a raw derivation tree
pub fn parse_tokens(tokens: &[Token]) -> Result<RawNode, ParseError> {
    let grammar = Grammar::new();
    let (output, errors) = grammar.program.parse(tokens).into_output_errors();

    let statements = match output {
        Some(statements) if errors.is_empty() => statements,
        _ => return Err(syntax_error(tokens, &errors)),
    };

    for (_, span) in &statements {
        check_derivations(&tokens[span.start..span.end], &grammar.productions)?;
    }

    Ok(RawNode::Seq(
        statements.into_iter().map(|(node, _)| node).collect(),
    ))
}

/// Tokenize, parse and normalize without hoisting
pub(crate) fn parse_source(source: &str) -> Result<Vec<Stmt>, CompileError> {
    let tokens = significant(&tokenize(source)?);
    let raw = parse_tokens(&tokens)?;
    Ok(normalize(&raw)?)
}

/// Compile source text into the hoisted top-level statement list
pub fn compile(source: &str) -> Result<Vec<Stmt>, CompileError> {
    let statements = hoist(parse_source(source)?);
    tracing::debug!(statements = statements.len(), "compiled source");
    Ok(statements)
}
