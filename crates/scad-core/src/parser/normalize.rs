//! Raw derivation tree to flat statement list
//!
//! Sequences of one element are unwrapped to that element, longer sequences are
//! flattened in order, and empty sequences, terminators and placeholders vanish.
//! The input tree is only read.

use super::errors::ParseError;
use super::raw::RawNode;
use crate::ast::{Expr, Span, Stmt};

/// Flatten a raw tree into statements
pub fn normalize(raw: &RawNode) -> Result<Vec<Stmt>, ParseError> {
    let mut statements = Vec::new();
    flatten_into(raw, &mut statements)?;
    Ok(statements)
}

fn flatten_into(node: &RawNode, out: &mut Vec<Stmt>) -> Result<(), ParseError> {
    match node {
        RawNode::Seq(items) => match items.as_slice() {
            [] => {}
            [single] => flatten_into(single, out)?,
            items => {
                for item in items {
                    flatten_into(item, out)?;
                }
            }
        },
        RawNode::Terminator(_) | RawNode::Placeholder => {}
        RawNode::Expr { expr, span } => out.push(Stmt::Expr {
            expr: expr.clone(),
            span: *span,
        }),
        RawNode::Assignment {
            target,
            target_token,
            value,
            span,
        } => match target {
            Expr::Identifier { name, token } => out.push(Stmt::Assignment {
                target: name.clone(),
                token: token.clone(),
                value: value.clone(),
                span: *span,
            }),
            _ => {
                return Err(ParseError::InvalidAssignmentTarget {
                    token: target_token.clone(),
                });
            }
        },
        RawNode::ModuleCall {
            name,
            arguments,
            span,
        } => out.push(Stmt::ModuleCall {
            name: name.clone(),
            arguments: arguments.clone(),
            span: *span,
        }),
        RawNode::If {
            condition,
            then_branch,
            else_branch,
            span,
        } => {
            let else_branch = match else_branch.as_ref() {
                RawNode::Placeholder => None,
                other => Some(Box::new(branch(other, *span)?)),
            };
            out.push(Stmt::If {
                condition: condition.clone(),
                then_branch: Box::new(branch(then_branch, *span)?),
                else_branch,
                span: *span,
            });
        }
        RawNode::Compound { body, span } => out.push(Stmt::Compound {
            statements: normalize(body)?,
            span: *span,
        }),
        RawNode::ModuleDef {
            name,
            params,
            body,
            span,
        } => out.push(Stmt::ModuleDef {
            name: name.clone(),
            params: params.clone(),
            body: Box::new(branch(body, *span)?),
            span: *span,
        }),
        RawNode::FunctionDef {
            name,
            params,
            body,
            span,
        } => out.push(Stmt::FunctionDef {
            name: name.clone(),
            params: params.clone(),
            body: body.clone(),
            span: *span,
        }),
    }
    Ok(())
}

/// A branch or body is one statement; anything else becomes a compound
fn branch(node: &RawNode, parent: Span) -> Result<Stmt, ParseError> {
    let statements = normalize(node)?;
    match <[Stmt; 1]>::try_from(statements) {
        Ok([single]) => Ok(single),
        Err(statements) => Ok(Stmt::Compound {
            statements,
            span: node.span().unwrap_or(parent),
        }),
    }
}
