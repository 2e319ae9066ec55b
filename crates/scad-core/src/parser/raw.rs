//! Raw derivation tree produced by the grammar
//!
//! The tree mirrors the shape of the grammar rather than the language: statements
//! come wrapped in sequences together with their `;` terminator, a missing `else`
//! is a placeholder, and assignment targets are unchecked expressions. The
//! normalizer turns it into the flat statement list the evaluator walks.

use super::token::Token;
use crate::ast::{CallArgument, Expr, Parameter, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Seq(Vec<RawNode>),
    /// Statement terminator `;`
    Terminator(Token),
    /// Stands in for an absent optional part
    Placeholder,
    Expr {
        expr: Expr,
        span: Span,
    },
    /// `target = value`; the target is validated during normalization
    Assignment {
        target: Expr,
        target_token: Token,
        value: Expr,
        span: Span,
    },
    ModuleCall {
        name: String,
        arguments: Vec<CallArgument>,
        span: Span,
    },
    If {
        condition: Expr,
        then_branch: Box<RawNode>,
        else_branch: Box<RawNode>,
        span: Span,
    },
    Compound {
        body: Box<RawNode>,
        span: Span,
    },
    ModuleDef {
        name: String,
        params: Vec<Parameter>,
        body: Box<RawNode>,
        span: Span,
    },
    FunctionDef {
        name: String,
        params: Vec<Parameter>,
        body: Expr,
        span: Span,
    },
}

impl RawNode {
    /// Source span covered by this node, if it covers any tokens
    pub fn span(&self) -> Option<Span> {
        match self {
            RawNode::Seq(items) => items
                .iter()
                .filter_map(RawNode::span)
                .reduce(Span::merge),
            RawNode::Terminator(token) => Some(token.span()),
            RawNode::Placeholder => None,
            RawNode::Expr { span, .. }
            | RawNode::Assignment { span, .. }
            | RawNode::ModuleCall { span, .. }
            | RawNode::If { span, .. }
            | RawNode::Compound { span, .. }
            | RawNode::ModuleDef { span, .. }
            | RawNode::FunctionDef { span, .. } => Some(*span),
        }
    }

    /// Wrap a statement together with its terminator
    pub fn terminated(node: RawNode, terminator: Token) -> RawNode {
        RawNode::Seq(vec![node, RawNode::Terminator(terminator)])
    }
}
