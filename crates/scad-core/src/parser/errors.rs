//! Error types for lexing and parsing
//!
//! Converts them into diagnostics with source spans so frontends can render
//! a caret under the offending token.

use super::token::Token;
use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use thiserror::Error;

/// Source text no lexical rule accepts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{found}' at line {line} col {col}")]
    UnexpectedCharacter {
        found: char,
        offset: usize,
        line: usize,
        col: usize,
    },
    #[error("unterminated {what} starting at line {line} col {col}")]
    Unterminated {
        what: &'static str,
        offset: usize,
        line: usize,
        col: usize,
    },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. } | LexError::Unterminated { line, .. } => {
                *line
            }
        }
    }

    pub fn col(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { col, .. } | LexError::Unterminated { col, .. } => *col,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { offset, found, .. } => {
                Span::new(*offset, offset + found.len_utf8())
            }
            LexError::Unterminated { offset, .. } => Span::new(*offset, offset + 1),
        }
    }
}

/// Token stream the grammar rejects
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// No derivation: the input stopped before a statement was complete
    #[error("Unexpected end of input")]
    UnexpectedEnd { offset: usize },

    /// More than one derivation for the same statement
    #[error("Ambiguous grammar -- internal parsing error")]
    Ambiguous { derivations: usize, token: Token },

    #[error("invalid syntax at line {} col {}: unexpected '{}'", .token.line, .token.col, .token.text)]
    InvalidSyntax { token: Token },

    #[error("invalid syntax at line {} col {}: cannot assign to '{}'", .token.line, .token.col, .token.text)]
    InvalidAssignmentTarget { token: Token },
}

impl ParseError {
    /// Offending token, when the error has one
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseError::UnexpectedEnd { .. } => None,
            ParseError::Ambiguous { token, .. }
            | ParseError::InvalidSyntax { token }
            | ParseError::InvalidAssignmentTarget { token } => Some(token),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedEnd { offset } => Span::new(*offset, *offset),
            ParseError::Ambiguous { token, .. }
            | ParseError::InvalidSyntax { token }
            | ParseError::InvalidAssignmentTarget { token } => token.span(),
        }
    }
}

/// Any failure of `compile`; no partial AST is ever returned
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::Lex(err) => err.span(),
            CompileError::Parse(err) => err.span(),
        }
    }

    /// Convert into a diagnostic for rendering with source context
    pub fn to_diagnostic(&self, filename: &str) -> Diagnostic {
        let diag = Diagnostic::error(
            DiagnosticKind::Parse,
            self.to_string(),
            self.span(),
            filename.to_string(),
        );

        match self {
            CompileError::Parse(ParseError::Ambiguous { derivations, .. }) => {
                diag.with_note(format!("{derivations} derivations matched this statement"))
            }
            CompileError::Parse(ParseError::InvalidAssignmentTarget { .. }) => {
                diag.with_help("only a plain identifier can be assigned to".to_string())
            }
            CompileError::Parse(ParseError::UnexpectedEnd { .. }) => {
                diag.with_suggestion("Did you forget a ';'?")
            }
            _ => diag,
        }
    }
}
