//! Error types for evaluation failures
//!
//! Most "no sensible operation" cases degrade to `undef` instead of failing;
//! these are the few that abort the run.

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// User-defined modules and functions cannot be executed
    #[error("Cannot call user defined {kind}s yet - not implemented: '{name}'")]
    NotImplemented {
        kind: &'static str,
        name: String,
        span: Option<Span>,
    },

    /// A value with no sensible conversion to the requested type
    #[error("cannot convert {from} to {to}")]
    Coercion {
        from: &'static str,
        to: &'static str,
        span: Option<Span>,
    },
}

impl EvalError {
    pub fn not_implemented(kind: &'static str, name: impl Into<String>, span: Span) -> Self {
        EvalError::NotImplemented {
            kind,
            name: name.into(),
            span: Some(span),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::NotImplemented { span, .. } | EvalError::Coercion { span, .. } => *span,
        }
    }

    /// Attach a location if the error does not have one yet
    pub fn at(mut self, location: Span) -> Self {
        match &mut self {
            EvalError::NotImplemented { span, .. } | EvalError::Coercion { span, .. } => {
                span.get_or_insert(location);
            }
        }
        self
    }

    /// Format error without source code (brief format)
    pub fn format_display(&self) -> String {
        format!("runtime error: {self}")
    }

    pub fn to_diagnostic(&self, filename: &str) -> Diagnostic {
        Diagnostic::error(
            DiagnosticKind::Runtime,
            self.to_string(),
            self.span().unwrap_or_default(),
            filename.to_string(),
        )
    }
}
