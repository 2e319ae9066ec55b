//! Abstract Syntax Tree definitions for SCAD programs
//!
//! Expressions and statements are separate sum types. Leaves that come straight
//! from the source (identifiers and literals) keep the token they were built from
//! so errors can point at the exact line and column.

use serde::{Deserialize, Serialize};

mod span;

pub use crate::parser::Token;
pub use span::Span;

/// Literal constant as written in the source
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    Undef,
}

/// Argument in a module or function call (positional or named)
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum CallArgument {
    Positional(Expr),
    Named { name: String, value: Expr },
}

impl CallArgument {
    pub fn value(&self) -> &Expr {
        match self {
            CallArgument::Positional(value) => value,
            CallArgument::Named { value, .. } => value,
        }
    }
}

/// Parameter of a module or function declaration
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub default: Option<Expr>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Expr {
    Literal {
        value: Literal,
        token: Token,
    },
    Identifier {
        name: String,
        token: Token,
    },
    /// `[a, b, c]`
    Vector {
        elements: Vec<Expr>,
        span: Span,
    },
    /// `[start : end]` or `[start : step : end]`
    Range {
        start: Box<Expr>,
        step: Option<Box<Expr>>,
        end: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    /// `condition ? then_expr : else_expr`
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
        span: Span,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
    /// Function call in expression position; the callee is always a bare name
    Call {
        name: String,
        arguments: Vec<CallArgument>,
        span: Span,
    },
}

impl Expr {
    /// Get the span of this expression
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { token, .. } => token.span(),
            Expr::Identifier { token, .. } => token.span(),
            Expr::Vector { span, .. } => *span,
            Expr::Range { span, .. } => *span,
            Expr::Unary { span, .. } => *span,
            Expr::Binary { span, .. } => *span,
            Expr::Conditional { span, .. } => *span,
            Expr::Index { span, .. } => *span,
            Expr::Call { span, .. } => *span,
        }
    }
}

/// Binary operators
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,  // !x
    Plus, // +x
    Neg,  // -x
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
        }
    }
}

/// Statement types
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Stmt {
    /// `name = value;`
    Assignment {
        target: String,
        token: Token,
        value: Expr,
        span: Span,
    },
    /// `name(args);`
    ModuleCall {
        name: String,
        arguments: Vec<CallArgument>,
        span: Span,
    },
    ModuleDef {
        name: String,
        params: Vec<Parameter>,
        body: Box<Stmt>,
        span: Span,
    },
    FunctionDef {
        name: String,
        params: Vec<Parameter>,
        body: Expr,
        span: Span,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        span: Span,
    },
    /// `{ ... }`; braces alone do not open a scope
    Compound {
        statements: Vec<Stmt>,
        span: Span,
    },
    /// Bare expression statement such as `a + 1;`
    Expr {
        expr: Expr,
        span: Span,
    },
}

impl Stmt {
    /// Get the span of this statement
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assignment { span, .. } => *span,
            Stmt::ModuleCall { span, .. } => *span,
            Stmt::ModuleDef { span, .. } => *span,
            Stmt::FunctionDef { span, .. } => *span,
            Stmt::If { span, .. } => *span,
            Stmt::Compound { span, .. } => *span,
            Stmt::Expr { span, .. } => *span,
        }
    }

    /// Short label used in traces
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Assignment { .. } => "assignment",
            Stmt::ModuleCall { .. } => "module call",
            Stmt::ModuleDef { .. } => "module definition",
            Stmt::FunctionDef { .. } => "function definition",
            Stmt::If { .. } => "if",
            Stmt::Compound { .. } => "compound",
            Stmt::Expr { .. } => "expression",
        }
    }
}
