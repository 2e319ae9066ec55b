//! Operator dispatch
//!
//! Binary operators are looked up by `(operator, left kind, right kind)` and
//! unary operators by `(operator, operand kind)`. A key with no registered
//! handler falls back instead of failing:
//! - `==`, `<`, `<=`, `>`, `>=` produce `false`
//! - `!=` produces `true`
//! - everything else produces `undef`
//!
//! `&&`, `||` and `!` are not table dispatched; they go through the shared
//! truthiness rule on [`Value::truthy`].

use super::errors::EvalError;
use super::value::{Value, ValueKind};
use crate::ast::{BinaryOp, UnaryOp};
use std::cmp::Ordering;
use std::collections::HashMap;

pub type BinaryFn = fn(&Value, &Value) -> Value;
pub type UnaryFn = fn(&Value) -> Value;

const COMPARISONS: [BinaryOp; 6] = [
    BinaryOp::Lt,
    BinaryOp::Le,
    BinaryOp::Gt,
    BinaryOp::Ge,
    BinaryOp::Eq,
    BinaryOp::Ne,
];

/// Kind pairs that have an ordering; booleans compare as 0 and 1
const ORDERED_PAIRS: [(ValueKind, ValueKind); 5] = [
    (ValueKind::Number, ValueKind::Number),
    (ValueKind::String, ValueKind::String),
    (ValueKind::Boolean, ValueKind::Boolean),
    (ValueKind::Number, ValueKind::Boolean),
    (ValueKind::Boolean, ValueKind::Number),
];

/// Kinds compared for equality by their rendered form
const RENDERED_KINDS: [ValueKind; 3] = [ValueKind::Vector, ValueKind::Range, ValueKind::Undefined];

#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    binary: HashMap<(BinaryOp, ValueKind, ValueKind), BinaryFn>,
    unary: HashMap<(UnaryOp, ValueKind), UnaryFn>,
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        let mut registry = Self {
            binary: HashMap::new(),
            unary: HashMap::new(),
        };

        let arithmetic_ops: [(BinaryOp, BinaryFn); 5] = [
            (BinaryOp::Add, |a, b| arithmetic(a, b, |x, y| x + y)),
            (BinaryOp::Sub, |a, b| arithmetic(a, b, |x, y| x - y)),
            (BinaryOp::Mul, |a, b| arithmetic(a, b, |x, y| x * y)),
            (BinaryOp::Div, |a, b| arithmetic(a, b, |x, y| x / y)),
            (BinaryOp::Mod, |a, b| arithmetic(a, b, |x, y| x % y)),
        ];
        for (op, handler) in arithmetic_ops {
            registry.register_binary(op, ValueKind::Number, ValueKind::Number, handler);
        }

        for (lhs, rhs) in ORDERED_PAIRS {
            for op in COMPARISONS {
                registry.register_binary(op, lhs, rhs, comparison(op));
            }
        }

        for kind in RENDERED_KINDS {
            registry.register_binary(BinaryOp::Eq, kind, kind, |a, b| {
                Value::Boolean(a.to_string() == b.to_string())
            });
            registry.register_binary(BinaryOp::Ne, kind, kind, |a, b| {
                Value::Boolean(a.to_string() != b.to_string())
            });
        }

        registry.register_unary(UnaryOp::Plus, ValueKind::Number, |v| v.clone());
        registry.register_unary(UnaryOp::Neg, ValueKind::Number, |v| match v {
            Value::Number(n) => Value::Number(-n),
            _ => Value::Undefined,
        });

        registry
    }
}

impl OperatorRegistry {
    pub fn register_binary(
        &mut self,
        op: BinaryOp,
        lhs: ValueKind,
        rhs: ValueKind,
        handler: BinaryFn,
    ) {
        self.binary.insert((op, lhs, rhs), handler);
    }

    pub fn register_unary(&mut self, op: UnaryOp, operand: ValueKind, handler: UnaryFn) {
        self.unary.insert((op, operand), handler);
    }

    /// Apply a binary operator to two evaluated operands
    pub fn binary(&self, op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
        match op {
            BinaryOp::And => return Ok(Value::Boolean(lhs.truthy()? & rhs.truthy()?)),
            BinaryOp::Or => return Ok(Value::Boolean(lhs.truthy()? | rhs.truthy()?)),
            _ => {}
        }

        match self.binary.get(&(op, lhs.kind(), rhs.kind())) {
            Some(handler) => Ok(handler(lhs, rhs)),
            None => Ok(binary_fallback(op)),
        }
    }

    /// Apply a unary operator to an evaluated operand
    pub fn unary(&self, op: UnaryOp, operand: &Value) -> Result<Value, EvalError> {
        if op == UnaryOp::Not {
            return Ok(Value::Boolean(!operand.truthy()?));
        }

        Ok(self
            .unary
            .get(&(op, operand.kind()))
            .map_or(Value::Undefined, |handler| handler(operand)))
    }
}

fn binary_fallback(op: BinaryOp) -> Value {
    match op {
        BinaryOp::Eq | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            Value::Boolean(false)
        }
        BinaryOp::Ne => Value::Boolean(true),
        _ => Value::Undefined,
    }
}

fn arithmetic(lhs: &Value, rhs: &Value, apply: fn(f64, f64) -> f64) -> Value {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Value::Number(apply(*a, *b)),
        _ => Value::Undefined,
    }
}

fn as_ordinal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn ordering(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => as_ordinal(lhs)?.partial_cmp(&as_ordinal(rhs)?),
    }
}

fn comparison(op: BinaryOp) -> BinaryFn {
    match op {
        BinaryOp::Lt => less,
        BinaryOp::Le => less_or_equal,
        BinaryOp::Gt => greater,
        BinaryOp::Ge => greater_or_equal,
        BinaryOp::Eq => equal,
        BinaryOp::Ne => not_equal,
        _ => undefined,
    }
}

fn less(lhs: &Value, rhs: &Value) -> Value {
    Value::Boolean(ordering(lhs, rhs) == Some(Ordering::Less))
}

fn less_or_equal(lhs: &Value, rhs: &Value) -> Value {
    Value::Boolean(matches!(ordering(lhs, rhs), Some(Ordering::Less | Ordering::Equal)))
}

fn greater(lhs: &Value, rhs: &Value) -> Value {
    Value::Boolean(ordering(lhs, rhs) == Some(Ordering::Greater))
}

fn greater_or_equal(lhs: &Value, rhs: &Value) -> Value {
    Value::Boolean(matches!(ordering(lhs, rhs), Some(Ordering::Greater | Ordering::Equal)))
}

fn equal(lhs: &Value, rhs: &Value) -> Value {
    Value::Boolean(ordering(lhs, rhs) == Some(Ordering::Equal))
}

fn not_equal(lhs: &Value, rhs: &Value) -> Value {
    Value::Boolean(ordering(lhs, rhs) != Some(Ordering::Equal))
}

fn undefined(_: &Value, _: &Value) -> Value {
    Value::Undefined
}
