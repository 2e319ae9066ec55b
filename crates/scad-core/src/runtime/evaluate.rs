//! Expression evaluation
//!
//! Operands are evaluated strictly left to right before an operator is
//! applied, `&&` and `||` included. Only `?:` skips work: it evaluates the
//! branch its condition selects.

use super::Runtime;
use super::context::ScopeRef;
use super::errors::EvalError;
use super::natives::ResolvedArgument;
use super::value::{RangeValue, Value};
use crate::ast::{CallArgument, Expr, Literal};

/// Evaluate `expr` with names resolved from `scope`
pub fn evaluate(runtime: &Runtime, scope: ScopeRef, expr: &Expr) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal { value, .. } => Ok(literal(value)),

        Expr::Identifier { name, .. } => Ok(runtime.scopes().get_var(scope, name)),

        Expr::Vector { elements, .. } => elements
            .iter()
            .map(|element| evaluate(runtime, scope, element))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Vector),

        Expr::Range {
            start, step, end, ..
        } => {
            let start = evaluate(runtime, scope, start)?;
            let step = step
                .as_deref()
                .map(|step| evaluate(runtime, scope, step))
                .transpose()?;
            let end = evaluate(runtime, scope, end)?;
            Ok(range(&start, step.as_ref(), &end))
        }

        Expr::Unary { op, operand, span } => {
            let operand = evaluate(runtime, scope, operand)?;
            runtime
                .operators()
                .unary(*op, &operand)
                .map_err(|err| err.at(*span))
        }

        Expr::Binary {
            left,
            op,
            right,
            span,
        } => {
            let lhs = evaluate(runtime, scope, left)?;
            let rhs = evaluate(runtime, scope, right)?;
            runtime
                .operators()
                .binary(*op, &lhs, &rhs)
                .map_err(|err| err.at(*span))
        }

        Expr::Conditional {
            condition,
            then_expr,
            else_expr,
            ..
        } => {
            let chosen = if evaluate(runtime, scope, condition)?
                .truthy()
                .map_err(|err| err.at(condition.span()))?
            {
                then_expr
            } else {
                else_expr
            };
            evaluate(runtime, scope, chosen)
        }

        Expr::Index { object, index, .. } => {
            let object = evaluate(runtime, scope, object)?;
            let index = evaluate(runtime, scope, index)?;
            Ok(index_into(object, &index))
        }

        Expr::Call {
            name,
            arguments,
            span,
        } => {
            if runtime.scopes().lookup_function(scope, name).is_some() {
                return Err(EvalError::not_implemented("function", name.clone(), *span));
            }
            resolve_arguments(runtime, scope, arguments)?;
            runtime.scopes().get_function(scope, name);
            Ok(Value::Undefined)
        }
    }
}

/// Evaluate call arguments in order, keeping the names of named ones
pub fn resolve_arguments(
    runtime: &Runtime,
    scope: ScopeRef,
    arguments: &[CallArgument],
) -> Result<Vec<ResolvedArgument>, EvalError> {
    arguments
        .iter()
        .map(|argument| {
            let name = match argument {
                CallArgument::Named { name, .. } => Some(name.clone()),
                CallArgument::Positional(_) => None,
            };
            Ok(ResolvedArgument {
                name,
                value: evaluate(runtime, scope, argument.value())?,
            })
        })
        .collect()
}

fn literal(literal: &Literal) -> Value {
    match literal {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(s.clone()),
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Undef => Value::Undefined,
    }
}

fn range(start: &Value, step: Option<&Value>, end: &Value) -> Value {
    let two_part = step.is_none();
    let step = step.map_or(Some(1.0), Value::as_number);
    match (start.as_number(), step, end.as_number()) {
        (Some(start), Some(step), Some(end)) => Value::Range(RangeValue {
            start,
            step,
            end,
            two_part,
        }),
        _ => Value::Undefined,
    }
}

fn index_into(object: Value, index: &Value) -> Value {
    let Some(position) = index.as_number().map(f64::floor) else {
        return Value::Undefined;
    };
    if position.is_nan() || position < 0.0 {
        return Value::Undefined;
    }
    let position = position as usize;

    match object {
        Value::Vector(mut elements) if position < elements.len() => elements.swap_remove(position),
        Value::String(text) => text
            .chars()
            .nth(position)
            .map_or(Value::Undefined, |c| Value::String(c.to_string())),
        _ => Value::Undefined,
    }
}
