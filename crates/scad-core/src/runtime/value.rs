use super::errors::EvalError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `[start : step : end]`; `two_part` records that the step was not written
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeValue {
    pub start: f64,
    pub step: f64,
    pub end: f64,
    pub two_part: bool,
}

/// Result of evaluating an expression. Values are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Undefined,
    Vector(Vec<Value>),
    Range(RangeValue),
}

/// Discriminant of a [`Value`], used as the operator dispatch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    String,
    Boolean,
    Undefined,
    Vector,
    Range,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Undefined => "undef",
            ValueKind::Vector => "vector",
            ValueKind::Range => "range",
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Undefined => ValueKind::Undefined,
            Value::Vector(_) => ValueKind::Vector,
            Value::Range(_) => ValueKind::Range,
        }
    }

    /// Shared truthiness rule used by `!`, `&&`, `||`, `if` and `?:`.
    ///
    /// A range has no truth value and is reported as an error.
    pub fn truthy(&self) -> Result<bool, EvalError> {
        match self {
            Value::Undefined => Ok(false),
            Value::Boolean(b) => Ok(*b),
            Value::Number(n) => Ok(*n != 0.0),
            Value::String(s) => Ok(!s.is_empty()),
            Value::Vector(elements) => Ok(!elements.is_empty()),
            Value::Range(_) => Err(EvalError::Coercion {
                from: ValueKind::Range.as_str(),
                to: ValueKind::Boolean.as_str(),
                span: None,
            }),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Render a number the way `printf("%g")` does: six significant digits,
/// trailing zeros trimmed, scientific notation outside `1e-4 ..= 1e6`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        return if n.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{n:.5e}");
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m.to_string(), e)))
    else {
        return n.to_string();
    };

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(&mantissa), exponent.abs())
    } else {
        let decimals = (5 - exponent).max(0) as usize;
        trim_zeros(&format!("{n:.decimals$}")).to_string()
    }
}

fn trim_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Undefined => write!(f, "undef"),
            Value::Vector(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Value::Range(range) => write!(
                f,
                "[{} : {} : {}]",
                format_number(range.start),
                format_number(range.step),
                format_number(range.end)
            ),
        }
    }
}
