//! Built-in modules
//!
//! Natives are invoked by the deferred post-pass with their arguments
//! already resolved against the scope captured at the call site.

use super::Runtime;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Native {
    /// Logs its arguments as one `ECHO: ` line
    Echo,
    /// Placeholder primitive; resolves its arguments and builds nothing
    Cube,
}

/// An argument value paired with its name when passed as `name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgument {
    pub name: Option<String>,
    pub value: Value,
}

impl fmt::Display for ResolvedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} = {}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

impl Native {
    pub const ALL: [Native; 2] = [Native::Echo, Native::Cube];

    pub fn name(&self) -> &'static str {
        match self {
            Native::Echo => "echo",
            Native::Cube => "cube",
        }
    }

    pub fn invoke(&self, runtime: &mut Runtime, arguments: &[ResolvedArgument]) {
        match self {
            Native::Echo => echo(runtime, arguments),
            Native::Cube => {
                tracing::debug!(arguments = ?arguments, "cube: geometry is not generated");
            }
        }
    }
}

fn echo(runtime: &Runtime, arguments: &[ResolvedArgument]) {
    let rendered: Vec<String> = arguments.iter().map(ToString::to_string).collect();
    runtime.logger().log(format!("ECHO: {}", rendered.join(", ")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;

    fn positional(value: Value) -> ResolvedArgument {
        ResolvedArgument { name: None, value }
    }

    #[test]
    fn test_echo_joins_arguments() {
        let logger = Logger::new();
        let mut runtime = Runtime::new(logger.clone());
        Native::Echo.invoke(
            &mut runtime,
            &[
                positional(Value::Number(1.0)),
                positional(Value::String("two".to_string())),
                ResolvedArgument {
                    name: Some("three".to_string()),
                    value: Value::Boolean(true),
                },
            ],
        );
        assert_eq!(logger.logs(), vec![r#"ECHO: 1, "two", three = true"#]);
    }

    #[test]
    fn test_echo_without_arguments() {
        let logger = Logger::new();
        let mut runtime = Runtime::new(logger.clone());
        Native::Echo.invoke(&mut runtime, &[]);
        assert_eq!(logger.logs(), vec!["ECHO: "]);
    }

    #[test]
    fn test_cube_logs_nothing() {
        let logger = Logger::new();
        let mut runtime = Runtime::new(logger.clone());
        Native::Cube.invoke(&mut runtime, &[positional(Value::Number(10.0))]);
        assert!(logger.is_empty());
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = Native::ALL.iter().map(Native::name).collect();
        assert_eq!(names, vec!["echo", "cube"]);
    }
}
