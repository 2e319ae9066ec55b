//! Front end and tree-walking evaluator for a subset of the OpenSCAD language
//!
//! [`compile`] turns source text into a hoisted statement list, [`run`] walks
//! it against a [`Runtime`], and [`Runtime::execute_deferred`] performs the
//! queued module calls. [`Pipeline`] bundles the three.

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod logger;
pub mod parser;
pub mod pipeline;
pub mod runtime;

pub use config::{ConfigError, RuntimeConfig};
pub use logger::{LogEntry, LogLevel, Logger};
pub use parser::{CompileError, compile, tokenize};
pub use pipeline::{Pipeline, PipelineError, PipelineResult};
pub use runtime::{EvalError, Runtime, Value, run};
