//! Compile and run a SCAD source file in one go
//!
//! ```
//! # use scad_core::Pipeline;
//! let pipeline = Pipeline::new("x = 1 + 2; echo(x);".to_string(), "example.scad".to_string());
//!
//! match pipeline.run_all() {
//!     Ok(logger) => assert_eq!(logger.logs(), vec!["ECHO: 3"]),
//!     Err(e) => eprintln!("{}", pipeline.render(&e)),
//! }
//! ```
//!
//! The stages can also be driven one at a time:
//!
//! ```
//! # use scad_core::Pipeline;
//! let pipeline = Pipeline::new("a = 1;".to_string(), "example.scad".to_string());
//! let statements = pipeline.compile()?;
//! let mut runtime = pipeline.runtime();
//! pipeline.interpret(&statements, &mut runtime)?;
//! pipeline.execute_deferred(&mut runtime)?;
//! # Ok::<(), scad_core::PipelineError>(())
//! ```

use crate::ast::Stmt;
use crate::config::RuntimeConfig;
use crate::diagnostics::Diagnostic;
use crate::logger::Logger;
use crate::parser::{self, CompileError};
use crate::runtime::{EvalError, Runtime, run};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl PipelineError {
    pub fn to_diagnostic(&self, filename: &str) -> Diagnostic {
        match self {
            PipelineError::Compile(err) => err.to_diagnostic(filename),
            PipelineError::Eval(err) => err.to_diagnostic(filename),
        }
    }

    /// Format error for display to user
    pub fn format_display(&self) -> String {
        match self {
            PipelineError::Compile(err) => format!("parse error: {err}"),
            PipelineError::Eval(err) => err.format_display(),
        }
    }

    /// Format error with source code context
    pub fn format_with_source(&self, source: &str) -> String {
        self.to_diagnostic("<input>").format(source)
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

pub struct Pipeline {
    source: String,
    filename: String,
    config: RuntimeConfig,
    logger: Logger,
}

impl Pipeline {
    pub fn new(source: String, filename: String) -> Self {
        Self::with_config(source, filename, RuntimeConfig::default())
    }

    pub fn with_config(source: String, filename: String, config: RuntimeConfig) -> Self {
        Pipeline {
            source,
            filename,
            config,
            logger: Logger::new(),
        }
    }

    /// Tokenize, parse, normalize and hoist the source
    pub fn compile(&self) -> PipelineResult<Vec<Stmt>> {
        parser::compile(&self.source).map_err(|err| {
            self.logger.error(err.to_string());
            PipelineError::Compile(err)
        })
    }

    /// A fresh runtime that logs into this pipeline's logger
    pub fn runtime(&self) -> Runtime {
        Runtime::with_config(self.logger.clone(), &self.config)
    }

    /// Walk the statements, binding names and queueing module calls
    pub fn interpret(&self, statements: &[Stmt], runtime: &mut Runtime) -> PipelineResult<()> {
        run(statements, runtime).map_err(|err| self.fail(err))
    }

    /// Post-pass: run the queued module calls
    pub fn execute_deferred(&self, runtime: &mut Runtime) -> PipelineResult<()> {
        runtime.execute_deferred().map_err(|err| self.fail(err))
    }

    /// Execute the complete pipeline: compile → interpret → deferred calls.
    ///
    /// Returns the logger holding the run's output. A failing stage also
    /// records its error in the logger before it is returned.
    pub fn run_all(&self) -> PipelineResult<Logger> {
        let statements = self.compile()?;
        let mut runtime = self.runtime();
        self.interpret(&statements, &mut runtime)?;
        self.execute_deferred(&mut runtime)?;
        tracing::debug!(
            filename = %self.filename,
            entries = self.logger.entries().len(),
            "pipeline finished"
        );
        Ok(self.logger.clone())
    }

    fn fail(&self, err: EvalError) -> PipelineError {
        self.logger.error(err.to_string());
        PipelineError::Eval(err)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Render an error against this pipeline's source and filename
    pub fn render(&self, err: &PipelineError) -> String {
        err.to_diagnostic(&self.filename).format(&self.source)
    }
}
