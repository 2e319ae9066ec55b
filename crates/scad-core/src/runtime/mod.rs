//! Tree-walking runtime
//!
//! The [`Runtime`] owns everything a run mutates:
//! - the scope arena and the stack of active scopes
//! - an optional pinned scope that overrides the top of the stack
//! - the operator table
//! - the queue of deferred native module calls
//! - the [`Logger`] handle
//!
//! Interpretation only binds names and queues module calls. Natives run in a
//! separate post-pass, [`Runtime::execute_deferred`], once the walk is done.

mod context;
mod errors;
mod evaluate;
mod interpreter;
mod natives;
mod operators;
mod value;

pub use context::{
    ContextId, FunctionDefinition, Module, ModuleDefinition, ScopeRef, Scopes,
};
pub use errors::EvalError;
pub use evaluate::{evaluate, resolve_arguments};
pub use interpreter::{Runner, Step, run};
pub use natives::{Native, ResolvedArgument};
pub use operators::{BinaryFn, OperatorRegistry, UnaryFn};
pub use value::{RangeValue, Value, ValueKind, format_number};

use crate::ast::{CallArgument, Expr, Span};
use crate::config::RuntimeConfig;
use crate::logger::Logger;

/// A native module call captured during interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredCall {
    pub native: Native,
    /// Scope active at the call site; arguments are resolved against it
    pub scope: ScopeRef,
    pub arguments: Vec<CallArgument>,
    pub span: Span,
}

#[derive(Debug)]
pub struct Runtime {
    scopes: Scopes,
    root: ScopeRef,
    stack: Vec<ScopeRef>,
    pin: Option<ScopeRef>,
    operators: OperatorRegistry,
    queue: Vec<DeferredCall>,
    logger: Logger,
}

impl Runtime {
    pub fn new(logger: Logger) -> Self {
        Self::with_config(logger, &RuntimeConfig::default())
    }

    pub fn with_config(logger: Logger, config: &RuntimeConfig) -> Self {
        let mut scopes = Scopes::new(logger.clone());
        let root = scopes.create(None);

        for native in &config.builtins {
            scopes.set_module(root, native.name(), Module::Native(*native));
        }
        for (name, value) in &config.variables {
            scopes.set_var(root, name.as_str(), Value::Number(*value));
        }

        tracing::debug!(
            builtins = config.builtins.len(),
            variables = config.variables.len(),
            "runtime created"
        );

        Self {
            scopes,
            root,
            stack: vec![root],
            pin: None,
            operators: OperatorRegistry::default(),
            queue: Vec::new(),
            logger,
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut Scopes {
        &mut self.scopes
    }

    pub fn operators(&self) -> &OperatorRegistry {
        &self.operators
    }

    pub fn root(&self) -> ScopeRef {
        self.root
    }

    /// The pinned scope if there is one, otherwise the top of the stack
    pub fn current_scope(&self) -> ScopeRef {
        self.pin
            .or_else(|| self.stack.last().copied())
            .unwrap_or(self.root)
    }

    /// Open a child of the current scope and make it the top of the stack
    pub fn push_scope(&mut self) -> ScopeRef {
        let scope = self.scopes.create(Some(self.current_scope()));
        self.stack.push(scope);
        scope
    }

    /// Leave the innermost pushed scope; the root is never popped
    pub fn pop_scope(&mut self) -> Option<ScopeRef> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Pin `scope` as current without touching the stack, returning the
    /// previous pin so the caller can restore it
    pub fn pin(&mut self, scope: Option<ScopeRef>) -> Option<ScopeRef> {
        std::mem::replace(&mut self.pin, scope)
    }

    /// Create a child of the current scope without activating it
    pub fn child_scope(&mut self) -> ScopeRef {
        let parent = self.current_scope();
        self.scopes.create(Some(parent))
    }

    pub fn set_identifier(&mut self, name: impl Into<String>, value: Value) {
        let scope = self.current_scope();
        self.scopes.set_var(scope, name, value);
    }

    pub fn get_identifier(&self, name: &str) -> Value {
        self.scopes.get_var(self.current_scope(), name)
    }

    /// Evaluate an expression in the current scope
    pub fn evaluate(&self, expr: &Expr) -> Result<Value, EvalError> {
        evaluate(self, self.current_scope(), expr)
    }

    pub fn defer(&mut self, call: DeferredCall) {
        tracing::trace!(native = call.native.name(), "deferred module call");
        self.queue.push(call);
    }

    pub fn deferred(&self) -> &[DeferredCall] {
        &self.queue
    }

    /// Run every queued native call in order, each in the scope it captured.
    ///
    /// The queue is drained so each call runs once. The pin in place before
    /// the post-pass is restored afterwards, also on error.
    pub fn execute_deferred(&mut self) -> Result<(), EvalError> {
        let calls = std::mem::take(&mut self.queue);
        tracing::debug!(calls = calls.len(), "executing deferred module calls");

        let previous = self.pin(None);
        let result = calls.iter().try_for_each(|call| {
            self.pin(Some(call.scope));
            let arguments = resolve_arguments(self, call.scope, &call.arguments)?;
            call.native.invoke(self, &arguments);
            Ok(())
        });
        self.pin(previous);
        result
    }
}
