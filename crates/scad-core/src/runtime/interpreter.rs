//! Statement walker
//!
//! [`Runner`] walks the statement tree depth first with an explicit work
//! stack and yields once per executed statement. Compound statements and `if`
//! only schedule more work, so they never yield on their own.

use super::context::{ContextId, FunctionDefinition, Module, ModuleDefinition, ScopeRef};
use super::errors::EvalError;
use super::{DeferredCall, Runtime};
use crate::ast::{Span, Stmt};
use std::rc::Rc;

/// One executed statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub kind: &'static str,
    pub span: Span,
    /// Context the statement ran in
    pub context: ContextId,
}

enum Work<'a> {
    Stmt(&'a Stmt),
    /// Put back the pin that was active before a branch scope was entered
    Restore(Option<ScopeRef>),
}

pub struct Runner<'a> {
    runtime: &'a mut Runtime,
    work: Vec<Work<'a>>,
    failed: bool,
}

impl<'a> Runner<'a> {
    pub fn new(statements: &'a [Stmt], runtime: &'a mut Runtime) -> Self {
        Self {
            runtime,
            work: statements.iter().rev().map(Work::Stmt).collect(),
            failed: false,
        }
    }

    fn schedule(&mut self, statements: &'a [Stmt]) {
        self.work.extend(statements.iter().rev().map(Work::Stmt));
    }

    fn step(&self, stmt: &Stmt) -> Step {
        let step = Step {
            kind: stmt.kind_name(),
            span: stmt.span(),
            context: self.runtime.scopes().id(self.runtime.current_scope()),
        };
        tracing::debug!(
            kind = step.kind,
            start = step.span.start,
            end = step.span.end,
            context = %step.context,
            "step"
        );
        step
    }

    fn visit(&mut self, stmt: &'a Stmt) -> Result<Option<Step>, EvalError> {
        match stmt {
            Stmt::Compound { statements, .. } => {
                self.schedule(statements);
                Ok(None)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let taken = self
                    .runtime
                    .evaluate(condition)?
                    .truthy()
                    .map_err(|err| err.at(condition.span()))?;
                let branch = if taken {
                    Some(then_branch.as_ref())
                } else {
                    else_branch.as_deref()
                };

                if let Some(branch) = branch {
                    let scope = self.runtime.child_scope();
                    let previous = self.runtime.pin(Some(scope));
                    self.work.push(Work::Restore(previous));
                    self.work.push(Work::Stmt(branch));
                }
                Ok(None)
            }

            Stmt::Assignment { target, value, .. } => {
                let value = self.runtime.evaluate(value)?;
                self.runtime.set_identifier(target.as_str(), value);
                Ok(Some(self.step(stmt)))
            }

            Stmt::ModuleCall {
                name,
                arguments,
                span,
            } => {
                let scope = self.runtime.current_scope();
                match self.runtime.scopes().get_module(scope, name) {
                    Some(Module::Native(native)) => {
                        self.runtime.defer(DeferredCall {
                            native,
                            scope,
                            arguments: arguments.clone(),
                            span: *span,
                        });
                        Ok(Some(self.step(stmt)))
                    }
                    Some(Module::Defined(_)) | None => {
                        Err(EvalError::not_implemented("module", name.clone(), *span))
                    }
                }
            }

            Stmt::ModuleDef {
                name,
                params,
                body,
                span,
            } => {
                let scope = self.runtime.current_scope();
                let definition = ModuleDefinition {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.as_ref().clone(),
                    span: *span,
                };
                self.runtime.scopes_mut().set_module(
                    scope,
                    name.as_str(),
                    Module::Defined(Rc::new(definition)),
                );
                Ok(Some(self.step(stmt)))
            }

            Stmt::FunctionDef {
                name,
                params,
                body,
                span,
            } => {
                let scope = self.runtime.current_scope();
                let definition = FunctionDefinition {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                    span: *span,
                };
                self.runtime
                    .scopes_mut()
                    .set_function(scope, name.as_str(), Rc::new(definition));
                Ok(Some(self.step(stmt)))
            }

            Stmt::Expr { .. } => {
                tracing::debug!("expression statement skipped");
                Ok(Some(self.step(stmt)))
            }
        }
    }

    /// Abandon remaining work, restoring the pin from before the outermost
    /// open branch
    fn abort(&mut self) {
        self.failed = true;
        let outermost = self.work.drain(..).find_map(|work| match work {
            Work::Restore(previous) => Some(previous),
            Work::Stmt(_) => None,
        });
        if let Some(previous) = outermost {
            self.runtime.pin(previous);
        }
    }
}

impl Iterator for Runner<'_> {
    type Item = Result<Step, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(work) = self.work.pop() {
            match work {
                Work::Restore(previous) => {
                    self.runtime.pin(previous);
                }
                Work::Stmt(stmt) => match self.visit(stmt) {
                    Ok(Some(step)) => return Some(Ok(step)),
                    Ok(None) => {}
                    Err(err) => {
                        self.abort();
                        return Some(Err(err));
                    }
                },
            }
        }
        None
    }
}

/// Execute `statements` to completion or until the first error.
///
/// Bindings made before a failing statement stay in place. Queued module
/// calls are not executed; see [`Runtime::execute_deferred`].
pub fn run(statements: &[Stmt], runtime: &mut Runtime) -> Result<(), EvalError> {
    Runner::new(statements, runtime).try_for_each(|step| step.map(|_| ()))
}
