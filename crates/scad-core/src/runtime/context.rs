//! Lexical scope chain
//!
//! Contexts live in an arena owned by the runtime and refer to their parent
//! by index. Each context holds three independent namespaces:
//! - variables, bound by assignments
//! - modules, holding natives and `module` definitions
//! - functions, holding `function` definitions
//!
//! Writes only ever touch the addressed context, so a child shadows its
//! parent and never overwrites it. A lookup that misses all the way up to the
//! root logs one warning and degrades to `undef`.

use super::natives::Native;
use super::value::Value;
use crate::ast::{Expr, Parameter, Span, Stmt};
use crate::logger::Logger;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a context, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    fn next() -> Self {
        ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a context inside its [`Scopes`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeRef(usize);

/// A `module name(params) body` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDefinition {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: Stmt,
    pub span: Span,
}

/// A `function name(params) = body;` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: Expr,
    pub span: Span,
}

/// Entry of the module namespace
#[derive(Debug, Clone, PartialEq)]
pub enum Module {
    Native(Native),
    Defined(Rc<ModuleDefinition>),
}

#[derive(Debug)]
struct Context {
    id: ContextId,
    parent: Option<ScopeRef>,
    variables: HashMap<String, Value>,
    modules: HashMap<String, Module>,
    functions: HashMap<String, Rc<FunctionDefinition>>,
}

/// Arena of contexts linked by parent index
#[derive(Debug)]
pub struct Scopes {
    contexts: Vec<Context>,
    logger: Logger,
}

impl Scopes {
    pub fn new(logger: Logger) -> Self {
        Self {
            contexts: Vec::new(),
            logger,
        }
    }

    /// Create an empty context with a fresh id
    pub fn create(&mut self, parent: Option<ScopeRef>) -> ScopeRef {
        let scope = ScopeRef(self.contexts.len());
        self.contexts.push(Context {
            id: ContextId::next(),
            parent,
            variables: HashMap::new(),
            modules: HashMap::new(),
            functions: HashMap::new(),
        });
        scope
    }

    fn context(&self, scope: ScopeRef) -> &Context {
        &self.contexts[scope.0]
    }

    fn context_mut(&mut self, scope: ScopeRef) -> &mut Context {
        &mut self.contexts[scope.0]
    }

    pub fn id(&self, scope: ScopeRef) -> ContextId {
        self.context(scope).id
    }

    pub fn parent(&self, scope: ScopeRef) -> Option<ScopeRef> {
        self.context(scope).parent
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Walk from `scope` to the root, returning the first binding `select` finds
    fn lookup<'s, T>(
        &'s self,
        scope: ScopeRef,
        select: impl Fn(&'s Context) -> Option<&'s T>,
    ) -> Option<&'s T> {
        let mut current = Some(scope);
        while let Some(scope) = current {
            let context = self.context(scope);
            if let Some(found) = select(context) {
                return Some(found);
            }
            current = context.parent;
        }
        None
    }

    pub fn set_var(&mut self, scope: ScopeRef, name: impl Into<String>, value: Value) {
        self.context_mut(scope).variables.insert(name.into(), value);
    }

    pub fn lookup_var(&self, scope: ScopeRef, name: &str) -> Option<&Value> {
        self.lookup(scope, |context| context.variables.get(name))
    }

    pub fn get_var(&self, scope: ScopeRef, name: &str) -> Value {
        match self.lookup_var(scope, name) {
            Some(value) => value.clone(),
            None => {
                self.logger
                    .warn(format!("Ignoring unknown variable '{name}'."));
                Value::Undefined
            }
        }
    }

    pub fn set_module(&mut self, scope: ScopeRef, name: impl Into<String>, module: Module) {
        self.context_mut(scope).modules.insert(name.into(), module);
    }

    pub fn lookup_module(&self, scope: ScopeRef, name: &str) -> Option<&Module> {
        self.lookup(scope, |context| context.modules.get(name))
    }

    pub fn get_module(&self, scope: ScopeRef, name: &str) -> Option<Module> {
        let module = self.lookup_module(scope, name).cloned();
        if module.is_none() {
            self.logger.warn(format!("Ignoring unknown module '{name}'."));
        }
        module
    }

    pub fn set_function(
        &mut self,
        scope: ScopeRef,
        name: impl Into<String>,
        function: Rc<FunctionDefinition>,
    ) {
        self.context_mut(scope)
            .functions
            .insert(name.into(), function);
    }

    pub fn lookup_function(&self, scope: ScopeRef, name: &str) -> Option<&Rc<FunctionDefinition>> {
        self.lookup(scope, |context| context.functions.get(name))
    }

    pub fn get_function(&self, scope: ScopeRef, name: &str) -> Option<Rc<FunctionDefinition>> {
        let function = self.lookup_function(scope, name).cloned();
        if function.is_none() {
            self.logger
                .warn(format!("Ignoring unknown function '{name}'."));
        }
        function
    }
}
