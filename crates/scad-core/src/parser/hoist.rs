//! Deduplication of repeated top-level declarations
//!
//! When a name is assigned (or a module/function declared) more than once at top
//! level, only the lexically last declaration survives. It takes the slot of the
//! first one, so everything between them already sees the final binding:
//!
//! ```text
//! t1 = 100; t2 = t1; t2 = 2 * t1; t1 = 200;
//! // becomes
//! t1 = 200; t2 = 2 * t1;
//! ```
//!
//! Nested compound statements and branches are left alone.

use crate::ast::Stmt;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Namespace {
    Variable,
    Module,
    Function,
}

fn declared_name(stmt: &Stmt) -> Option<(Namespace, &str)> {
    match stmt {
        Stmt::Assignment { target, .. } => Some((Namespace::Variable, target)),
        Stmt::ModuleDef { name, .. } => Some((Namespace::Module, name)),
        Stmt::FunctionDef { name, .. } => Some((Namespace::Function, name)),
        _ => None,
    }
}

/// Hoist a top-level statement list
pub fn hoist(statements: Vec<Stmt>) -> Vec<Stmt> {
    let mut slots: HashMap<(Namespace, String), usize> = HashMap::new();
    let mut hoisted: Vec<Stmt> = Vec::with_capacity(statements.len());

    for stmt in statements {
        let key = declared_name(&stmt).map(|(ns, name)| (ns, name.to_string()));
        match key {
            Some(key) => match slots.get(&key) {
                Some(&slot) => {
                    tracing::trace!(name = %key.1, slot, "later declaration replaces earlier one");
                    hoisted[slot] = stmt;
                }
                None => {
                    slots.insert(key, hoisted.len());
                    hoisted.push(stmt);
                }
            },
            None => hoisted.push(stmt),
        }
    }

    hoisted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn targets(statements: &[Stmt]) -> Vec<String> {
        statements
            .iter()
            .map(|s| match s {
                Stmt::Assignment { target, .. } => target.clone(),
                Stmt::ModuleDef { name, .. } => format!("module {name}"),
                Stmt::FunctionDef { name, .. } => format!("function {name}"),
                other => other.kind_name().to_string(),
            })
            .collect()
    }

    #[test]
    fn test_last_assignment_takes_first_slot() {
        let statements = parse_source("t1=100;t2=t1;t2=2*t1;t1=200;").expect("parses");
        let hoisted = hoist(statements);
        assert_eq!(targets(&hoisted), vec!["t1", "t2"]);
        match &hoisted[0] {
            Stmt::Assignment { token, .. } => assert_eq!(token.offset, 21),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_distinct_statements_keep_order() {
        let statements =
            parse_source("a=1; echo(a); b=2; module m() {} a=3; c=4;").expect("parses");
        let hoisted = hoist(statements);
        assert_eq!(
            targets(&hoisted),
            vec!["a", "module call", "b", "module m", "c"]
        );
    }

    #[test]
    fn test_namespaces_are_separate() {
        let statements =
            parse_source("m=1; module m() {} function m() = 2; module m(x) {}").expect("parses");
        let hoisted = hoist(statements);
        assert_eq!(targets(&hoisted), vec!["m", "module m", "function m"]);
        match &hoisted[1] {
            Stmt::ModuleDef { params, .. } => assert_eq!(params[0].name, "x"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nested_blocks_are_not_hoisted() {
        let statements = parse_source("{ a=1; a=2; }").expect("parses");
        let hoisted = hoist(statements);
        match &hoisted[0] {
            Stmt::Compound { statements, .. } => assert_eq!(statements.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
