use super::{interpret, root_value};
use pretty_assertions::assert_eq;
use scad_core::ast::Stmt;
use scad_core::runtime::Module;
use scad_core::{Value, compile};

#[test]
fn test_last_assignment_wins() {
    let source = "t1=100;t2=t1;t2=2*t1;t1=200;";
    assert_eq!(root_value(source, "t1"), Value::Number(200.0));
    assert_eq!(root_value(source, "t2"), Value::Number(400.0));
}

#[test]
fn test_hoisted_order() {
    let statements = compile("a = 1; echo(a); b = 2; a = 3;").unwrap();
    let shape: Vec<_> = statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Assignment { target, .. } => target.clone(),
            other => other.kind_name().to_string(),
        })
        .collect();
    assert_eq!(shape, vec!["a", "module call", "b"]);
}

#[test]
fn test_reassignment_uses_final_value_everywhere() {
    let (runtime, _) = interpret("a = 1; echo(a); a = 3;");
    assert_eq!(runtime.get_identifier("a"), Value::Number(3.0));
}

#[test]
fn test_module_definition_hoisting() {
    let (runtime, _) = interpret("module m1(a) {} module m1(x, y, z) {}");
    match runtime.scopes().lookup_module(runtime.root(), "m1") {
        Some(Module::Defined(definition)) => {
            let params: Vec<_> = definition.params.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(params, vec!["x", "y", "z"]);
        }
        other => panic!("expected a module definition, got {other:?}"),
    }

    let statements = compile("module m1(a) {} module m1(x, y, z) {}").unwrap();
    assert_eq!(statements.len(), 1);
}

#[test]
fn test_function_definition_hoisting() {
    let statements = compile("function f(a) = a; function f(b, c) = b + c;").unwrap();
    match statements.as_slice() {
        [Stmt::FunctionDef { params, .. }] => assert_eq!(params.len(), 2),
        other => panic!("expected one function definition, got {other:?}"),
    }
}

#[test]
fn test_namespaces_hoist_independently() {
    let statements = compile("x = 1; module x() {} function x() = 1; x = 2;").unwrap();
    let kinds: Vec<_> = statements.iter().map(Stmt::kind_name).collect();
    assert_eq!(
        kinds,
        vec!["assignment", "module definition", "function definition"]
    );
}

#[test]
fn test_nested_blocks_are_not_hoisted() {
    let (runtime, _) = interpret("if (true) { a = 1; b = a; a = 2; echo(b); }");
    let queued = runtime.deferred();
    assert_eq!(
        runtime.scopes().get_var(queued[0].scope, "b"),
        Value::Number(1.0)
    );
}
