use super::{interpret, root_value};
use scad_core::Value;
use scad_core::runtime::{Scopes, Step, Runner};
use scad_core::{Logger, Runtime, compile};

#[test]
fn test_assignment_binds_in_root() {
    assert_eq!(root_value("a = 3 * 2;", "a"), Value::Number(6.0));
    assert_eq!(root_value("b = 1; a = b + 1;", "a"), Value::Number(2.0));
}

#[test]
fn test_child_scope_shadows_parent() {
    let logger = Logger::new();
    let mut scopes = Scopes::new(logger.clone());
    let root = scopes.create(None);
    let child = scopes.create(Some(root));

    scopes.set_var(root, "x", Value::Number(1.0));
    scopes.set_var(child, "x", Value::Number(2.0));

    assert_eq!(scopes.get_var(child, "x"), Value::Number(2.0));
    assert_eq!(scopes.get_var(root, "x"), Value::Number(1.0));
    assert!(logger.is_empty());
}

#[test]
fn test_if_branch_does_not_leak() {
    let (runtime, logger) = interpret("x = 1; if (x) { x = 2; y = 3; }");
    assert_eq!(runtime.get_identifier("x"), Value::Number(1.0));
    assert_eq!(runtime.get_identifier("y"), Value::Undefined);
    assert_eq!(logger.warnings(), vec!["Ignoring unknown variable 'y'."]);
}

#[test]
fn test_else_branch() {
    let (runtime, _) = interpret("x = 0; if (x) y = 1; else { z = x + 5; echo(z); }");
    let queued = runtime.deferred();
    assert_eq!(queued.len(), 1);
    assert_eq!(runtime.scopes().get_var(queued[0].scope, "z"), Value::Number(5.0));
}

#[test]
fn test_nested_branches_read_outer_bindings() {
    let (runtime, logger) = interpret(
        "a = 1;
         if (true) {
             b = a + 1;
             if (b == 2) {
                 c = a + b;
                 echo(c);
             }
         }",
    );
    let queued = runtime.deferred();
    assert_eq!(queued.len(), 1);
    assert_eq!(runtime.scopes().get_var(queued[0].scope, "c"), Value::Number(3.0));
    assert!(logger.is_empty());
}

#[test]
fn test_unknown_identifier_warns_each_lookup() {
    let (runtime, logger) = interpret("");
    assert_eq!(runtime.get_identifier("missing"), Value::Undefined);
    assert_eq!(runtime.get_identifier("missing"), Value::Undefined);
    assert_eq!(
        logger.warnings(),
        vec![
            "Ignoring unknown variable 'missing'.",
            "Ignoring unknown variable 'missing'."
        ]
    );
}

#[test]
fn test_unknown_identifier_in_expression() {
    let (runtime, logger) = interpret("a = missing;");
    assert_eq!(runtime.get_identifier("a"), Value::Undefined);
    assert_eq!(logger.warnings(), vec!["Ignoring unknown variable 'missing'."]);
}

#[test]
fn test_special_variables() {
    let (runtime, _) = interpret("$fn = 16; a = $fn * 2;");
    assert_eq!(runtime.get_identifier("a"), Value::Number(32.0));
}

#[test]
fn test_runner_steps_are_resumable() {
    let statements = compile("a = 1; b = 2; c = a + b;").unwrap();
    let mut runtime = Runtime::new(Logger::new());

    let mut runner = Runner::new(&statements, &mut runtime);
    let first: Step = runner.next().unwrap().unwrap();
    assert_eq!(first.kind, "assignment");
    let rest: Vec<_> = runner.collect::<Result<_, _>>().unwrap();
    assert_eq!(rest.len(), 2);

    assert_eq!(runtime.get_identifier("c"), Value::Number(3.0));
}
