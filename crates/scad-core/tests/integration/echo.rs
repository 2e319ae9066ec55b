use super::{assert_echo, run_program};

#[test]
fn test_echo_without_arguments() {
    assert_echo("echo();", &["ECHO: "]);
    assert_echo("echo( );", &["ECHO: "]);
    assert_echo("echo(\n\t);", &["ECHO: "]);
}

#[test]
fn test_echo_renders_values() {
    assert_echo("echo(1, \"two\", true, undef);", &[r#"ECHO: 1, "two", true, undef"#]);
    assert_echo("echo([1, [2]], [0:3]);", &["ECHO: [1, [2]], [0 : 1 : 3]"]);
    assert_echo("echo(1/3);", &["ECHO: 0.333333"]);
}

#[test]
fn test_echo_named_arguments() {
    assert_echo("echo(\"size\", w = 2, h = 1 + 1);", &[r#"ECHO: "size", w = 2, h = 2"#]);
}

#[test]
fn test_echo_runs_after_interpretation() {
    // Hoisting moves the final value of `a` into the first slot
    assert_echo("a = 1; echo(a); a = 2; echo(a);", &["ECHO: 2", "ECHO: 2"]);
}

#[test]
fn test_echo_uses_captured_scope() {
    assert_echo(
        "a = 1; if (true) { a = 5; echo(a); } echo(a);",
        &["ECHO: 5", "ECHO: 1"],
    );
}

#[test]
fn test_echo_order_follows_source() {
    assert_echo(
        "echo(1); if (false) echo(2); else echo(3); { echo(4); }",
        &["ECHO: 1", "ECHO: 3", "ECHO: 4"],
    );
}

#[test]
fn test_echo_warns_about_unknown_variable() {
    let logger = run_program("echo(nothing);").unwrap();
    assert_eq!(
        logger.lines(),
        vec!["WARNING: Ignoring unknown variable 'nothing'.", "ECHO: undef"]
    );
}

#[test]
fn test_cube_is_silent() {
    let logger = run_program("cube(10); cube([1, 2, 3], center = true);").unwrap();
    assert!(logger.is_empty());
}
