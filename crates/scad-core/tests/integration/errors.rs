use super::run_failing;
use scad_core::parser::ParseError;
use scad_core::{CompileError, EvalError, PipelineError, compile, tokenize};

fn parse_error(source: &str) -> ParseError {
    match compile(source) {
        Err(CompileError::Parse(err)) => err,
        other => panic!("Expected a parse error.\nSource: {source}\nGot: {other:?}"),
    }
}

#[test]
fn test_invalid_assignment_targets() {
    for source in ["1=1;", "\"a\"=\"b\";", "undef=undef;"] {
        let err = parse_error(source);
        assert!(
            matches!(err, ParseError::InvalidAssignmentTarget { .. }),
            "{source}: {err:?}"
        );
        let token = err.token().unwrap();
        assert_eq!((token.line, token.col), (1, 1), "{source}");
    }

    let err = parse_error("1=1;");
    let token = err.token().unwrap();
    assert_eq!(token.text, "1");
    assert_eq!(token.offset, 0);
}

#[test]
fn test_invalid_target_on_later_line() {
    let err = parse_error("a = 1;\n  [a] = 2;");
    let token = err.token().unwrap();
    assert_eq!(token.text, "[");
    assert_eq!((token.line, token.col), (2, 3));
}

#[test]
fn test_missing_terminator() {
    let err = parse_error("line1=1");
    assert_eq!(err.to_string(), "Unexpected end of input");
}

#[test]
fn test_unexpected_token() {
    let err = parse_error("a = (1 + 2;");
    assert!(err.to_string().starts_with("invalid syntax at line 1"));
}

#[test]
fn test_empty_program() {
    assert_eq!(compile("").unwrap(), Vec::new());
    assert_eq!(compile("  // nothing\n/* here */").unwrap(), Vec::new());
}

#[test]
fn test_unclosed_block_comment_is_a_lex_error() {
    for source in ["x = 1; /* never closed", "x = 1; /* a /* b */"] {
        match compile(source) {
            Err(CompileError::Lex(err)) => {
                assert_eq!((err.line(), err.col()), (1, 8), "{source}");
                assert_eq!(
                    err.to_string(),
                    "unterminated block comment starting at line 1 col 8"
                );
            }
            other => panic!("Expected a lex error.\nSource: {source}\nGot: {other:?}"),
        }
    }
}

#[test]
fn test_lex_errors() {
    let err = tokenize("a = 1;\nb = $;").unwrap_err();
    assert_eq!((err.line(), err.col()), (2, 5));

    let err = compile("s = \"open").unwrap_err();
    assert!(matches!(err, CompileError::Lex(_)));
}

#[test]
fn test_user_module_call_is_not_implemented() {
    let err = run_failing("module box(size) { cube(size); } box(2);");
    match err {
        PipelineError::Eval(EvalError::NotImplemented { kind, name, .. }) => {
            assert_eq!(kind, "module");
            assert_eq!(name, "box");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_user_function_call_is_not_implemented() {
    let err = run_failing("function double(x) = 2 * x; a = double(2);");
    assert!(matches!(
        err,
        PipelineError::Eval(EvalError::NotImplemented { kind: "function", .. })
    ));
}

#[test]
fn test_range_condition_is_a_coercion_error() {
    let err = run_failing("if ([1:2]) echo(1);");
    assert!(matches!(
        err,
        PipelineError::Eval(EvalError::Coercion { from: "range", to: "boolean", .. })
    ));
}

#[test]
fn test_error_renders_with_snippet() {
    let pipeline = scad_core::Pipeline::new(
        "a = 1;\nb = 2;\n1 = 3;".to_string(),
        "model.scad".to_string(),
    );
    let err = pipeline.run_all().unwrap_err();
    let rendered = pipeline.render(&err);
    assert!(rendered.contains("--> model.scad:3:1"));
    assert!(rendered.contains("3 | 1 = 3;"));
    assert!(rendered.contains("help: only a plain identifier can be assigned to"));
}
