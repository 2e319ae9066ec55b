use super::{assert_binding, root_value};
use scad_core::Value;

#[test]
fn test_number_literals() {
    assert_binding("a = 42;", "a", "42");
    assert_binding("a = 1.5;", "a", "1.5");
    assert_binding("a = .5;", "a", "0.5");
    assert_binding("a = 5.;", "a", "5");
    assert_binding("a = 1e3;", "a", "1000");
    assert_binding("a = 007;", "a", "7");
}

#[test]
fn test_string_literals() {
    assert_eq!(
        root_value(r#"s = "a\"b\\c";"#, "s"),
        Value::String("a\"b\\c".to_string())
    );
    assert_eq!(
        root_value(r#"s = "é";"#, "s"),
        Value::String("\u{e9}".to_string())
    );
}

#[test]
fn test_arithmetic() {
    assert_binding("a = 1+2+3+4;", "a", "10");
    assert_binding("a = 1/2/3/4;", "a", "0.0416667");
    assert_binding("a = 5/(4+3)/2;", "a", "0.357143");
    assert_binding("a = - 1 +(0- -2);", "a", "1");
}

#[test]
fn test_precedence() {
    assert_binding("a = 2 + 3 * 4;", "a", "14");
    assert_binding("a = (2 + 3) * 4;", "a", "20");
    assert_binding("a = 10 - 4 - 3;", "a", "3");
    assert_binding("a = 1 + 2 < 4 == true;", "a", "true");
    assert_binding("a = 1 < 2 && 3 > 4 || true;", "a", "true");
}

#[test]
fn test_division_by_zero() {
    assert_binding("a = 1/0;", "a", "inf");
    assert_binding("a = -1/0;", "a", "-inf");
    assert_binding("a = 0/0;", "a", "nan");
}

#[test]
fn test_large_and_small_numbers() {
    assert_binding("a = 1000000;", "a", "1e+06");
    assert_binding("a = 123456;", "a", "123456");
    assert_binding("a = 0.00001;", "a", "1e-05");
}

#[test]
fn test_mismatched_comparisons_never_raise() {
    assert_eq!(root_value(r#"a = 1=="a";"#, "a"), Value::Boolean(false));
    assert_eq!(root_value(r#"a = 1!="a";"#, "a"), Value::Boolean(true));
    assert_eq!(root_value(r#"a = [1] < 2;"#, "a"), Value::Boolean(false));
    assert_eq!(root_value("a = true == 1;", "a"), Value::Boolean(true));
}

#[test]
fn test_unsupported_operators_are_undef() {
    assert_binding(r#"a = "a" + "b";"#, "a", "undef");
    assert_binding("a = [1, 2] * 2;", "a", "undef");
    assert_binding("a = 1 << 2;", "a", "undef");
    assert_binding("a = -\"x\";", "a", "undef");
}

#[test]
fn test_truthiness() {
    for falsy in ["undef", "0", "\"\"", "[]", "false"] {
        assert_eq!(
            root_value(&format!("a = !{falsy};"), "a"),
            Value::Boolean(true),
            "{falsy} should be falsy"
        );
        assert_eq!(
            root_value(&format!("a = {falsy} || {falsy};"), "a"),
            Value::Boolean(false),
            "{falsy} should be falsy"
        );
    }
    for truthy in ["1", "-0.5", "\"a\"", "[0]", "true"] {
        assert_eq!(
            root_value(&format!("a = !{truthy};"), "a"),
            Value::Boolean(false),
            "{truthy} should be truthy"
        );
        assert_eq!(
            root_value(&format!("a = {truthy} && {truthy};"), "a"),
            Value::Boolean(true),
            "{truthy} should be truthy"
        );
    }
}

#[test]
fn test_vectors_and_indexing() {
    assert_binding("v = [1, [2, 3], \"x\"];", "v", "[1, [2, 3], \"x\"]");
    assert_binding("v = [1, [2, 3]]; a = v[1][0];", "a", "2");
    assert_binding("v = [1, 2]; a = v[5];", "a", "undef");
    assert_binding("a = \"hello\"[1];", "a", "\"e\"");
}

#[test]
fn test_ranges() {
    assert_binding("r = [0:5];", "r", "[0 : 1 : 5]");
    assert_binding("r = [0:0.5:2];", "r", "[0 : 0.5 : 2]");
    assert_binding("a = [0:5] == [0:5];", "a", "true");
}

#[test]
fn test_conditional() {
    assert_binding("a = 1 > 0 ? \"yes\" : \"no\";", "a", "\"yes\"");
    assert_binding("a = 0 ? 1 : 0 ? 2 : 3;", "a", "3");
}
